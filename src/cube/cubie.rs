//! 小方块（cubie）
//!
//! 27 个小方块各自持有一个刚体位姿和 6 个面的颜色。
//! 颜色数组以小方块的 **局部** 面为下标，初始化后不再改变；
//! 转动只修改位姿，颜色随位姿刚性旋转，因此朝向永远正确。

use serde::{Deserialize, Serialize};

use crate::math::{matrix, Color, Matrix4, Vector3};

/// 小方块的局部面
///
/// 顺序与渲染器使用的单位立方体顶点布局一致（每个面 6 个顶点）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    NegZ = 0,
    PosZ = 1,
    NegX = 2,
    PosX = 3,
    NegY = 4,
    PosY = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::NegZ,
        Face::PosZ,
        Face::NegX,
        Face::PosX,
        Face::NegY,
        Face::PosY,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// 局部坐标系下的外法线
    pub fn local_normal(self) -> Vector3 {
        match self {
            Face::NegZ => -Vector3::z(),
            Face::PosZ => Vector3::z(),
            Face::NegX => -Vector3::x(),
            Face::PosX => Vector3::x(),
            Face::NegY => -Vector3::y(),
            Face::PosY => Vector3::y(),
        }
    }
}

/// 贴纸配色
///
/// 默认值是经典配色：前绿、后蓝、左红、右橙、底白、顶黄，内部面为深灰。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// z = 0 的面
    pub front: Color,
    /// z = 2 的面
    pub back: Color,
    /// x = 0 的面
    pub left: Color,
    /// x = 2 的面
    pub right: Color,
    /// y = 0 的面
    pub bottom: Color,
    /// y = 2 的面
    pub top: Color,
    /// 内部面
    pub body: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            front: Color::rgb(0.0, 0.6, 0.0),
            back: Color::rgb(0.0, 0.0, 0.8),
            left: Color::rgb(0.8, 0.0, 0.0),
            right: Color::rgb(1.0, 0.5, 0.0),
            bottom: Color::rgb(0.9, 0.9, 0.9),
            top: Color::rgb(0.9, 0.9, 0.0),
            body: Color::rgb(0.1, 0.1, 0.1),
        }
    }
}

impl Palette {
    /// 网格坐标为 `grid` 的小方块的 6 个面颜色
    pub fn face_colors(&self, grid: [usize; 3]) -> [Color; 6] {
        let [x, y, z] = grid;
        let mut colors = [self.body; 6];
        if z == 0 {
            colors[Face::NegZ.index()] = self.front;
        }
        if z == 2 {
            colors[Face::PosZ.index()] = self.back;
        }
        if x == 0 {
            colors[Face::NegX.index()] = self.left;
        }
        if x == 2 {
            colors[Face::PosX.index()] = self.right;
        }
        if y == 0 {
            colors[Face::NegY.index()] = self.bottom;
        }
        if y == 2 {
            colors[Face::PosY.index()] = self.top;
        }
        colors
    }
}

/// 一个小方块
///
/// `grid` 只是创建时的身份标签，不代表当前位置；当前位置由 `pose` 决定。
#[derive(Debug, Clone, PartialEq)]
pub struct SubCube {
    grid: [usize; 3],
    pose: Matrix4,
    face_colors: [Color; 6],
}

impl SubCube {
    pub(crate) fn new(grid: [usize; 3], palette: &Palette) -> Self {
        Self {
            grid,
            pose: Self::home_pose(grid),
            face_colors: palette.face_colors(grid),
        }
    }

    /// 已还原状态下的位姿：平移到 (x-1, y-1, z-1)
    pub fn home_pose(grid: [usize; 3]) -> Matrix4 {
        let [x, y, z] = grid.map(|c| c as f32 - 1.0);
        matrix::translation(x, y, z)
    }

    pub fn grid_index(&self) -> [usize; 3] {
        self.grid
    }

    pub fn pose(&self) -> &Matrix4 {
        &self.pose
    }

    pub fn face_colors(&self) -> &[Color; 6] {
        &self.face_colors
    }

    pub fn face_color(&self, face: Face) -> Color {
        self.face_colors[face.index()]
    }

    /// 当前世界坐标（位姿作用于局部原点）
    pub fn world_position(&self) -> Vector3 {
        matrix::translation_of(&self.pose)
    }

    /// 局部面当前在世界空间中的朝向
    pub fn world_normal(&self, face: Face) -> Vector3 {
        self.pose.transform_vector(&face.local_normal())
    }

    pub(crate) fn set_pose(&mut self, pose: Matrix4) {
        self.pose = pose;
    }
}
