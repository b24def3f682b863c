//! 位姿存储
//!
//! 独占持有 27 个小方块的位姿与颜色。位姿只能通过 [`TransformStore::bake_rotation`]
//! 永久修改，动画过程中的临时旋转不会写入这里。

use super::cubie::{Palette, SubCube};
use super::layer::LayerSelector;
use crate::math::{matrix, utils, Matrix4, Vector3};

/// 每条棱上的小方块数
pub const GRID_SIZE: usize = 3;

/// 小方块总数
pub const CUBIE_COUNT: usize = GRID_SIZE * GRID_SIZE * GRID_SIZE;

/// 27 个小方块的位姿存储
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStore {
    cubies: Vec<SubCube>,
}

impl Default for TransformStore {
    fn default() -> Self {
        Self::new(&Palette::default())
    }
}

impl TransformStore {
    /// 创建已还原状态的魔方
    pub fn new(palette: &Palette) -> Self {
        let mut cubies = Vec::with_capacity(CUBIE_COUNT);
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                for z in 0..GRID_SIZE {
                    cubies.push(SubCube::new([x, y, z], palette));
                }
            }
        }
        Self { cubies }
    }

    /// 网格下标到线性下标
    pub fn index_of(x: usize, y: usize, z: usize) -> Option<usize> {
        if x < GRID_SIZE && y < GRID_SIZE && z < GRID_SIZE {
            Some((x * GRID_SIZE + y) * GRID_SIZE + z)
        } else {
            None
        }
    }

    /// 创建时网格坐标为 (x, y, z) 的小方块的当前位姿
    pub fn pose(&self, x: usize, y: usize, z: usize) -> Option<&Matrix4> {
        self.cubie(x, y, z).map(SubCube::pose)
    }

    pub fn cubie(&self, x: usize, y: usize, z: usize) -> Option<&SubCube> {
        Self::index_of(x, y, z).map(|i| &self.cubies[i])
    }

    pub fn get(&self, index: usize) -> Option<&SubCube> {
        self.cubies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubCube> {
        self.cubies.iter()
    }

    pub fn len(&self) -> usize {
        self.cubies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubies.is_empty()
    }

    /// 当前位于 `selector` 所选层中的小方块下标
    pub fn select<'a>(&'a self, selector: &'a LayerSelector) -> impl Iterator<Item = usize> + 'a {
        self.cubies
            .iter()
            .enumerate()
            .filter(move |(_, cubie)| selector.contains(&cubie.world_position()))
            .map(|(i, _)| i)
    }

    /// 把 `rotation`（绕世界原点的纯旋转）左乘到所有满足 `predicate` 的位姿上
    ///
    /// 谓词以旋转前的世界坐标求值。每个被选中的位姿只旋转一次，随后吸附到
    /// 整数网格，消除浮点误差的累积。返回被旋转的小方块数量。
    pub fn bake_rotation<P>(&mut self, rotation: &Matrix4, predicate: P) -> usize
    where
        P: Fn(&Vector3) -> bool,
    {
        let mut baked = 0;
        for cubie in self.cubies.iter_mut() {
            if predicate(&cubie.world_position()) {
                let pose = rotation * cubie.pose();
                cubie.set_pose(matrix::snap_to_grid(&pose));
                baked += 1;
            }
        }
        baked
    }

    /// 所有小方块是否都回到了初始位姿
    pub fn is_at_home(&self) -> bool {
        self.cubies.iter().all(|cubie| {
            utils::matrix_approx_eq(
                cubie.pose(),
                &SubCube::home_pose(cubie.grid_index()),
                1e-4,
            )
        })
    }
}
