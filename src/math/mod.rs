//! 统一的数学库模块
//!
//! 提供魔方状态引擎使用的数学类型和函数。
//! 基于 `nalgebra`，沿用简洁的类型名称（Vector3, Matrix4 等）。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector3/4, Matrix4, Point3, Color
//! - **常量**：PI, DEG_TO_RAD 等
//! - **工具函数**：deg_to_rad, approx_eq, clamp
//! - **矩阵辅助函数**：平移、绕坐标轴旋转、投影、Look-At、网格吸附

pub use nalgebra::{Matrix4 as Mat4, Point3, Vector3 as Vec3, Vector4 as Vec4};
use serde::{Deserialize, Serialize};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix4 = Mat4<f32>;

/// 颜色类型（RGBA，范围 0.0-1.0）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl Color {
    /// 创建新的颜色
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建 RGB 颜色（alpha = 1.0）
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// 转换为 Vector3（忽略 alpha），即着色器顶点属性的格式
    pub fn to_vec3(&self) -> Vector3 {
        Vector3::new(self.r, self.g, self.b)
    }

    /// 转换为 Vector4
    pub fn to_vec4(&self) -> Vector4 {
        Vector4::new(self.r, self.g, self.b, self.a)
    }
}

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-5;
}

/// 数学工具函数
pub mod utils {
    use super::*;

    /// 限制值在范围内
    pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// 角度转弧度
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// 逐元素比较两个矩阵
    pub fn matrix_approx_eq(a: &Matrix4, b: &Matrix4, epsilon: f32) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y, epsilon))
    }
}

/// 矩阵辅助函数
pub mod matrix {
    use super::*;

    /// 创建平移矩阵
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// 创建均匀缩放矩阵
    pub fn uniform_scaling(s: f32) -> Matrix4 {
        Matrix4::new_scaling(s)
    }

    /// 创建绕 X 轴旋转的矩阵（弧度）
    pub fn rotation_x(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::x_axis(), angle)
    }

    /// 创建绕 Y 轴旋转的矩阵（弧度）
    pub fn rotation_y(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::y_axis(), angle)
    }

    /// 创建绕 Z 轴旋转的矩阵（弧度）
    pub fn rotation_z(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::z_axis(), angle)
    }

    /// 平移分量，即刚体变换作用于局部原点后的世界坐标
    pub fn translation_of(m: &Matrix4) -> Vector3 {
        Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
    }

    /// 将矩阵的每个元素吸附到最近的整数
    ///
    /// 绕坐标轴的 90° 整数倍旋转只会产生 {-1, 0, 1} 的旋转分量，
    /// 网格平移也都是整数，因此吸附后矩阵恢复为精确值，浮点误差不会累积。
    pub fn snap_to_grid(m: &Matrix4) -> Matrix4 {
        // 0.0 与 -0.0 统一成 0.0，便于逐元素比较
        m.map(|v| v.round() + 0.0)
    }

    /// 创建透视投影矩阵
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4 {
        Matrix4::new_perspective(aspect, fov_y, near, far)
    }

    /// 创建 Look-At 视图矩阵
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Matrix4 {
        Matrix4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
    }
}
