//! 环绕相机
//!
//! 相机始终注视原点，位置由偏航角、俯仰角和距离决定：
//! `eye = Rx(pitch) · Ry(yaw) · (0, 0, distance)`，上方向固定为 +Y。

use crate::core::config::ViewConfig;
use crate::math::{matrix, utils, Matrix4, Vector3, Vector4};

/// 俯仰角上限（度），避免视线与上方向共线
pub const PITCH_LIMIT: f32 = 89.0;

/// 近裁剪面
pub const NEAR_Z: f32 = 0.1;

/// 远裁剪面
pub const FAR_Z: f32 = 100.0;

/// 环绕相机
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// 偏航角（度）
    yaw: f32,

    /// 俯仰角（度），限制在 [-89, 89]
    pitch: f32,

    /// 到原点的距离
    distance: f32,

    /// 垂直视场角（度）
    fov: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

impl OrbitCamera {
    /// 从视图配置创建相机
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            yaw: config.yaw,
            pitch: utils::clamp(config.pitch, -PITCH_LIMIT, PITCH_LIMIT),
            distance: config.distance,
            fov: config.fov,
        }
    }

    // ========== 角度 ==========

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// 按角度增量环绕（度）
    ///
    /// 偏航角不做限制，俯仰角钳制在 [-89, 89]。
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = utils::clamp(self.pitch + delta_pitch, -PITCH_LIMIT, PITCH_LIMIT);
    }

    // ========== 矩阵 ==========

    /// 相机在世界空间中的位置
    pub fn eye_position(&self) -> Vector3 {
        let rotation = matrix::rotation_x(utils::deg_to_rad(self.pitch))
            * matrix::rotation_y(utils::deg_to_rad(self.yaw));
        let eye = rotation * Vector4::new(0.0, 0.0, self.distance, 1.0);
        eye.xyz()
    }

    /// 视图矩阵
    pub fn view_matrix(&self) -> Matrix4 {
        matrix::look_at(&self.eye_position(), &Vector3::zeros(), &Vector3::y())
    }

    /// 投影矩阵
    pub fn projection(&self, aspect: f32) -> Matrix4 {
        matrix::perspective(utils::deg_to_rad(self.fov), aspect, NEAR_Z, FAR_Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.yaw(), 45.0);
        assert_eq!(camera.pitch(), -30.0);
        assert!(utils::approx_eq(camera.eye_position().norm(), 8.0, 1e-4));
    }

    #[test]
    fn test_pitch_clamp() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, 500.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        camera.orbit(10.0, -1000.0);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
        assert_eq!(camera.yaw(), 55.0);
    }

    #[test]
    fn test_eye_without_rotation_is_on_z_axis() {
        let config = ViewConfig {
            yaw: 0.0,
            pitch: 0.0,
            ..ViewConfig::default()
        };
        let camera = OrbitCamera::from_config(&config);
        let eye = camera.eye_position();
        assert!(utils::approx_eq(eye.x, 0.0, 1e-5));
        assert!(utils::approx_eq(eye.z, 8.0, 1e-5));

        // 原点在相机正前方
        let origin = camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(utils::approx_eq(origin.z, -8.0, 1e-4));
    }
}
