//! 渲染快照
//!
//! 每帧从会话中取出只读的绘制数据交给渲染器：27 个小方块的显示位姿
//! （已叠加动画中的临时旋转，并缩小留出缝隙）、各面颜色以及相机矩阵。

use crate::cube::{SessionController, CUBIE_COUNT};
use crate::core::clock::Clock;
use crate::math::{matrix, Color, Matrix4, Vector3};

use super::camera::OrbitCamera;

use rand::Rng;

/// 小方块之间的缝隙缩放
pub const CUBIE_SCALE: f32 = 0.95;

/// 后处理效果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostEffect {
    #[default]
    Normal,
    Invert,
    Vignette,
    Grayscale,
}

impl PostEffect {
    pub const ALL: [PostEffect; 4] = [
        PostEffect::Normal,
        PostEffect::Invert,
        PostEffect::Vignette,
        PostEffect::Grayscale,
    ];

    /// 渲染器传给后处理着色器的效果编号
    pub fn shader_index(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            PostEffect::Normal => "Normal",
            PostEffect::Invert => "Invert",
            PostEffect::Vignette => "Vignette",
            PostEffect::Grayscale => "Grayscale",
        }
    }
}

/// 单个小方块的绘制数据
#[derive(Debug, Clone, PartialEq)]
pub struct CubieDraw {
    /// 模型矩阵
    pub model: Matrix4,
    /// 按局部面排列的颜色
    pub face_colors: [Color; 6],
}

/// 一帧的绘制数据
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub cubies: Vec<CubieDraw>,
    pub view: Matrix4,
    pub projection: Matrix4,
    pub eye: Vector3,
    pub post_effect: PostEffect,
}

impl RenderSnapshot {
    /// 采集当前帧
    pub fn capture<C: Clock, R: Rng>(
        session: &SessionController<C, R>,
        camera: &OrbitCamera,
        aspect: f32,
        post_effect: PostEffect,
    ) -> Self {
        let store = &session.puzzle().store;
        let scale = matrix::uniform_scaling(CUBIE_SCALE);

        let mut cubies = Vec::with_capacity(CUBIE_COUNT);
        for (index, cubie) in store.iter().enumerate() {
            let pose = session
                .engine()
                .display_pose(store, index)
                .unwrap_or(*cubie.pose());
            cubies.push(CubieDraw {
                model: pose * scale,
                face_colors: *cubie.face_colors(),
            });
        }

        Self {
            cubies,
            view: camera.view_matrix(),
            projection: camera.projection(aspect),
            eye: camera.eye_position(),
            post_effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::cube::{Axis, Command, Direction, Layer, Move, SessionSettings};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_post_effect_indices() {
        let indices: Vec<u32> = PostEffect::ALL.iter().map(|e| e.shader_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(PostEffect::default(), PostEffect::Normal);
    }

    #[test]
    fn test_snapshot_scales_cubies() {
        let clock = ManualClock::new();
        let session =
            SessionController::new(SessionSettings::default(), &clock, StdRng::seed_from_u64(1));
        let snapshot = RenderSnapshot::capture(
            &session,
            &OrbitCamera::default(),
            4.0 / 3.0,
            PostEffect::Invert,
        );

        assert_eq!(snapshot.cubies.len(), CUBIE_COUNT);
        let corner = &snapshot.cubies[0].model;
        assert_eq!(matrix::translation_of(corner), Vector3::new(-1.0, -1.0, -1.0));
        assert!((corner[(0, 0)] - CUBIE_SCALE).abs() < 1e-6);
        assert_eq!(snapshot.post_effect.shader_index(), 1);
    }

    #[test]
    fn test_snapshot_shows_animation_in_progress() {
        let clock = ManualClock::new();
        let mut session =
            SessionController::new(SessionSettings::default(), &clock, StdRng::seed_from_u64(1));
        let mv = Move::new(Axis::Y, Layer::POSITIVE, Direction::Positive);
        session.handle_command(Command::Rotate(mv));
        session.tick();

        let snapshot =
            RenderSnapshot::capture(&session, &OrbitCamera::default(), 1.0, PostEffect::Normal);
        let top_corner = crate::cube::TransformStore::index_of(0, 2, 0).unwrap();
        let shown = matrix::translation_of(&snapshot.cubies[top_corner].model);
        // 已转动 9°，不再位于网格点上
        assert!((shown.x + 1.0).abs() > 1e-3);
        // 存储中的位姿保持不变
        assert!(session.puzzle().store.is_at_home());
    }
}
