//! 转动引擎
//!
//! 每次转动是一个 `Idle → Animating → Idle` 的小状态机：
//!
//! ```text
//!            request_move              tick (elapsed >= 90°)
//!   Idle ─────────────────▶ Animating ─────────────────────▶ Idle
//!                               │  ▲                       (bake)
//!                               └──┘ tick (elapsed < 90°)
//! ```
//!
//! 动画进行中的旋转只用于显示，每帧从已烘焙的位姿重新计算，
//! 绝不写回位姿存储；只有转满 90° 时才一次性烘焙。

use std::fmt;

use super::layer::select_layer;
use super::moves::Move;
use super::puzzle::PuzzleState;
use super::store::TransformStore;
use crate::math::Matrix4;

/// 四分之一圈的角度
pub const QUARTER_TURN_DEGREES: f32 = 90.0;

/// 转动触发通知（音效等观察者）
pub trait MoveListener {
    fn on_move_triggered(&mut self, mv: &Move);
}

/// 正在进行中的转动动画
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    mv: Move,
    elapsed_degrees: f32,
    /// 动画开始时位于该层的小方块；转动过程中层成员不会改变
    affected: Vec<usize>,
}

impl AnimationState {
    pub fn current_move(&self) -> Move {
        self.mv
    }

    pub fn elapsed_degrees(&self) -> f32 {
        self.elapsed_degrees
    }

    /// 动画进度，0.0 到 1.0
    pub fn progress(&self) -> f32 {
        (self.elapsed_degrees / QUARTER_TURN_DEGREES).min(1.0)
    }

    pub fn affects(&self, index: usize) -> bool {
        self.affected.contains(&index)
    }

    pub fn affected(&self) -> &[usize] {
        &self.affected
    }

    /// 当前帧的临时显示旋转
    pub fn display_rotation(&self) -> Matrix4 {
        self.mv.axis.rotation(self.mv.signed_degrees(self.elapsed_degrees))
    }
}

/// `request_move` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRequest {
    /// 已有转动在进行，请求被丢弃
    Ignored,
    /// 动画已开始；`recorded` 表示是否写入了历史
    Started { recorded: bool },
}

/// 转动引擎
#[derive(Default)]
pub struct MoveEngine {
    animation: Option<AnimationState>,
    listeners: Vec<Box<dyn MoveListener>>,
}

impl fmt::Debug for MoveEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveEngine")
            .field("animation", &self.animation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl MoveEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册转动触发的观察者
    pub fn add_listener(&mut self, listener: Box<dyn MoveListener>) {
        self.listeners.push(listener);
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&AnimationState> {
        self.animation.as_ref()
    }

    /// 请求一次转动
    ///
    /// 动画进行中时静默忽略。否则开始动画；`record` 为真时写入历史
    /// （历史已满则只记日志，转动照常进行）。
    pub fn request_move(
        &mut self,
        puzzle: &mut PuzzleState,
        mv: Move,
        record: bool,
    ) -> MoveRequest {
        if self.is_animating() {
            crate::engine_debug!(%mv, "Move dropped: another move is animating");
            return MoveRequest::Ignored;
        }

        let selector = select_layer(mv.axis, mv.layer);
        let affected: Vec<usize> = puzzle.store.select(&selector).collect();
        debug_assert_eq!(affected.len(), 9, "layer {} selected {} cubies", mv, affected.len());

        let recorded = record
            && match puzzle.history.push(mv) {
                Ok(()) => true,
                Err(e) => {
                    crate::engine_warn!(%mv, "Move not recorded: {}", e);
                    false
                }
            };

        self.animation = Some(AnimationState {
            mv,
            elapsed_degrees: 0.0,
            affected,
        });

        crate::engine_debug!(%mv, recorded, "Move started");
        for listener in self.listeners.iter_mut() {
            listener.on_move_triggered(&mv);
        }

        MoveRequest::Started { recorded }
    }

    /// 推进动画 `speed` 度
    ///
    /// 转满 90° 时烘焙到位姿存储并回到空闲，返回完成的转动。
    /// 空闲时调用没有任何效果。
    pub fn tick(&mut self, puzzle: &mut PuzzleState, speed: f32) -> Option<Move> {
        let animation = self.animation.as_mut()?;
        animation.elapsed_degrees += speed;
        if animation.elapsed_degrees < QUARTER_TURN_DEGREES {
            return None;
        }

        let mv = animation.mv;
        self.animation = None;

        let rotation = mv.axis.rotation(mv.signed_degrees(QUARTER_TURN_DEGREES));
        let baked = puzzle
            .store
            .bake_rotation(&rotation, select_layer(mv.axis, mv.layer).predicate());
        debug_assert_eq!(baked, 9, "bake of {} touched {} cubies", mv, baked);

        crate::engine_debug!(%mv, baked, "Move completed");
        Some(mv)
    }

    /// 本帧用于绘制的位姿
    ///
    /// 不在动画层中的小方块直接使用烘焙位姿；动画层中的小方块在其左侧
    /// 叠加临时显示旋转。
    pub fn display_pose(&self, store: &TransformStore, index: usize) -> Option<Matrix4> {
        let pose = store.get(index)?.pose();
        match &self.animation {
            Some(animation) if animation.affects(index) => {
                Some(animation.display_rotation() * pose)
            }
            _ => Some(*pose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{Axis, Direction, Layer};
    use crate::math::{matrix, utils, Vector3};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn y_top_positive() -> Move {
        Move::new(Axis::Y, Layer::POSITIVE, Direction::Positive)
    }

    fn run_to_completion(engine: &mut MoveEngine, puzzle: &mut PuzzleState, speed: f32) -> usize {
        let mut ticks = 0;
        while engine.is_animating() {
            engine.tick(puzzle, speed);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_quarter_turn_scenario() {
        let mut puzzle = PuzzleState::default();
        let mut engine = MoveEngine::new();

        let result = engine.request_move(&mut puzzle, y_top_positive(), true);
        assert_eq!(result, MoveRequest::Started { recorded: true });
        assert_eq!(engine.animation().unwrap().affected().len(), 9);

        // 9°/帧需要 10 帧
        assert_eq!(run_to_completion(&mut engine, &mut puzzle, 9.0), 10);
        assert_eq!(puzzle.history.count(), 1);

        let moved = puzzle.store.cubie(0, 2, 0).unwrap();
        assert_eq!(moved.world_position(), Vector3::new(-1.0, 1.0, 1.0));

        let top = select_layer(Axis::Y, Layer::POSITIVE);
        let members: Vec<usize> = puzzle.store.select(&top).collect();
        assert_eq!(members.len(), 9);
        for index in members {
            assert_eq!(puzzle.store.get(index).unwrap().grid_index()[1], 2);
        }
    }

    #[test]
    fn test_request_while_animating_is_ignored() {
        let mut puzzle = PuzzleState::default();
        let mut engine = MoveEngine::new();

        engine.request_move(&mut puzzle, y_top_positive(), true);
        engine.tick(&mut puzzle, 9.0);

        let second = Move::new(Axis::X, Layer::MIDDLE, Direction::Negative);
        assert_eq!(engine.request_move(&mut puzzle, second, true), MoveRequest::Ignored);
        assert_eq!(puzzle.history.count(), 1);
        assert_eq!(engine.animation().unwrap().current_move(), y_top_positive());
    }

    #[test]
    fn test_transient_rotation_is_not_baked() {
        let mut puzzle = PuzzleState::default();
        let mut engine = MoveEngine::new();
        engine.request_move(&mut puzzle, y_top_positive(), false);

        assert!(engine.tick(&mut puzzle, 45.0).is_none());
        assert!(puzzle.store.is_at_home());
        assert!(utils::approx_eq(engine.animation().unwrap().progress(), 0.5, 1e-6));

        let index = TransformStore::index_of(0, 2, 0).unwrap();
        let shown = engine.display_pose(&puzzle.store, index).unwrap();
        let p = matrix::translation_of(&shown);
        // 转了 45°，(-1, 1, -1) 位于对角线上
        assert!(utils::approx_eq(p.x, -std::f32::consts::SQRT_2, 1e-5));
        assert!(utils::approx_eq(p.z, 0.0, 1e-5));

        // 其他层的小方块显示的是烘焙位姿
        let still = TransformStore::index_of(0, 0, 0).unwrap();
        assert_eq!(
            engine.display_pose(&puzzle.store, still).unwrap(),
            *puzzle.store.get(still).unwrap().pose()
        );
    }

    #[test]
    fn test_tick_after_completion_has_no_effect() {
        let mut puzzle = PuzzleState::default();
        let mut engine = MoveEngine::new();
        engine.request_move(&mut puzzle, y_top_positive(), true);

        assert_eq!(engine.tick(&mut puzzle, 90.0), Some(y_top_positive()));
        let snapshot = puzzle.store.clone();

        assert_eq!(engine.tick(&mut puzzle, 90.0), None);
        assert_eq!(engine.tick(&mut puzzle, 90.0), None);
        assert_eq!(puzzle.store, snapshot);
    }

    #[test]
    fn test_unrecorded_moves_skip_history() {
        let mut puzzle = PuzzleState::default();
        let mut engine = MoveEngine::new();
        let result = engine.request_move(&mut puzzle, y_top_positive(), false);
        assert_eq!(result, MoveRequest::Started { recorded: false });
        assert!(puzzle.history.is_empty());
    }

    #[test]
    fn test_full_history_still_animates() {
        let mut puzzle = PuzzleState::new(&Default::default(), 1);
        let mut engine = MoveEngine::new();

        engine.request_move(&mut puzzle, y_top_positive(), true);
        run_to_completion(&mut engine, &mut puzzle, 30.0);

        let result = engine.request_move(&mut puzzle, y_top_positive(), true);
        assert_eq!(result, MoveRequest::Started { recorded: false });
        assert_eq!(puzzle.history.count(), 1);
    }

    #[test]
    fn test_reverse_replay_restores_home() {
        let mut puzzle = PuzzleState::default();
        let mut engine = MoveEngine::new();
        let sequence = [
            Move::new(Axis::X, Layer::POSITIVE, Direction::Positive),
            Move::new(Axis::Y, Layer::MIDDLE, Direction::Negative),
            Move::new(Axis::Z, Layer::NEGATIVE, Direction::Positive),
            Move::new(Axis::Y, Layer::POSITIVE, Direction::Positive),
            Move::new(Axis::X, Layer::NEGATIVE, Direction::Negative),
        ];

        for mv in sequence.iter().cycle().take(200) {
            engine.request_move(&mut puzzle, *mv, true);
            run_to_completion(&mut engine, &mut puzzle, 7.0);
        }
        assert!(!puzzle.store.is_at_home());

        while let Ok(mv) = puzzle.history.pop() {
            engine.request_move(&mut puzzle, mv.inverse(), false);
            run_to_completion(&mut engine, &mut puzzle, 7.0);
        }
        assert!(puzzle.store.is_at_home());
    }

    struct Counter(Rc<RefCell<Vec<Move>>>);

    impl MoveListener for Counter {
        fn on_move_triggered(&mut self, mv: &Move) {
            self.0.borrow_mut().push(*mv);
        }
    }

    #[test]
    fn test_listeners_are_notified_on_start() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut puzzle = PuzzleState::default();
        let mut engine = MoveEngine::new();
        engine.add_listener(Box::new(Counter(seen.clone())));

        engine.request_move(&mut puzzle, y_top_positive(), true);
        engine.request_move(&mut puzzle, y_top_positive().inverse(), true);

        assert_eq!(*seen.borrow(), vec![y_top_positive()]);
    }
}
