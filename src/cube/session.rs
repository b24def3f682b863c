//! 会话控制器
//!
//! 顶层状态机，负责生成打乱序列、按历史倒序自动还原、以及计时。
//! 它是转动引擎唯一的调用者。
//!
//! ```text
//!          Shuffle                remaining == 0              Solve
//!   Idle ───────────▶ Shuffling ─────────────────▶ Playing ──────────▶ AutoSolving
//!    ▲                  │  ▲                                                │
//!    │                  └──┘ remaining > 0: 随机转动                        │
//!    └──────────────────────────────────────────────────────────────────────┘
//!                                 history 为空
//! ```
//!
//! 状态转换只在没有转动进行时、每帧求值一次。

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::cubie::Palette;
use super::engine::{MoveEngine, MoveRequest};
use super::moves::{Axis, Direction, Layer, Move};
use super::puzzle::PuzzleState;
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::Config;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 已还原，等待命令
    Idle,
    /// 正在打乱，还剩 `remaining` 步
    Shuffling { remaining: u32 },
    /// 玩家手动操作中，计时进行
    Playing,
    /// 按历史倒序自动还原中
    AutoSolving,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Shuffling { .. } => "Shuffling",
            SessionState::Playing => "Playing",
            SessionState::AutoSolving => "AutoSolving",
        }
    }
}

/// 输入层发给会话的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Shuffle,
    Solve,
    Rotate(Move),
}

/// 会话参数
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub shuffle_moves: u32,
    pub history_capacity: usize,
    /// 手动转动速度（度/帧）
    pub normal_speed: f32,
    /// 打乱和自动还原速度（度/帧）
    pub fast_speed: f32,
    pub palette: Palette,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            shuffle_moves: config.session.shuffle_moves,
            history_capacity: config.session.history_capacity,
            normal_speed: config.animation.normal_speed,
            fast_speed: config.animation.fast_speed,
            palette: config.palette,
        }
    }
}

/// 会话控制器
#[derive(Debug)]
pub struct SessionController<C: Clock = SystemClock, R: Rng = StdRng> {
    puzzle: PuzzleState,
    engine: MoveEngine,
    state: SessionState,
    move_count: u32,
    start_time: Option<Duration>,
    final_elapsed: Option<Duration>,
    speed: f32,
    settings: SessionSettings,
    clock: C,
    rng: R,
}

impl SessionController<SystemClock, StdRng> {
    /// 按配置创建会话；配置了种子时打乱序列可复现
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SessionSettings::from(config),
            SystemClock::new(),
            seeded_rng(config.session.seed),
        )
    }
}

/// 打乱用的随机数生成器；给定种子时序列可复现
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn checked_speed(field: &str, speed: f32, fallback: f32) -> f32 {
    if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        crate::engine_warn!(field, speed, fallback, "Invalid animation speed, using default");
        fallback
    }
}

impl<C: Clock, R: Rng> SessionController<C, R> {
    /// 创建会话
    ///
    /// 非正或非有限的速度会让动画永远转不满 90°，此时回退到默认速度。
    pub fn new(mut settings: SessionSettings, clock: C, rng: R) -> Self {
        let defaults = Config::default().animation;
        settings.normal_speed =
            checked_speed("normal_speed", settings.normal_speed, defaults.normal_speed);
        settings.fast_speed = checked_speed("fast_speed", settings.fast_speed, defaults.fast_speed);

        Self {
            puzzle: PuzzleState::new(&settings.palette, settings.history_capacity),
            engine: MoveEngine::new(),
            state: SessionState::Idle,
            move_count: 0,
            start_time: None,
            final_elapsed: None,
            speed: settings.normal_speed,
            settings,
            clock,
            rng,
        }
    }

    /// 处理一条命令，返回命令是否被接受
    ///
    /// 转动进行中的命令一律丢弃（不排队）；无法执行的打乱或还原请求
    /// （例如对已还原的魔方请求还原）静默忽略。
    pub fn handle_command(&mut self, command: Command) -> bool {
        if self.engine.is_animating() {
            crate::engine_debug!(?command, "Command dropped: move in flight");
            return false;
        }

        match command {
            Command::Shuffle => match self.state {
                SessionState::Idle | SessionState::Playing => {
                    self.move_count = 0;
                    self.start_time = None;
                    self.final_elapsed = None;
                    self.transition(SessionState::Shuffling {
                        remaining: self.settings.shuffle_moves,
                    });
                    true
                }
                _ => false,
            },
            Command::Solve => match self.state {
                SessionState::Idle | SessionState::Playing if !self.puzzle.history.is_empty() => {
                    self.transition(SessionState::AutoSolving);
                    true
                }
                _ => false,
            },
            Command::Rotate(mv) => match self.state {
                SessionState::Idle | SessionState::Playing => {
                    let result = self.engine.request_move(&mut self.puzzle, mv, true);
                    if result == (MoveRequest::Started { recorded: true })
                        && self.state == SessionState::Playing
                    {
                        self.move_count += 1;
                    }
                    result != MoveRequest::Ignored
                }
                _ => false,
            },
        }
    }

    /// 推进一帧：先在空闲时求值状态转换，再推进动画
    ///
    /// 返回本帧完成的转动。
    pub fn tick(&mut self) -> Option<Move> {
        if !self.engine.is_animating() {
            self.advance();
        }
        self.engine.tick(&mut self.puzzle, self.speed)
    }

    fn advance(&mut self) {
        match self.state {
            SessionState::Shuffling { remaining } if remaining > 0 => {
                let mv = self.random_move();
                self.speed = self.settings.fast_speed;
                self.engine.request_move(&mut self.puzzle, mv, true);
                self.state = SessionState::Shuffling { remaining: remaining - 1 };
            }
            SessionState::Shuffling { .. } => {
                self.speed = self.settings.normal_speed;
                self.start_time = Some(self.clock.now());
                self.transition(SessionState::Playing);
            }
            SessionState::AutoSolving if !self.puzzle.history.is_empty() => {
                match self.puzzle.history.pop() {
                    Ok(mv) => {
                        self.speed = self.settings.fast_speed;
                        self.engine.request_move(&mut self.puzzle, mv.inverse(), false);
                    }
                    Err(e) => {
                        crate::engine_error!("Auto-solve invariant violated: {}", e);
                        debug_assert!(false, "history pop failed after emptiness check");
                    }
                }
            }
            SessionState::AutoSolving => {
                let now = self.clock.now();
                // 计时随本次还原结束；之后的手动转动不再沿用旧的起点
                let start = self.start_time.take().unwrap_or(now);
                self.final_elapsed = Some(now.saturating_sub(start));
                self.speed = self.settings.normal_speed;
                self.transition(SessionState::Idle);
            }
            SessionState::Idle | SessionState::Playing => {}
        }
    }

    fn transition(&mut self, next: SessionState) {
        crate::engine_info!(
            from = self.state.name(),
            to = next.name(),
            history = self.puzzle.history.count(),
            moves = self.move_count,
            "Session state changed"
        );
        self.state = next;
    }

    fn random_move(&mut self) -> Move {
        let axis = Axis::ALL[self.rng.gen_range(0..Axis::ALL.len())];
        let layer = Layer::ALL[self.rng.gen_range(0..Layer::ALL.len())];
        let direction = if self.rng.gen() {
            Direction::Positive
        } else {
            Direction::Negative
        };
        Move::new(axis, layer, direction)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn start_time(&self) -> Option<Duration> {
        self.start_time
    }

    pub fn final_elapsed(&self) -> Option<Duration> {
        self.final_elapsed
    }

    /// 当前动画速度（度/帧）
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn puzzle(&self) -> &PuzzleState {
        &self.puzzle
    }

    pub fn engine(&self) -> &MoveEngine {
        &self.engine
    }

    /// 用于注册 [`MoveListener`](super::MoveListener)
    pub fn engine_mut(&mut self) -> &mut MoveEngine {
        &mut self.engine
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    /// 没有转动进行，且处于可以接受玩家输入的状态
    pub fn is_awaiting_input(&self) -> bool {
        !self.is_animating() && matches!(self.state, SessionState::Idle | SessionState::Playing)
    }

    /// 计时器读数：游玩和还原中为实时耗时，还原完成后为最终耗时
    pub fn elapsed(&self) -> Duration {
        match self.state {
            SessionState::Playing | SessionState::AutoSolving => self
                .start_time
                .map(|start| self.clock.now().saturating_sub(start))
                .unwrap_or_default(),
            SessionState::Idle => self.final_elapsed.unwrap_or_default(),
            SessionState::Shuffling { .. } => Duration::ZERO,
        }
    }

    /// 供界面显示的状态行
    pub fn status_line(&self) -> String {
        format!(
            "{} | time {:.1}s | moves {}",
            self.state.name(),
            self.elapsed().as_secs_f32(),
            self.move_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;

    fn controller(
        clock: &ManualClock,
        shuffle_moves: u32,
    ) -> SessionController<&ManualClock, StdRng> {
        let settings = SessionSettings {
            shuffle_moves,
            ..SessionSettings::default()
        };
        SessionController::new(settings, clock, StdRng::seed_from_u64(7))
    }

    /// 推进直到进入 `target` 状态且没有转动进行，返回期间完成的转动数
    fn run_until<C: Clock, R: Rng>(session: &mut SessionController<C, R>, target: &str) -> usize {
        let mut completed = 0;
        for _ in 0..10_000 {
            if session.state().name() == target && !session.is_animating() {
                return completed;
            }
            if session.tick().is_some() {
                completed += 1;
            }
        }
        panic!("session never reached {}", target);
    }

    #[test]
    fn test_shuffle_scenario() {
        let clock = ManualClock::new();
        let mut session = controller(&clock, 20);
        assert_eq!(session.state(), SessionState::Idle);
        let mut states = vec![session.state().name()];

        assert!(session.handle_command(Command::Shuffle));
        assert_eq!(session.state(), SessionState::Shuffling { remaining: 20 });
        assert_eq!(session.move_count(), 0);
        states.push(session.state().name());

        while session.state() != SessionState::Playing {
            session.tick();
            if states.last() != Some(&session.state().name()) {
                states.push(session.state().name());
            }
        }

        assert_eq!(states, vec!["Idle", "Shuffling", "Playing"]);
        assert_eq!(session.puzzle().history.count(), 20);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.speed(), session.settings().normal_speed);
        assert!(session.start_time().is_some());
    }

    #[test]
    fn test_solve_scenario() {
        let clock = ManualClock::new();
        let mut session = controller(&clock, 5);

        session.handle_command(Command::Shuffle);
        run_until(&mut session, "Playing");
        assert_eq!(session.puzzle().history.count(), 5);

        clock.advance(Duration::from_secs(3));
        assert!(session.handle_command(Command::Solve));
        assert_eq!(session.state(), SessionState::AutoSolving);

        let undone = run_until(&mut session, "Idle");
        assert_eq!(undone, 5);
        assert!(session.puzzle().history.is_empty());
        assert!(session.puzzle().store.is_at_home());
        assert_eq!(session.final_elapsed(), Some(Duration::from_secs(3)));
        assert_eq!(session.status_line(), "Idle | time 3.0s | moves 0");
    }

    #[test]
    fn test_manual_moves_count_while_playing() {
        let clock = ManualClock::new();
        let mut session = controller(&clock, 2);
        session.handle_command(Command::Shuffle);
        run_until(&mut session, "Playing");

        let mv = Move::new(Axis::Z, Layer::POSITIVE, Direction::Negative);
        assert!(session.handle_command(Command::Rotate(mv)));
        // 动画进行中的命令被丢弃
        assert!(!session.handle_command(Command::Rotate(mv)));
        assert!(!session.handle_command(Command::Solve));
        run_until(&mut session, "Playing");

        assert_eq!(session.move_count(), 1);
        assert_eq!(session.puzzle().history.count(), 3);

        session.handle_command(Command::Solve);
        assert_eq!(run_until(&mut session, "Idle"), 3);
        assert!(session.puzzle().store.is_at_home());
    }

    #[test]
    fn test_solve_on_solved_cube_is_noop() {
        let clock = ManualClock::new();
        let mut session = controller(&clock, 20);
        assert!(!session.handle_command(Command::Solve));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.tick().is_none());
    }

    #[test]
    fn test_commands_rejected_while_shuffling() {
        let clock = ManualClock::new();
        let mut session = controller(&clock, 0);
        session.handle_command(Command::Shuffle);

        let mv = Move::new(Axis::X, Layer::MIDDLE, Direction::Positive);
        assert!(!session.handle_command(Command::Rotate(mv)));
        assert!(!session.handle_command(Command::Shuffle));
        assert!(!session.handle_command(Command::Solve));

        // 零步打乱直接进入游玩
        session.tick();
        assert_eq!(session.state(), SessionState::Playing);
        assert!(session.puzzle().history.is_empty());
    }

    #[test]
    fn test_manual_moves_in_idle_can_be_solved() {
        let clock = ManualClock::new();
        let mut session = controller(&clock, 20);
        let mv = Move::new(Axis::Y, Layer::NEGATIVE, Direction::Positive);

        assert!(session.handle_command(Command::Rotate(mv)));
        run_until(&mut session, "Idle");
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.puzzle().history.count(), 1);

        assert!(session.handle_command(Command::Solve));
        assert_eq!(run_until(&mut session, "Idle"), 1);
        assert_eq!(session.final_elapsed(), Some(Duration::ZERO));
        assert!(session.puzzle().store.is_at_home());
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let clock = ManualClock::new();
        let mut a = controller(&clock, 10);
        let mut b = controller(&clock, 10);
        for session in [&mut a, &mut b] {
            session.handle_command(Command::Shuffle);
            run_until(session, "Playing");
        }
        let seq_a: Vec<_> = a.puzzle().history.iter().copied().collect();
        let seq_b: Vec<_> = b.puzzle().history.iter().copied().collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_idle_solve_after_finished_session_has_no_timer() {
        let clock = ManualClock::new();
        let mut session = controller(&clock, 2);

        session.handle_command(Command::Shuffle);
        run_until(&mut session, "Playing");
        clock.advance(Duration::from_secs(3));
        session.handle_command(Command::Solve);
        run_until(&mut session, "Idle");
        assert_eq!(session.final_elapsed(), Some(Duration::from_secs(3)));
        assert_eq!(session.start_time(), None);

        clock.advance(Duration::from_secs(100));
        let mv = Move::new(Axis::Y, Layer::NEGATIVE, Direction::Positive);
        assert!(session.handle_command(Command::Rotate(mv)));
        run_until(&mut session, "Idle");

        assert!(session.handle_command(Command::Solve));
        assert_eq!(session.status_line(), "AutoSolving | time 0.0s | moves 0");
        assert_eq!(run_until(&mut session, "Idle"), 1);
        assert_eq!(session.final_elapsed(), Some(Duration::ZERO));
    }

    #[test]
    fn test_invalid_speeds_fall_back_to_defaults() {
        let clock = ManualClock::new();
        let settings = SessionSettings {
            normal_speed: 0.0,
            fast_speed: f32::NAN,
            ..SessionSettings::default()
        };
        let mut session = SessionController::new(settings, &clock, StdRng::seed_from_u64(7));
        assert_eq!(session.settings().normal_speed, 9.0);
        assert_eq!(session.settings().fast_speed, 20.0);

        let mv = Move::new(Axis::X, Layer::POSITIVE, Direction::Negative);
        session.handle_command(Command::Rotate(mv));
        let mut ticks = 0;
        while session.is_animating() {
            session.tick();
            ticks += 1;
            assert!(ticks <= 10, "animation never finished");
        }
        assert_eq!(ticks, 10);
    }
}
