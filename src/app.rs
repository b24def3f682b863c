//! 应用外壳
//!
//! [`CubeApp`] 持有会话、输入系统和视图状态，是平台层（窗口循环或无头回放）
//! 唯一需要对接的对象：平台层把键盘、鼠标和帧事件交给它处理，
//! 每帧取走一份 [`RenderSnapshot`] 和状态行。

use rand::rngs::StdRng;
use rand::Rng;

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::Config;
use crate::core::event::{Event, EventDispatcher, EventHandler, EventType, KeyboardEvent};
use crate::core::input::{InputAction, InputConfig, InputSystem};
use crate::cube::{seeded_rng, Command, Move, MoveListener, SessionController, SessionSettings};
use crate::view::{OrbitCamera, PostEffect, RenderSnapshot};

/// 帮助面板内容
pub const HELP_TEXT: &str = "\
[ Session ]
  S        shuffle
  SPACE    auto solve
  H        toggle this help
  ESC      quit
[ Post effects ]
  1        normal
  2        invert colors
  3        vignette
  4        grayscale
[ Cube ]
  I / K    turn top / bottom layer (Y axis)
  J / L    turn left / right layer (X axis)
  U / O    turn back / front layer (Z axis)
  drag with the left mouse button to orbit";

/// 转动提示音的挂载点；没有音频后端时只记录日志
#[derive(Debug, Default)]
pub struct MoveCueLogger;

impl MoveListener for MoveCueLogger {
    fn on_move_triggered(&mut self, mv: &Move) {
        crate::app_debug!(%mv, "Move cue");
    }
}

/// 魔方应用
pub struct CubeApp<C: Clock = SystemClock, R: Rng = StdRng> {
    session: SessionController<C, R>,
    input: InputSystem,
    camera: OrbitCamera,
    post_effect: PostEffect,
    help_visible: bool,
    quit_requested: bool,
    frame_count: u64,
}

impl CubeApp<SystemClock, StdRng> {
    /// 使用系统时钟创建应用
    pub fn from_config(config: &Config) -> Self {
        Self::new(config, SystemClock::new(), seeded_rng(config.session.seed))
    }
}

impl<C: Clock, R: Rng> CubeApp<C, R> {
    pub fn new(config: &Config, clock: C, rng: R) -> Self {
        let mut session = SessionController::new(SessionSettings::from(config), clock, rng);
        session.engine_mut().add_listener(Box::new(MoveCueLogger));

        Self {
            session,
            input: InputSystem::with_config(InputConfig::from(&config.view)),
            camera: OrbitCamera::from_config(&config.view),
            post_effect: PostEffect::default(),
            help_visible: false,
            quit_requested: false,
            frame_count: 0,
        }
    }

    /// 推进一帧：应用鼠标拖动，再推进会话
    pub fn update(&mut self) -> Option<Move> {
        self.frame_count += 1;
        self.input.update_camera(&mut self.camera);
        self.session.tick()
    }

    /// 执行一个输入动作
    pub fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::Command(command) => self.submit(command),
            InputAction::ToggleHelp => {
                self.help_visible = !self.help_visible;
                crate::app_info!(visible = self.help_visible, "Help toggled");
            }
            InputAction::Quit => {
                crate::app_info!("Quit requested");
                self.quit_requested = true;
            }
            InputAction::SetPostEffect(effect) => {
                self.post_effect = effect;
                crate::app_info!(effect = effect.name(), "Post effect changed");
            }
        }
    }

    fn submit(&mut self, command: Command) {
        if !self.session.handle_command(command) {
            crate::app_debug!(
                ?command,
                state = self.session.state().name(),
                "Command rejected"
            );
        }
    }

    fn on_key(&mut self, event: &KeyboardEvent) -> bool {
        match self.input.on_keyboard_input(event) {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    /// 采集当前帧的绘制数据
    pub fn snapshot(&self, aspect: f32) -> RenderSnapshot {
        RenderSnapshot::capture(&self.session, &self.camera, aspect, self.post_effect)
    }

    pub fn status_line(&self) -> String {
        self.session.status_line()
    }

    pub fn session(&self) -> &SessionController<C, R> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionController<C, R> {
        &mut self.session
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn post_effect(&self) -> PostEffect {
        self.post_effect
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// 帮助面板可见时返回其内容
    pub fn help_text(&self) -> Option<&'static str> {
        self.help_visible.then_some(HELP_TEXT)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl<C: Clock, R: Rng> EventHandler for CubeApp<C, R> {
    fn handle_event(&mut self, event: &mut dyn Event) -> bool {
        let mut dispatcher = EventDispatcher::new(event);

        dispatcher.dispatch(EventType::KeyDown, |e| match e.as_keyboard() {
            Some(key) => self.on_key(key),
            None => false,
        });
        dispatcher.dispatch(EventType::KeyUp, |e| {
            if let Some(key) = e.as_keyboard() {
                self.input.on_keyboard_input(key);
            }
            false
        });
        dispatcher.dispatch(EventType::MouseButtonDown, |e| match e.as_mouse_button() {
            Some(button) => {
                self.input.on_mouse_button(button.button, true);
                true
            }
            None => false,
        });
        dispatcher.dispatch(EventType::MouseButtonUp, |e| match e.as_mouse_button() {
            Some(button) => {
                self.input.on_mouse_button(button.button, false);
                true
            }
            None => false,
        });
        dispatcher.dispatch(EventType::MouseMove, |e| match e.as_mouse_move() {
            Some(motion) => {
                self.input.on_mouse_move(motion.x, motion.y);
                true
            }
            None => false,
        });
        dispatcher.dispatch(EventType::Tick, |_| {
            self.update();
            true
        });

        dispatcher.is_handled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::event::{KeyCode, MouseButton, MouseButtonEvent, MouseMoveEvent, TickEvent};
    use crate::cube::SessionState;
    use rand::SeedableRng;

    fn app(clock: &ManualClock) -> CubeApp<&ManualClock, StdRng> {
        CubeApp::new(&Config::default(), clock, StdRng::seed_from_u64(3))
    }

    fn press<C: Clock, R: Rng>(app: &mut CubeApp<C, R>, key: KeyCode) -> bool {
        let handled = app.handle_event(&mut KeyboardEvent::pressed(key));
        app.handle_event(&mut KeyboardEvent::released(key));
        handled
    }

    fn tick<C: Clock, R: Rng>(app: &mut CubeApp<C, R>) {
        app.handle_event(&mut TickEvent::new(0.016, 0.0));
    }

    #[test]
    fn test_shuffle_and_solve_through_keys() {
        let clock = ManualClock::new();
        let mut app = app(&clock);

        assert!(press(&mut app, KeyCode::S));
        assert_eq!(app.session().state(), SessionState::Shuffling { remaining: 20 });
        while !app.session().is_awaiting_input() {
            tick(&mut app);
        }
        assert_eq!(app.session().state(), SessionState::Playing);
        assert!(app.status_line().starts_with("Playing | time 0.0s"));

        press(&mut app, KeyCode::Space);
        while !app.session().is_awaiting_input() {
            tick(&mut app);
        }
        assert_eq!(app.session().state(), SessionState::Idle);
        assert!(app.session().puzzle().store.is_at_home());
    }

    #[test]
    fn test_rotation_keys_move_cube() {
        let clock = ManualClock::new();
        let mut app = app(&clock);

        press(&mut app, KeyCode::I);
        // 动画进行中的第二次按键被丢弃
        press(&mut app, KeyCode::L);
        while app.session().is_animating() {
            tick(&mut app);
        }
        assert_eq!(app.session().puzzle().history.count(), 1);
        assert!(!app.session().puzzle().store.is_at_home());
        assert!(app.frame_count() > 0);
    }

    #[test]
    fn test_view_keys() {
        let clock = ManualClock::new();
        let mut app = app(&clock);

        press(&mut app, KeyCode::H);
        assert!(app.help_visible());
        assert!(app.help_text().unwrap().contains("SPACE"));
        press(&mut app, KeyCode::H);
        assert!(app.help_text().is_none());

        press(&mut app, KeyCode::Num4);
        assert_eq!(app.post_effect(), PostEffect::Grayscale);
        assert_eq!(app.snapshot(1.0).post_effect.shader_index(), 3);

        assert!(!app.quit_requested());
        press(&mut app, KeyCode::Escape);
        assert!(app.quit_requested());

        assert!(!press(&mut app, KeyCode::Other(0x7A)));
    }

    #[test]
    fn test_mouse_drag_events() {
        let clock = ManualClock::new();
        let mut app = app(&clock);

        app.handle_event(&mut MouseButtonEvent::pressed(MouseButton::Left));
        app.handle_event(&mut MouseMoveEvent::new(10.0, 10.0));
        app.handle_event(&mut MouseMoveEvent::new(30.0, 10.0));
        tick(&mut app);
        app.handle_event(&mut MouseButtonEvent::released(MouseButton::Left));

        assert_eq!(app.camera().yaw(), 55.0);
        assert_eq!(app.camera().pitch(), -30.0);
    }
}
