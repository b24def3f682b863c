//! 输入系统
//!
//! 把键盘和鼠标事件翻译成会话命令与视图操作：
//! 按键映射到 [`InputAction`]，按住左键拖动时累积光标位移，
//! 每帧由 [`InputSystem::update_camera`] 应用到环绕相机。

use std::collections::HashSet;
use tracing::debug;

use super::config::ViewConfig;
use super::event::{KeyCode, KeyboardEvent, MouseButton};
use crate::cube::{Axis, Command, Direction, Layer, Move};
use crate::view::{OrbitCamera, PostEffect};

/// Configuration for InputSystem behavior
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Mouse sensitivity in degrees per pixel
    pub mouse_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.5,
        }
    }
}

impl From<&ViewConfig> for InputConfig {
    fn from(config: &ViewConfig) -> Self {
        Self {
            mouse_sensitivity: config.mouse_sensitivity,
        }
    }
}

/// 按键触发的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// 交给会话控制器的命令
    Command(Command),
    /// 切换帮助面板
    ToggleHelp,
    /// 退出
    Quit,
    /// 切换后处理效果
    SetPostEffect(PostEffect),
}

/// 按键绑定
pub fn key_action(key: KeyCode) -> Option<InputAction> {
    let rotate = |axis, layer, direction| {
        InputAction::Command(Command::Rotate(Move::new(axis, layer, direction)))
    };

    let action = match key {
        KeyCode::I => rotate(Axis::Y, Layer::POSITIVE, Direction::Negative),
        KeyCode::K => rotate(Axis::Y, Layer::NEGATIVE, Direction::Positive),
        KeyCode::J => rotate(Axis::X, Layer::NEGATIVE, Direction::Positive),
        KeyCode::L => rotate(Axis::X, Layer::POSITIVE, Direction::Negative),
        KeyCode::U => rotate(Axis::Z, Layer::POSITIVE, Direction::Negative),
        KeyCode::O => rotate(Axis::Z, Layer::NEGATIVE, Direction::Positive),
        KeyCode::S => InputAction::Command(Command::Shuffle),
        KeyCode::Space => InputAction::Command(Command::Solve),
        KeyCode::H => InputAction::ToggleHelp,
        KeyCode::Escape => InputAction::Quit,
        KeyCode::Num1 => InputAction::SetPostEffect(PostEffect::Normal),
        KeyCode::Num2 => InputAction::SetPostEffect(PostEffect::Invert),
        KeyCode::Num3 => InputAction::SetPostEffect(PostEffect::Vignette),
        KeyCode::Num4 => InputAction::SetPostEffect(PostEffect::Grayscale),
        KeyCode::Other(_) => return None,
    };
    Some(action)
}

/// InputSystem manages keyboard and mouse input state
pub struct InputSystem {
    // Keyboard state
    pressed_keys: HashSet<KeyCode>,

    // Mouse state
    last_mouse_pos: (f32, f32),
    mouse_buttons: HashSet<MouseButton>,
    mouse_delta: (f32, f32),

    mouse_sensitivity: f32, // Degrees per pixel

    // First mouse movement flag
    first_mouse: bool,
}

impl InputSystem {
    /// Create a new InputSystem with default configuration
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    /// Create InputSystem with custom configuration
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            last_mouse_pos: (0.0, 0.0),
            mouse_buttons: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            mouse_sensitivity: config.mouse_sensitivity,
            first_mouse: true,
        }
    }

    /// 处理键盘事件
    ///
    /// 只有按下事件产生动作；按住不放的重复按下不会再次触发。
    pub fn on_keyboard_input(&mut self, event: &KeyboardEvent) -> Option<InputAction> {
        if !event.pressed {
            self.pressed_keys.remove(&event.key_code);
            return None;
        }
        if !self.pressed_keys.insert(event.key_code) {
            return None;
        }

        let action = key_action(event.key_code);
        debug!(key = ?event.key_code, ?action, "Key pressed");
        action
    }

    /// 处理鼠标按钮事件
    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }

        // 每次按下或松开左键后，下一次移动只记录光标位置
        if button == MouseButton::Left {
            self.first_mouse = true;
        }
    }

    /// 处理鼠标移动事件
    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        if !self.mouse_buttons.contains(&MouseButton::Left) {
            return;
        }

        if self.first_mouse {
            self.last_mouse_pos = (x, y);
            self.first_mouse = false;
            return;
        }

        self.mouse_delta.0 += x - self.last_mouse_pos.0;
        self.mouse_delta.1 += y - self.last_mouse_pos.1;
        self.last_mouse_pos = (x, y);
    }

    /// 把本帧累积的拖动应用到相机
    ///
    /// 向右拖动增加偏航角，向上拖动（窗口 y 减小）增加俯仰角。
    pub fn update_camera(&mut self, camera: &mut OrbitCamera) {
        let (dx, dy) = self.mouse_delta;
        self.mouse_delta = (0.0, 0.0);

        // Skip if no movement
        if dx.abs() < 0.001 && dy.abs() < 0.001 {
            return;
        }

        camera.orbit(dx * self.mouse_sensitivity, -dy * self.mouse_sensitivity);
    }

    /// Reset mouse state (useful when window loses focus)
    pub fn reset_mouse(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.mouse_buttons.clear();
        self.first_mouse = true;
    }

    /// Check if a specific key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Check if a specific mouse button is currently pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Get the current mouse sensitivity
    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}
