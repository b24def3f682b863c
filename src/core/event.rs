//! 事件系统模块
//!
//! 提供统一的事件处理机制：平台层（窗口、输入轮询、帧循环）把原始输入
//! 转换成这里的事件，再交给实现了 [`EventHandler`] 的对象处理。
//! 魔方核心本身只消费“按键命令”和“帧推进”两类事件，从不接触设备 API。
//!
//! # 设计原则
//!
//! - **类型安全**：事件类型使用枚举，编译期检查
//! - **可扩展性**：新的事件只需实现 [`Event`] trait
//! - **清晰的语义**：事件类型和处理逻辑一目了然
//!
//! # 使用示例
//!
//! ```
//! use rubik_cube::core::event::*;
//!
//! let mut event = KeyboardEvent::pressed(KeyCode::Space);
//! let mut dispatcher = EventDispatcher::new(&mut event);
//!
//! dispatcher.dispatch(EventType::KeyDown, |e| {
//!     println!("收到按键: {}", e.detail());
//!     true
//! });
//!
//! assert!(dispatcher.is_handled());
//! ```

use std::fmt;

/// 事件类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// 空事件，用作占位符，实际不应被分发
    None,

    /// 鼠标按下事件
    MouseButtonDown,

    /// 鼠标释放事件
    MouseButtonUp,

    /// 鼠标移动事件
    MouseMove,

    /// 键盘按下事件
    KeyDown,

    /// 键盘释放事件
    KeyUp,

    /// 时钟事件（每帧）
    ///
    /// 每帧触发一次，推进会话状态机和转动动画
    Tick,
}

impl EventType {
    /// 获取事件类型的名称，主要用于日志记录和调试
    pub fn name(&self) -> &'static str {
        match self {
            EventType::None => "None",
            EventType::MouseButtonDown => "MouseButtonDown",
            EventType::MouseButtonUp => "MouseButtonUp",
            EventType::MouseMove => "MouseMove",
            EventType::KeyDown => "KeyDown",
            EventType::KeyUp => "KeyUp",
            EventType::Tick => "Tick",
        }
    }
}

/// 鼠标按钮枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// 左键，按住拖动可环绕观察魔方
    Left,

    /// 右键
    Right,

    /// 中键
    Middle,

    /// 其他按钮（参数为按钮编号）
    Other(u8),
}

/// 键盘按键枚举
///
/// 只包含魔方操作用到的按键，其余按键使用 `Other` 变体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// 顶层转动
    I,
    /// 左层转动
    J,
    /// 底层转动
    K,
    /// 右层转动
    L,
    /// 后层转动
    U,
    /// 前层转动
    O,

    /// 打乱
    S,

    /// 帮助
    H,

    /// 自动还原
    Space,

    /// 退出
    Escape,

    /// 后处理效果切换
    Num1,
    Num2,
    Num3,
    Num4,

    /// 其他按键（平台相关的虚拟键码）
    Other(u32),
}

impl KeyCode {
    /// 从脚本记号解析按键
    ///
    /// 字母和数字按字面匹配（不区分大小写），另外支持 `SPACE` 与 `ESC`。
    ///
    /// ```
    /// use rubik_cube::core::event::KeyCode;
    ///
    /// assert_eq!(KeyCode::from_token("space"), Some(KeyCode::Space));
    /// assert_eq!(KeyCode::from_token("i"), Some(KeyCode::I));
    /// assert_eq!(KeyCode::from_token("Q"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        let key = match token.to_ascii_uppercase().as_str() {
            "I" => KeyCode::I,
            "J" => KeyCode::J,
            "K" => KeyCode::K,
            "L" => KeyCode::L,
            "U" => KeyCode::U,
            "O" => KeyCode::O,
            "S" => KeyCode::S,
            "H" => KeyCode::H,
            "SPACE" => KeyCode::Space,
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "1" => KeyCode::Num1,
            "2" => KeyCode::Num2,
            "3" => KeyCode::Num3,
            "4" => KeyCode::Num4,
            _ => return None,
        };
        Some(key)
    }
}

/// 事件 trait
///
/// 所有事件都必须实现此 trait。通过 `is_handled()` 支持事件处理链。
pub trait Event: fmt::Debug {
    /// 获取事件类型
    fn event_type(&self) -> EventType;

    /// 获取事件详细信息（用于调试和日志）
    fn detail(&self) -> String {
        format!("{:?}", self)
    }

    /// 事件是否已被处理
    fn is_handled(&self) -> bool;

    /// 设置事件处理状态
    fn set_handled(&mut self, handled: bool);

    /// 向下转型为键盘事件
    fn as_keyboard(&self) -> Option<&KeyboardEvent> {
        None
    }

    /// 向下转型为鼠标按钮事件
    fn as_mouse_button(&self) -> Option<&MouseButtonEvent> {
        None
    }

    /// 向下转型为鼠标移动事件
    fn as_mouse_move(&self) -> Option<&MouseMoveEvent> {
        None
    }

    /// 向下转型为时钟事件
    fn as_tick(&self) -> Option<&TickEvent> {
        None
    }
}

/// 鼠标按钮事件
#[derive(Debug, Clone)]
pub struct MouseButtonEvent {
    /// 鼠标按钮
    pub button: MouseButton,

    /// 是否是按下事件
    pub pressed: bool,

    /// 事件是否已处理
    handled: bool,
}

impl MouseButtonEvent {
    /// 创建鼠标按下事件
    pub fn pressed(button: MouseButton) -> Self {
        Self { button, pressed: true, handled: false }
    }

    /// 创建鼠标释放事件
    pub fn released(button: MouseButton) -> Self {
        Self { button, pressed: false, handled: false }
    }
}

impl Event for MouseButtonEvent {
    fn event_type(&self) -> EventType {
        if self.pressed {
            EventType::MouseButtonDown
        } else {
            EventType::MouseButtonUp
        }
    }

    fn detail(&self) -> String {
        format!(
            "MouseButton{}: {:?}",
            if self.pressed { "Down" } else { "Up" },
            self.button
        )
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }

    fn as_mouse_button(&self) -> Option<&MouseButtonEvent> {
        Some(self)
    }
}

/// 鼠标移动事件
///
/// 携带光标在窗口中的绝对位置（像素），位移由接收方根据上一次位置计算。
#[derive(Debug, Clone)]
pub struct MouseMoveEvent {
    /// 光标 X 坐标
    pub x: f32,

    /// 光标 Y 坐标（向下为正）
    pub y: f32,

    handled: bool,
}

impl MouseMoveEvent {
    /// 创建鼠标移动事件
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, handled: false }
    }
}

impl Event for MouseMoveEvent {
    fn event_type(&self) -> EventType {
        EventType::MouseMove
    }

    fn detail(&self) -> String {
        format!("MouseMove: ({:.1}, {:.1})", self.x, self.y)
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }

    fn as_mouse_move(&self) -> Option<&MouseMoveEvent> {
        Some(self)
    }
}

/// 键盘事件
///
/// ```
/// use rubik_cube::core::event::{KeyboardEvent, KeyCode};
///
/// let event = KeyboardEvent::pressed(KeyCode::S);
/// assert!(event.pressed);
/// assert_eq!(event.key_code, KeyCode::S);
/// ```
#[derive(Debug, Clone)]
pub struct KeyboardEvent {
    /// 按键码
    pub key_code: KeyCode,

    /// 是否是按下事件
    ///
    /// - `true`: 按键被按下（KeyDown）
    /// - `false`: 按键被释放（KeyUp）
    pub pressed: bool,

    /// 事件是否已处理
    handled: bool,
}

impl KeyboardEvent {
    /// 创建按键按下事件
    pub fn pressed(key_code: KeyCode) -> Self {
        Self {
            key_code,
            pressed: true,
            handled: false,
        }
    }

    /// 创建按键释放事件
    pub fn released(key_code: KeyCode) -> Self {
        Self {
            key_code,
            pressed: false,
            handled: false,
        }
    }
}

impl Event for KeyboardEvent {
    fn event_type(&self) -> EventType {
        if self.pressed {
            EventType::KeyDown
        } else {
            EventType::KeyUp
        }
    }

    fn detail(&self) -> String {
        format!(
            "Key{}: {:?}",
            if self.pressed { "Down" } else { "Up" },
            self.key_code
        )
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }

    fn as_keyboard(&self) -> Option<&KeyboardEvent> {
        Some(self)
    }
}

/// 时钟事件（每帧）
///
/// 魔方动画以“每帧转动的角度”推进，与帧间隔无关；
/// `delta_time` 和 `total_time` 仅供日志与统计使用。
#[derive(Debug, Clone)]
pub struct TickEvent {
    /// 帧间隔时间（秒）
    pub delta_time: f32,

    /// 总运行时间（秒）
    pub total_time: f32,

    /// 事件是否已处理
    handled: bool,
}

impl TickEvent {
    /// 创建新的时钟事件
    pub fn new(delta_time: f32, total_time: f32) -> Self {
        Self {
            delta_time,
            total_time,
            handled: false,
        }
    }
}

impl Event for TickEvent {
    fn event_type(&self) -> EventType {
        EventType::Tick
    }

    fn detail(&self) -> String {
        format!(
            "Tick: dt={:.3}s, total={:.2}s",
            self.delta_time, self.total_time
        )
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }

    fn as_tick(&self) -> Option<&TickEvent> {
        Some(self)
    }
}

/// 事件分发器
///
/// 持有事件的可变引用，事件类型匹配时调用处理函数，
/// 并根据处理函数的返回值设置事件的处理状态。
pub struct EventDispatcher<'a> {
    event: &'a mut dyn Event,
}

impl<'a> EventDispatcher<'a> {
    /// 创建新的事件分发器
    pub fn new(event: &'a mut dyn Event) -> Self {
        Self { event }
    }

    /// 分发事件到处理函数
    ///
    /// # 返回值
    ///
    /// - `true`: 事件类型匹配且处理函数返回 true
    /// - `false`: 事件类型不匹配或处理函数返回 false
    pub fn dispatch<F>(&mut self, event_type: EventType, mut handler: F) -> bool
    where
        F: FnMut(&mut dyn Event) -> bool,
    {
        // 类型检查：只有当事件类型匹配时才调用处理函数
        if self.event.event_type() == event_type {
            let handled = handler(self.event);
            self.event.set_handled(handled);
            handled
        } else {
            false
        }
    }

    /// 获取事件是否已被处理
    pub fn is_handled(&self) -> bool {
        self.event.is_handled()
    }
}

/// 事件处理器 trait
///
/// 平台层把每个事件交给处理器；返回 `true` 表示事件已被处理，不再继续传递。
pub trait EventHandler {
    /// 处理事件
    fn handle_event(&mut self, event: &mut dyn Event) -> bool;
}
