//! 核心功能模块
//!
//! 本模块提供魔方引擎的基础设施，包括日志系统、配置管理、错误处理、
//! 时钟抽象和事件系统。这些模块与具体的窗口或图形 API 解耦。
//!
//! # 模块组织
//!
//! - `log`：日志系统，基于 tracing 的结构化日志
//! - `config`：配置管理，支持从 TOML 文件加载
//! - `error`：错误处理，定义统一的错误类型
//! - `clock`：单调时钟，供会话计时使用
//! - `event`：事件系统，键盘/鼠标/帧事件与分发器
//! - `input`：输入系统，按键绑定与鼠标拖动环绕

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod log;

// 重新导出常用类型，方便使用
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{ConfigError, CubeError, InvalidMoveError, Result};
pub use input::{InputAction, InputConfig, InputSystem};
pub use event::{
    Event, EventDispatcher, EventHandler, EventType, KeyCode, KeyboardEvent, MouseButton,
    MouseButtonEvent, MouseMoveEvent, TickEvent,
};
