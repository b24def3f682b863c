//! 错误处理模块
//!
//! 定义了魔方引擎中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//!
//! 引擎本身是纯内存、确定性的，不存在可重试的 IO 类失败；
//! 历史记录满、非法转动等都在边界处以 `Result` 的形式报告。

use std::fmt;

/// 引擎统一的 Result 类型
pub type Result<T> = std::result::Result<T, CubeError>;

/// 魔方引擎的错误类型
#[derive(Debug)]
pub enum CubeError {
    /// 配置错误
    Config(ConfigError),

    /// 非法转动（轴、层或方向不在取值范围内）
    InvalidMove(InvalidMoveError),

    /// 从空的历史记录中弹出
    ///
    /// 会话控制器在弹出前总是先检查 `count() > 0`，
    /// 因此出现这个错误意味着内部不变量被破坏。
    HistoryEmpty,

    /// 历史记录已满，新的转动未被记录
    HistoryFull { capacity: usize },

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 非法转动的具体原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMoveError {
    /// 轴不是 x / y / z
    Axis(char),

    /// 层不是 -1 / 0 / 1
    Layer(i32),

    /// 方向不是 +1 / -1
    Direction(i32),
}

impl fmt::Display for CubeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubeError::Config(e) => write!(f, "Configuration error: {}", e),
            CubeError::InvalidMove(e) => write!(f, "Invalid move: {}", e),
            CubeError::HistoryEmpty => write!(f, "Move history is empty"),
            CubeError::HistoryFull { capacity } => {
                write!(f, "Move history is full ({} moves)", capacity)
            }
            CubeError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for InvalidMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveError::Axis(c) => write!(f, "axis '{}' is not one of x, y, z", c),
            InvalidMoveError::Layer(l) => write!(f, "layer {} is not one of -1, 0, 1", l),
            InvalidMoveError::Direction(d) => write!(f, "direction {} is not +1 or -1", d),
        }
    }
}

impl std::error::Error for CubeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CubeError::Config(e) => Some(e),
            CubeError::InvalidMove(e) => Some(e),
            CubeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for InvalidMoveError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for CubeError {
    fn from(err: std::io::Error) -> Self {
        CubeError::Io(err)
    }
}

impl From<ConfigError> for CubeError {
    fn from(err: ConfigError) -> Self {
        CubeError::Config(err)
    }
}

impl From<InvalidMoveError> for CubeError {
    fn from(err: InvalidMoveError) -> Self {
        CubeError::InvalidMove(err)
    }
}
