//! 配置管理模块
//!
//! 提供引擎配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (cube.toml)
//!
//! ```toml
//! [animation]
//! normal_speed = 9.0    # 每帧转动的角度
//! fast_speed = 20.0     # 打乱和自动还原时的速度
//!
//! [session]
//! shuffle_moves = 20
//! history_capacity = 2000
//! seed = 42             # 可选，固定打乱序列
//!
//! [view]
//! yaw = 45.0
//! pitch = -30.0
//! distance = 8.0
//! fov = 45.0
//! mouse_sensitivity = 0.5
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::cube::Palette;

/// 引擎配置
///
/// 可以从配置文件加载，也可以通过代码构建。
/// 所有字段都有默认值，配置文件中缺失的段落会使用默认值填充。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 动画配置
    #[serde(default)]
    pub animation: AnimationConfig,

    /// 会话配置
    #[serde(default)]
    pub session: SessionConfig,

    /// 视图配置
    #[serde(default)]
    pub view: ViewConfig,

    /// 贴纸配色
    #[serde(default)]
    pub palette: Palette,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 动画配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// 手动游玩时每帧转动的角度（度）
    #[serde(default = "default_normal_speed")]
    pub normal_speed: f32,

    /// 打乱与自动还原时每帧转动的角度（度）
    #[serde(default = "default_fast_speed")]
    pub fast_speed: f32,
}

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 一次打乱生成的随机转动数
    #[serde(default = "default_shuffle_moves")]
    pub shuffle_moves: u32,

    /// 历史记录容量，超出后新的转动不再记录
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// 随机种子；缺省时从系统熵源获取
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// 视图配置（环绕相机）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// 初始偏航角（度）
    #[serde(default = "default_yaw")]
    pub yaw: f32,

    /// 初始俯仰角（度）
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// 相机到魔方中心的距离
    #[serde(default = "default_distance")]
    pub distance: f32,

    /// 垂直视场角（度）
    #[serde(default = "default_fov")]
    pub fov: f32,

    /// 鼠标灵敏度（度/像素）
    #[serde(default = "default_mouse_sensitivity")]
    pub mouse_sensitivity: f32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_normal_speed() -> f32 {
    9.0
}

fn default_fast_speed() -> f32 {
    20.0
}

fn default_shuffle_moves() -> u32 {
    20
}

fn default_history_capacity() -> usize {
    2000
}

fn default_yaw() -> f32 {
    45.0
}

fn default_pitch() -> f32 {
    -30.0
}

fn default_distance() -> f32 {
    8.0
}

fn default_fov() -> f32 {
    45.0
}

fn default_mouse_sensitivity() -> f32 {
    0.5
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_file_output() -> bool {
    false
}

fn default_log_file() -> String {
    "rubik.log".to_string()
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            normal_speed: default_normal_speed(),
            fast_speed: default_fast_speed(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            shuffle_moves: default_shuffle_moves(),
            history_capacity: default_history_capacity(),
            seed: None,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            yaw: default_yaw(),
            pitch: default_pitch(),
            distance: default_distance(),
            fov: default_fov(),
            mouse_sensitivity: default_mouse_sensitivity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use rubik_cube::core::Config;
    ///
    /// let config = Config::from_file("cube.toml")?;
    /// # Ok::<(), rubik_cube::core::CubeError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--shuffle-moves <n>`: 打乱步数
    /// - `--history-capacity <n>`: 历史记录容量
    /// - `--seed <n>`: 固定随机种子
    /// - `--speed <deg>`: 手动转动速度
    /// - `--fast-speed <deg>`: 打乱/还原速度
    ///
    /// 无法解析的值会被忽略，保留原配置。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(n) = arg_value(&args, "--shuffle-moves") {
            self.session.shuffle_moves = n;
        }
        if let Some(n) = arg_value(&args, "--history-capacity") {
            self.session.history_capacity = n;
        }
        if let Some(seed) = arg_value(&args, "--seed") {
            self.session.seed = Some(seed);
        }
        if let Some(speed) = arg_value(&args, "--speed") {
            self.animation.normal_speed = speed;
        }
        if let Some(speed) = arg_value(&args, "--fast-speed") {
            self.animation.fast_speed = speed;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        for (field, speed) in [
            ("animation.normal_speed", self.animation.normal_speed),
            ("animation.fast_speed", self.animation.fast_speed),
        ] {
            if !(speed > 0.0 && speed <= 90.0) {
                return Err(invalid(field, "Speed must be in (0, 90] degrees per tick"));
            }
        }

        if self.session.history_capacity == 0 {
            return Err(invalid(
                "session.history_capacity",
                "History capacity must be greater than 0",
            ));
        }

        if !(self.view.distance > 0.0) {
            return Err(invalid("view.distance", "Camera distance must be positive"));
        }

        if !(self.view.fov > 0.0 && self.view.fov < 180.0) {
            return Err(invalid("view.fov", "Field of view must be in (0, 180) degrees"));
        }

        Ok(())
    }
}

/// 查找 `name` 之后的参数并解析
///
/// 参数缺失或无法解析时返回 `None`。
pub fn arg_value<T: std::str::FromStr>(args: &[String], name: &str) -> Option<T> {
    let idx = args.iter().position(|a| a == name)?;
    args.get(idx + 1)?.parse().ok()
}

fn invalid(field: &str, reason: &str) -> super::error::CubeError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.animation.normal_speed, 9.0);
        assert_eq!(config.animation.fast_speed, 20.0);
        assert_eq!(config.session.shuffle_moves, 20);
        assert_eq!(config.session.history_capacity, 2000);
        assert_eq!(config.session.seed, None);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.animation.fast_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.history_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [session]
            shuffle_moves = 5
            seed = 7

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.session.shuffle_moves, 5);
        assert_eq!(config.session.seed, Some(7));
        assert_eq!(config.session.history_capacity, 2000);
        assert_eq!(config.animation.normal_speed, 9.0);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml_str("[session]\nshuffle_moves = \"many\"").is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args([
            "rubik_cube",
            "--shuffle-moves",
            "3",
            "--seed",
            "11",
            "--speed",
            "nope",
        ]);

        assert_eq!(config.session.shuffle_moves, 3);
        assert_eq!(config.session.seed, Some(11));
        assert_eq!(config.animation.normal_speed, 9.0);
    }
}
