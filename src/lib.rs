//! Rubik - 魔方状态与转动动画引擎
//!
//! 本库维护 3×3×3 魔方 27 个小方块的刚体位姿，以逐帧动画的方式执行
//! 四分之一圈转动，记录转动历史并通过倒序重放自动还原。
//! 渲染、窗口和音频都不在本库范围内，平台层只需对接 [`app::CubeApp`]。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理、时钟、事件系统、输入）
//! - `math`: 基于 nalgebra 的数学类型与矩阵辅助函数
//! - `cube`: 魔方模型（位姿存储、层选择、转动引擎、历史、会话）
//! - `view`: 环绕相机、后处理效果与渲染快照
//! - `app`: 应用外壳，事件处理入口
//!
//! # 使用示例
//!
//! ```
//! use rubik_cube::core::event::{EventHandler, KeyCode, KeyboardEvent, TickEvent};
//! use rubik_cube::core::Config;
//! use rubik_cube::app::CubeApp;
//!
//! let mut app = CubeApp::from_config(&Config::default());
//!
//! // 转动顶层
//! app.handle_event(&mut KeyboardEvent::pressed(KeyCode::I));
//! while app.session().is_animating() {
//!     app.handle_event(&mut TickEvent::new(0.016, 0.0));
//! }
//!
//! assert_eq!(app.session().puzzle().history.count(), 1);
//! ```

pub mod app;
pub mod core;
pub mod cube;
pub mod math;
pub mod view;
