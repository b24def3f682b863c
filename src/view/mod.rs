//! 视图状态
//!
//! 与图形 API 无关的显示侧状态：环绕相机、后处理效果选择，以及每帧交给
//! 渲染器的只读快照。

pub mod camera;
pub mod snapshot;

pub use camera::OrbitCamera;
pub use snapshot::{CubieDraw, PostEffect, RenderSnapshot, CUBIE_SCALE};
