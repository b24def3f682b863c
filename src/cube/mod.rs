//! 魔方模型
//!
//! - `cubie` / `store`：27 个小方块的位姿与配色
//! - `layer`：按世界坐标选择转动层
//! - `moves`：转动的类型化表示
//! - `engine`：单次转动的动画与烘焙
//! - `history`：有界的转动历史
//! - `session`：打乱、游玩、自动还原的顶层状态机

pub mod cubie;
pub mod engine;
pub mod history;
pub mod layer;
pub mod moves;
pub mod puzzle;
pub mod session;
pub mod store;

pub use cubie::{Face, Palette, SubCube};
pub use engine::{AnimationState, MoveEngine, MoveListener, MoveRequest, QUARTER_TURN_DEGREES};
pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use layer::{select_layer, LayerSelector, LAYER_EPSILON};
pub use moves::{Axis, Direction, Layer, Move};
pub use puzzle::PuzzleState;
pub use session::{seeded_rng, Command, SessionController, SessionSettings, SessionState};
pub use store::{TransformStore, CUBIE_COUNT, GRID_SIZE};
