//! 魔方状态聚合
//!
//! 位姿存储与转动历史总是一起被修改，这里把它们放在同一个显式持有的结构里，
//! 由会话控制器独占，再以引用传给转动引擎和渲染快照。

use super::cubie::Palette;
use super::history::History;
use super::store::TransformStore;

#[derive(Debug, Clone, Default)]
pub struct PuzzleState {
    pub store: TransformStore,
    pub history: History,
}

impl PuzzleState {
    pub fn new(palette: &Palette, history_capacity: usize) -> Self {
        Self {
            store: TransformStore::new(palette),
            history: History::with_capacity(history_capacity),
        }
    }

    /// 会话意义上的“已还原”：没有任何待撤销的转动
    pub fn is_solved(&self) -> bool {
        self.history.is_empty()
    }
}
