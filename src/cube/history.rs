//! 转动历史
//!
//! 有容量上限的栈。打乱和手动转动时正向记录，自动还原时逐个弹出并反向重放。
//! 写满之后新的转动不再记录（返回 `HistoryFull`），这意味着超过容量的部分
//! 无法被自动还原撤销。

use crate::core::error::{CubeError, Result};

use super::moves::Move;

/// 默认历史容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 2000;

/// 转动历史
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    moves: Vec<Move>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            moves: Vec::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// 追加一次转动；已满时拒绝并返回 `HistoryFull`，历史保持不变
    pub fn push(&mut self, mv: Move) -> Result<()> {
        if self.moves.len() >= self.capacity {
            return Err(CubeError::HistoryFull { capacity: self.capacity });
        }
        self.moves.push(mv);
        Ok(())
    }

    /// 弹出最近一次转动
    pub fn pop(&mut self) -> Result<Move> {
        self.moves.pop().ok_or(CubeError::HistoryEmpty)
    }

    pub fn count(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// 从最早到最近遍历
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Move> {
        self.moves.iter()
    }
}
