//! 层选择
//!
//! 转动若干次之后，小方块的位置已经与创建时的网格下标无关，
//! 所以层成员关系每次都根据 **当前** 位姿的世界坐标重新计算，
//! 并用容差而不是精确相等来比较。

use super::moves::{Axis, Layer};
use crate::math::Vector3;

/// 层成员判定容差（网格间距为 1.0）
///
/// 必须小于半个网格间距，才不会把相邻层的小方块误判进来。
pub const LAYER_EPSILON: f32 = 0.1;

/// 某个轴上某一层的成员判定谓词
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSelector {
    axis: Axis,
    layer: Layer,
}

/// 选出 `axis` 轴上第 `layer` 层
pub fn select_layer(axis: Axis, layer: Layer) -> LayerSelector {
    LayerSelector { axis, layer }
}

impl LayerSelector {
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// 世界坐标为 `position` 的小方块是否属于这一层
    pub fn contains(&self, position: &Vector3) -> bool {
        (position[self.axis.index()] - self.layer.coordinate()).abs() < LAYER_EPSILON
    }

    /// 以闭包形式返回谓词，供 [`TransformStore::bake_rotation`](super::TransformStore::bake_rotation) 使用
    pub fn predicate(self) -> impl Fn(&Vector3) -> bool {
        move |position: &Vector3| self.contains(position)
    }
}
