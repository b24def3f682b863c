//! 转动定义
//!
//! 一次转动（[`Move`]）是某个轴上某一层的带符号四分之一圈。
//! 轴、层、方向都用枚举/新类型表示，非法取值只能在边界处通过
//! [`Move::from_raw`] 构造，并以 [`InvalidMoveError`] 拒绝。

use std::fmt;

use crate::core::error::{InvalidMoveError, Result};
use crate::math::{matrix, utils, Matrix4, Vector3};

/// 旋转轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// 坐标分量下标
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// 轴的单位向量
    pub fn unit_vector(self) -> Vector3 {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    /// 小写符号
    pub fn symbol(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    /// 从符号解析轴（不区分大小写）
    pub fn from_symbol(c: char) -> Result<Self> {
        match c.to_ascii_lowercase() {
            'x' => Ok(Axis::X),
            'y' => Ok(Axis::Y),
            'z' => Ok(Axis::Z),
            _ => Err(InvalidMoveError::Axis(c).into()),
        }
    }

    /// 绕该轴旋转 `degrees` 度的纯旋转矩阵（绕世界原点）
    pub fn rotation(self, degrees: f32) -> Matrix4 {
        let radians = utils::deg_to_rad(degrees);
        match self {
            Axis::X => matrix::rotation_x(radians),
            Axis::Y => matrix::rotation_y(radians),
            Axis::Z => matrix::rotation_z(radians),
        }
    }
}

/// 层下标，取值 -1 / 0 / 1（以网格间距 1.0 为单位的坐标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layer(i8);

impl Layer {
    pub const NEGATIVE: Layer = Layer(-1);
    pub const MIDDLE: Layer = Layer(0);
    pub const POSITIVE: Layer = Layer(1);
    pub const ALL: [Layer; 3] = [Layer::NEGATIVE, Layer::MIDDLE, Layer::POSITIVE];

    pub fn new(value: i32) -> Result<Self> {
        match value {
            -1..=1 => Ok(Layer(value as i8)),
            _ => Err(InvalidMoveError::Layer(value).into()),
        }
    }

    pub fn value(self) -> i32 {
        self.0 as i32
    }

    /// 层所在的坐标值
    pub fn coordinate(self) -> f32 {
        self.0 as f32
    }
}

/// 转动方向（绕轴正向或负向的四分之一圈）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Positive, Direction::Negative];

    pub fn new(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Direction::Positive),
            -1 => Ok(Direction::Negative),
            _ => Err(InvalidMoveError::Direction(value).into()),
        }
    }

    /// +1.0 或 -1.0
    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// 一次四分之一圈转动
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub axis: Axis,
    pub layer: Layer,
    pub direction: Direction,
}

impl Move {
    pub fn new(axis: Axis, layer: Layer, direction: Direction) -> Self {
        Self { axis, layer, direction }
    }

    /// 从原始取值构造，超出取值范围时返回 `InvalidMove`
    ///
    /// ```
    /// use rubik_cube::cube::{Axis, Move};
    ///
    /// let mv = Move::from_raw('y', 1, -1)?;
    /// assert_eq!(mv.axis, Axis::Y);
    /// assert!(Move::from_raw('w', 0, 1).is_err());
    /// assert!(Move::from_raw('x', 2, 1).is_err());
    /// # Ok::<(), rubik_cube::core::CubeError>(())
    /// ```
    pub fn from_raw(axis: char, layer: i32, direction: i32) -> Result<Self> {
        Ok(Self {
            axis: Axis::from_symbol(axis)?,
            layer: Layer::new(layer)?,
            direction: Direction::new(direction)?,
        })
    }

    /// 撤销这次转动的逆转动
    pub fn inverse(self) -> Self {
        Self {
            direction: self.direction.inverse(),
            ..self
        }
    }

    /// 转动角度（度），正负由方向决定
    pub fn signed_degrees(self, degrees: f32) -> f32 {
        degrees * self.direction.sign()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.direction {
            Direction::Positive => '+',
            Direction::Negative => '-',
        };
        write!(f, "{}[{:+}]{}", self.axis.symbol(), self.layer.value(), sign)
    }
}
