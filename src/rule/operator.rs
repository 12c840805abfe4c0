//! Arithmetic operators a rule may use.

use std::fmt;

use crate::types::{DataType, Value};

/// Binary operator of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
}

impl Operator {
    /// Every operator, in the order their symbols are checked.
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    /// The character this operator is written as.
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
        }
    }

    /// Returns the operator written as `c`, if any.
    pub fn from_symbol(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == c)
    }

    /// Apply the operator to one pair of cells.
    ///
    /// - `Int64` with `Int64` stays `Int64` and wraps on overflow.
    /// - Any other numeric pair is computed as `Float64`.
    /// - `Null`, `Bool` and `Utf8` operands yield `Null`.
    pub fn apply(self, left: &Value, right: &Value) -> Value {
        match (left, right) {
            (Value::Int64(a), Value::Int64(b)) => Value::Int64(self.apply_i64(*a, *b)),
            (Value::Null, _) | (_, Value::Null) => Value::Null,
            _ => match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => Value::Float64(self.apply_f64(a, b)),
                _ => Value::Null,
            },
        }
    }

    /// Type of the column produced by combining columns of type `left` and `right`.
    pub fn result_type(self, left: DataType, right: DataType) -> DataType {
        match (left, right) {
            (DataType::Int64, DataType::Int64) => DataType::Int64,
            _ => DataType::Float64,
        }
    }

    fn apply_i64(self, a: i64, b: i64) -> i64 {
        match self {
            Operator::Add => a.wrapping_add(b),
            Operator::Subtract => a.wrapping_sub(b),
            Operator::Multiply => a.wrapping_mul(b),
        }
    }

    fn apply_f64(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
