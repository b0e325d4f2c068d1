//! Runtime values.
//!
//! Every value carries its tag; the accessors below are the only way to get
//! at the payload and fail with a type mismatch when the tag is wrong. There
//! is no implicit conversion between tags.

use std::fmt;

use npl_ir::{Direction, Literal, Type};
use npl_world::{EntityId, ObjectRef, TilePos};

use crate::errors::{type_mismatch, EvalError};

/// A program value.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Direction(Direction),
    Object(ObjectRef),
}

impl Value {
    pub const NULL: Value = Value::Object(ObjectRef::Null);

    /// Zero value of a declared type.
    pub const fn zero(ty: Type) -> Self {
        match ty {
            Type::Double => Value::Number(0.0),
            Type::Bool => Value::Boolean(false),
            Type::Direction => Value::Direction(Direction::None),
            Type::Object => Value::NULL,
        }
    }

    /// Runtime type tag.
    pub const fn type_of(&self) -> Type {
        match self {
            Value::Number(_) => Type::Double,
            Value::Boolean(_) => Type::Bool,
            Value::Direction(_) => Type::Direction,
            Value::Object(_) => Type::Object,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(type_mismatch(Type::Double, other.type_of())),
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Result<bool, EvalError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(type_mismatch(Type::Bool, other.type_of())),
        }
    }

    #[inline]
    pub fn as_direction(&self) -> Result<Direction, EvalError> {
        match self {
            Value::Direction(d) => Ok(*d),
            other => Err(type_mismatch(Type::Direction, other.type_of())),
        }
    }

    #[inline]
    pub fn as_object(&self) -> Result<ObjectRef, EvalError> {
        match self {
            Value::Object(o) => Ok(*o),
            other => Err(type_mismatch(Type::Object, other.type_of())),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Number(n) => Value::Number(n),
            Literal::Bool(b) => Value::Boolean(b),
            Literal::Direction(d) => Value::Direction(d),
            Literal::Null => Value::NULL,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Direction> for Value {
    fn from(d: Direction) -> Self {
        Value::Direction(d)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Value::Object(ObjectRef::Entity(id))
    }
}

impl From<TilePos> for Value {
    fn from(pos: TilePos) -> Self {
        Value::Object(ObjectRef::Tile(pos))
    }
}

/// Display form used by `print`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Direction(d) => write!(f, "{d}"),
            Value::Object(o) => write!(f, "{o}"),
        }
    }
}
