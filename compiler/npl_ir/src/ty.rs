//! The language's type vocabulary: declared types, directions and literals.

use std::fmt;

/// Declared type of a variable or static type of an expression.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Type {
    Double,
    Bool,
    Direction,
    Object,
}

impl Type {
    /// Source-level name of the type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Type::Double => "double",
            Type::Bool => "bool",
            Type::Direction => "direction",
            Type::Object => "object",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compass direction used by movement actions and world searches.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::None => "none",
        }
    }

    /// Whether the direction lies on the horizontal axis.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constant appearing in the program tree.
///
/// Integer literals from the source are widened to `Number` by the parser.
/// There is no object literal other than `null`; objects enter a program
/// through `self` and the world queries.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Literal {
    Number(f64),
    Bool(bool),
    Direction(Direction),
    Null,
}

impl Literal {
    /// Static type of this literal.
    pub const fn ty(self) -> Type {
        match self {
            Literal::Number(_) => Type::Double,
            Literal::Bool(_) => Type::Bool,
            Literal::Direction(_) => Type::Direction,
            Literal::Null => Type::Object,
        }
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<Direction> for Literal {
    fn from(d: Direction) -> Self {
        Literal::Direction(d)
    }
}
