//! Unary and binary operator tags.
//!
//! World queries (`gettile`, `searchobject`, `getx`, ...) are operators too:
//! they take typed operands and produce a typed result like `+` does, so the
//! checker and evaluator treat them uniformly.

use crate::Type;

/// Kind of game entity, used by `is<kind>` tests and `foreach` filters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    Mazub,
    Buzam,
    Slime,
    Shark,
    Plant,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Mazub,
        EntityKind::Buzam,
        EntityKind::Slime,
        EntityKind::Shark,
        EntityKind::Plant,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Mazub => "mazub",
            EntityKind::Buzam => "buzam",
            EntityKind::Slime => "slime",
            EntityKind::Shark => "shark",
            EntityKind::Plant => "plant",
        }
    }

    /// Kinds with a jump state (`isjumping` is defined for them).
    pub const fn can_jump(self) -> bool {
        matches!(self, EntityKind::Mazub | EntityKind::Buzam | EntityKind::Shark)
    }

    /// Kinds with a duck state (`isducking` is defined for them).
    pub const fn can_duck(self) -> bool {
        matches!(self, EntityKind::Mazub | EntityKind::Buzam)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    // Arithmetic / logical
    Neg,
    Not,
    Sqrt,
    Random,

    // Object geometry and state
    GetX,
    GetY,
    GetWidth,
    GetHeight,
    GetHp,
    IsDead,
    IsJumping,
    IsDucking,

    // Dynamic tag tests
    IsKind(EntityKind),
    IsTerrain,
    IsPassable,
    IsAir,
    IsWater,
    IsMagma,

    // World search
    SearchObject,
}

impl UnaryOp {
    /// Returns the source-level spelling of this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
            Self::Sqrt => "sqrt",
            Self::Random => "random",
            Self::GetX => "getx",
            Self::GetY => "gety",
            Self::GetWidth => "getwidth",
            Self::GetHeight => "getheight",
            Self::GetHp => "gethp",
            Self::IsDead => "isdead",
            Self::IsJumping => "isjumping",
            Self::IsDucking => "isducking",
            Self::IsKind(EntityKind::Mazub) => "ismazub",
            Self::IsKind(EntityKind::Buzam) => "isbuzam",
            Self::IsKind(EntityKind::Slime) => "isslime",
            Self::IsKind(EntityKind::Shark) => "isshark",
            Self::IsKind(EntityKind::Plant) => "isplant",
            Self::IsTerrain => "isterrain",
            Self::IsPassable => "ispassable",
            Self::IsAir => "isair",
            Self::IsWater => "iswater",
            Self::IsMagma => "ismagma",
            Self::SearchObject => "searchobj",
        }
    }

    /// Looks up an operator by its source-level spelling.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "-" => Self::Neg,
            "!" => Self::Not,
            "sqrt" => Self::Sqrt,
            "random" => Self::Random,
            "getx" => Self::GetX,
            "gety" => Self::GetY,
            "getwidth" => Self::GetWidth,
            "getheight" => Self::GetHeight,
            "gethp" => Self::GetHp,
            "isdead" => Self::IsDead,
            "isjumping" => Self::IsJumping,
            "isducking" => Self::IsDucking,
            "isterrain" => Self::IsTerrain,
            "ispassable" => Self::IsPassable,
            "isair" => Self::IsAir,
            "iswater" => Self::IsWater,
            "ismagma" => Self::IsMagma,
            "searchobj" => Self::SearchObject,
            _ => {
                let kind = symbol.strip_prefix("is")?;
                return EntityKind::ALL
                    .into_iter()
                    .find(|k| k.as_str() == kind)
                    .map(Self::IsKind);
            }
        };
        Some(op)
    }

    /// Operand type the operator requires.
    pub const fn operand_type(self) -> Type {
        match self {
            Self::Neg | Self::Sqrt | Self::Random => Type::Double,
            Self::Not => Type::Bool,
            Self::SearchObject => Type::Direction,
            Self::GetX
            | Self::GetY
            | Self::GetWidth
            | Self::GetHeight
            | Self::GetHp
            | Self::IsDead
            | Self::IsJumping
            | Self::IsDucking
            | Self::IsKind(_)
            | Self::IsTerrain
            | Self::IsPassable
            | Self::IsAir
            | Self::IsWater
            | Self::IsMagma => Type::Object,
        }
    }

    /// Type of the value the operator produces.
    pub const fn result_type(self) -> Type {
        match self {
            Self::Neg
            | Self::Sqrt
            | Self::Random
            | Self::GetX
            | Self::GetY
            | Self::GetWidth
            | Self::GetHeight
            | Self::GetHp => Type::Double,
            Self::Not
            | Self::IsDead
            | Self::IsJumping
            | Self::IsDucking
            | Self::IsKind(_)
            | Self::IsTerrain
            | Self::IsPassable
            | Self::IsAir
            | Self::IsWater
            | Self::IsMagma => Type::Bool,
            Self::SearchObject => Type::Object,
        }
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,

    // Logical (short-circuit)
    And,
    Or,

    // World queries
    GetTile,
    IsMoving,
}

impl BinaryOp {
    /// Returns the source-level spelling of this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "&&",
            Self::Or => "||",
            Self::GetTile => "gettile",
            Self::IsMoving => "ismoving",
        }
    }

    /// Looks up an operator by its source-level spelling.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            "&&" => Self::And,
            "||" => Self::Or,
            "gettile" => Self::GetTile,
            "ismoving" => Self::IsMoving,
            _ => return None,
        };
        Some(op)
    }

    /// Operand types the operator requires, or `None` when any pair is
    /// accepted (equality is defined across the whole value union).
    pub const fn operand_types(self) -> Option<(Type, Type)> {
        match self {
            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::GetTile => Some((Type::Double, Type::Double)),
            Self::And | Self::Or => Some((Type::Bool, Type::Bool)),
            Self::IsMoving => Some((Type::Object, Type::Direction)),
            Self::Eq | Self::NotEq => None,
        }
    }

    /// Type of the value the operator produces.
    pub const fn result_type(self) -> Type {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div => Type::Double,
            Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::Eq
            | Self::NotEq
            | Self::And
            | Self::Or
            | Self::IsMoving => Type::Bool,
            Self::GetTile => Type::Object,
        }
    }
}
