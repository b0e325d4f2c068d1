//! Expression node kinds.

use crate::{BinaryOp, ExprId, Literal, Name, UnaryOp};

/// Expression node.
///
/// Children are referenced by `ExprId`; the node itself is immutable and
/// evaluation never suspends inside an expression.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// Literal constant.
    Constant(Literal),
    /// Read of a declared variable.
    Variable(Name),
    /// The entity the program is bound to.
    SelfRef,
    /// Unary operator or single-operand world query.
    Unary { op: UnaryOp, operand: ExprId },
    /// Binary operator or two-operand world query.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
}

impl ExprKind {
    /// Whether this node is a literal constant.
    pub const fn is_constant(&self) -> bool {
        matches!(self, ExprKind::Constant(_))
    }
}
