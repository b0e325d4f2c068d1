//! Error codes for all program diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the phase:
//! - E2xxx: Well-formedness and type errors (static check)
//! - E6xxx: Runtime / eval errors

use std::fmt;

/// Error codes for all program diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Static check errors (E2xxx)
    /// `break` outside of a `while` or `foreach`
    E2001,
    /// Action statement inside a `foreach` body
    E2002,
    /// Use of an undeclared variable
    E2003,
    /// Operand has the wrong type for its operator
    E2004,
    /// Assigned value does not match the variable's declared type
    E2005,
    /// Condition or filter is not boolean
    E2006,
    /// `wait` duration is not a numeric constant
    E2007,
    /// `foreach` variable is not declared as an object
    E2008,
    /// Variable declared more than once
    E2009,

    // Runtime errors (E6xxx)
    /// Value has the wrong type for an operator or query
    E6001,
    /// Read or write of an undeclared variable
    E6002,
    /// Argument outside an operator's domain
    E6003,
    /// Tile query outside the world
    E6004,
    /// Statement stepped after completion
    E6005,
    /// Program queried its entity before being bound
    E6006,
}

impl ErrorCode {
    /// All error codes, in numeric order.
    pub const ALL: [ErrorCode; 15] = [
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
        }
    }

    /// Whether this code is reported by the static check.
    pub fn is_static(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Whether this code is reported at runtime.
    pub fn is_runtime(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
