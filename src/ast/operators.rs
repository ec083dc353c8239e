use std::fmt;

/// Short-circuiting boolean combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    /// Logical AND (`&&` or `and`)
    And,
    /// Logical OR (`||` or `or`)
    Or,
}

impl BoolOp {
    pub fn sign(self) -> &'static str {
        match self {
            BoolOp::And => "&&",
            BoolOp::Or => "||",
        }
    }

    /// The left operand value that decides the result on its own.
    pub(crate) fn short_circuits_on(self) -> bool {
        match self {
            BoolOp::And => false,
            BoolOp::Or => true,
        }
    }

    pub(crate) fn apply(self, left: bool, right: bool) -> bool {
        match self {
            BoolOp::And => left && right,
            BoolOp::Or => left || right,
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sign())
    }
}
