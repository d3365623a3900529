//! The fixed instruction set of the expression graph.

/// Operand count of an [`Opcode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One operand (stored in the lhs slot).
    Unary,
    /// Two operands.
    Binary,
}

/// An arithmetic or geometric operation over scalar operands.
///
/// The set is fixed and small: ordinary arithmetic, `Min`/`Max` for CSG
/// union/intersection of signed fields, and the unary helpers primitives are
/// built from. `Square` is a distinct opcode rather than `Mul(v, v)` because
/// interval evaluation has a strictly tighter sign-aware rule for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `lhs + rhs`
    Add,
    /// `lhs - rhs`
    Sub,
    /// `lhs * rhs`
    Mul,
    /// `lhs / rhs`
    Div,
    /// `min(lhs, rhs)` - CSG union of signed fields.
    Min,
    /// `max(lhs, rhs)` - CSG intersection of signed fields.
    Max,
    /// `-lhs`
    Neg,
    /// `|lhs|`
    Abs,
    /// `sqrt(lhs)`
    Sqrt,
    /// `lhs * lhs`
    Square,
}

impl Opcode {
    /// How many operands the opcode consumes.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Min | Self::Max => Arity::Binary,
            Self::Neg | Self::Abs | Self::Sqrt | Self::Square => Arity::Unary,
        }
    }

    /// Applies the opcode to scalar operands.
    ///
    /// This is the single folding rule shared by constant folding in the
    /// graph and point evaluation in evaluators; the two can never disagree.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` presence does not match the opcode's arity.
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: Option<f64>) -> f64 {
        match (self, rhs) {
            (Self::Add, Some(r)) => lhs + r,
            (Self::Sub, Some(r)) => lhs - r,
            (Self::Mul, Some(r)) => lhs * r,
            (Self::Div, Some(r)) => lhs / r,
            (Self::Min, Some(r)) => lhs.min(r),
            (Self::Max, Some(r)) => lhs.max(r),
            (Self::Neg, None) => -lhs,
            (Self::Abs, None) => lhs.abs(),
            (Self::Sqrt, None) => lhs.sqrt(),
            (Self::Square, None) => lhs * lhs,
            (op, rhs) => panic!("opcode {op:?} applied with mismatched arity (rhs: {rhs:?})"),
        }
    }
}
