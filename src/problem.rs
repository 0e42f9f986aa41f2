// We need to refer to these types in the documentation
#[allow(unused_imports)]
use crate::{Brain, Registry};

/// Problems reported by the calculator brain or while converting text to numbers
///
/// Most evaluation paths never fail: an expression that can't be evaluated yet is
/// simply [`Incomplete`](crate::Evaluation::Incomplete), and arithmetic faults such
/// as division by zero flow through as infinity or NaN.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Problem {
    /// The symbol passed to [`Brain::try_perform_operation`] is not in the [`Registry`]
    #[error("unknown operator {0:?}")]
    UnknownOperator(String),
    /// The operator was not pushed because too few operands precede it
    #[error("not enough operands for {0:?}")]
    InsufficientParameters(String),
    /// The text is not a decimal number
    #[error("{0:?} is not a number")]
    BadNumber(String),
}
