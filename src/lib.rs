mod problem;
pub use crate::problem::Problem;

mod registry;
pub use crate::registry::{OpId, Operation, Registry};

mod brain;
pub use crate::brain::{Brain, Evaluation, Token};

pub mod display;
pub mod keypad;
pub mod snapshot;
