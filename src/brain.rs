use crate::display::{is_name, parse_number};
use crate::{OpId, Operation, Problem, Registry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

mod describe;

/// One item pushed onto the [`Brain`]'s stack
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A literal number
    Operand(f64),
    /// A variable, looked up only when the stack is evaluated
    Variable(String),
    /// An operation defined in the brain's [`Registry`]
    Operation(OpId),
}

/// The outcome of evaluating the stack
///
/// Arithmetic faults are not Incomplete, they're a Complete infinity or NaN.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Evaluation {
    Complete(f64),
    /// The stack is empty, an operator lacks operands, or a variable has no value
    Incomplete,
}

impl Evaluation {
    pub const fn value(self) -> Option<f64> {
        match self {
            Evaluation::Complete(value) => Some(value),
            Evaluation::Incomplete => None,
        }
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self, Evaluation::Complete(_))
    }
}

impl From<Option<f64>> for Evaluation {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(value) => Evaluation::Complete(value),
            None => Evaluation::Incomplete,
        }
    }
}

type Variables = HashMap<String, f64>;

/// A reverse-Polish calculator brain
///
/// Operands, variables and operations are pushed one at a time, operators after
/// the operands they consume. Every push re-evaluates the whole stack.
///
/// # Examples
///
/// ```
/// use rpncalc::{Brain, Evaluation};
/// let mut brain = Brain::new();
/// brain.push_operand(4.0);
/// brain.push_operand(2.0);
/// assert_eq!(brain.perform_operation("-"), Evaluation::Complete(2.0));
/// assert_eq!(brain.describe(), "4-2");
/// ```
///
/// Variables are resolved at evaluation time
/// ```
/// use rpncalc::{Brain, Evaluation};
/// let mut brain = Brain::new();
/// brain.push_variable("x");
/// assert_eq!(brain.perform_operation("√"), Evaluation::Incomplete);
/// assert_eq!(brain.set_variable("x", 16.0), Evaluation::Complete(4.0));
/// assert_eq!(brain.describe(), "√(x)");
/// ```
#[derive(Clone, Debug)]
pub struct Brain {
    registry: Arc<Registry>,
    stack: Vec<Token>,
    variables: Variables,
}

impl Brain {
    /// An empty brain using the standard [`Registry`]
    pub fn new() -> Self {
        Self::with_registry(Arc::new(Registry::new()))
    }

    /// An empty brain sharing this [`Registry`]
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            stack: Vec::new(),
            variables: Variables::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Tokens in the order they were pushed
    pub fn stack(&self) -> &[Token] {
        &self.stack
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn push_operand(&mut self, value: f64) -> Evaluation {
        self.stack.push(Token::Operand(value));
        self.evaluate()
    }

    /// Push a variable, which need not have a value yet
    pub fn push_variable(&mut self, name: impl Into<String>) -> Evaluation {
        self.stack.push(Token::Variable(name.into()));
        self.evaluate()
    }

    /// Push the operation registered for this symbol
    ///
    /// An unknown symbol leaves the stack and its evaluation as they were.
    /// An operator without enough operands before it is not pushed either,
    /// and evaluates Incomplete. See
    /// [`try_perform_operation`](Self::try_perform_operation) to tell these apart.
    pub fn perform_operation(&mut self, symbol: &str) -> Evaluation {
        match self.try_perform_operation(symbol) {
            Ok(evaluation) => evaluation,
            Err(problem @ Problem::InsufficientParameters(_)) => {
                debug!(%problem, "operation refused");
                Evaluation::Incomplete
            }
            Err(problem) => {
                debug!(%problem, "operation ignored");
                self.evaluate()
            }
        }
    }

    /// Push the operation registered for this symbol
    ///
    /// The stack is unchanged if this is a [`Problem::UnknownOperator`] or if the
    /// operator would lack operands, [`Problem::InsufficientParameters`].
    /// Operands which are variables count even if the variable has no value yet.
    pub fn try_perform_operation(&mut self, symbol: &str) -> Result<Evaluation, Problem> {
        let id = self
            .registry
            .lookup(symbol)
            .ok_or_else(|| Problem::UnknownOperator(symbol.to_owned()))?;
        self.stack.push(Token::Operation(id));
        if self.skip_expression(&self.stack).is_none() {
            self.stack.pop();
            return Err(Problem::InsufficientParameters(symbol.to_owned()));
        }
        Ok(self.evaluate())
    }

    /// Empty both the stack and the variables
    pub fn clear(&mut self) -> Evaluation {
        self.stack.clear();
        self.variables.clear();
        self.evaluate()
    }

    /// Give a variable this value and re-evaluate
    pub fn set_variable(&mut self, name: impl Into<String>, value: f64) -> Evaluation {
        self.variables.insert(name.into(), value);
        self.evaluate()
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Was the most recent push a unary or binary operator?
    pub fn last_is_operator(&self) -> bool {
        match self.stack.last() {
            Some(Token::Operation(id)) => self.registry.operation(*id).is_operator(),
            _ => false,
        }
    }

    pub fn evaluate(&self) -> Evaluation {
        let (result, leftover) = self.evaluate_from(&self.stack);
        debug!(
            stack = ?self.program(),
            ?result,
            leftover = ?self.program_of(leftover),
            "evaluated"
        );
        result.into()
    }

    // Consumes the end of `ops`, returning the value and whatever wasn't consumed.
    // Anything missing gives None together with all of `ops`.
    fn evaluate_from<'a>(&self, ops: &'a [Token]) -> (Option<f64>, &'a [Token]) {
        let Some((op, rest)) = ops.split_last() else {
            return (None, ops);
        };

        match op {
            Token::Operand(value) => return (Some(*value), rest),
            Token::Variable(name) => {
                if let Some(value) = self.variable(name) {
                    return (Some(value), rest);
                }
            }
            Token::Operation(id) => match self.registry.operation(*id) {
                Operation::Constant(_, value) => return (Some(*value), rest),
                Operation::Unary(_, f) => {
                    if let (Some(operand), rest) = self.evaluate_from(rest) {
                        return (Some(f(operand)), rest);
                    }
                }
                Operation::Binary(_, f) => {
                    if let (Some(first), rest) = self.evaluate_from(rest) {
                        if let (Some(second), rest) = self.evaluate_from(rest) {
                            return (Some(f(first, second)), rest);
                        }
                    }
                }
            },
        }

        (None, ops)
    }

    // The shape of evaluate_from, ignoring values: what's left after one whole
    // expression at the end of `ops`, or None if there isn't one.
    // Walks the whole expression on every operator push, so a long chain of
    // operators costs quadratic time and recursion depth grows with the stack.
    fn skip_expression<'a>(&self, ops: &'a [Token]) -> Option<&'a [Token]> {
        let (op, rest) = ops.split_last()?;
        match op {
            Token::Operand(_) | Token::Variable(_) => Some(rest),
            Token::Operation(id) => match self.registry.operation(*id) {
                Operation::Constant(..) => Some(rest),
                Operation::Unary(..) => self.skip_expression(rest),
                Operation::Binary(..) => {
                    let rest = self.skip_expression(rest)?;
                    self.skip_expression(rest)
                }
            },
        }
    }

    fn symbol(&self, token: &Token) -> String {
        match token {
            Token::Operand(value) => value.to_string(),
            Token::Variable(name) => name.clone(),
            Token::Operation(id) => self.registry.operation(*id).symbol().to_owned(),
        }
    }

    fn program_of(&self, tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(|token| self.symbol(token)).collect()
    }

    /// The stack as text, one entry per token, suitable for [`restore`](Self::restore)
    ///
    /// Operands are written so that they parse back to exactly the same value.
    pub fn program(&self) -> Vec<String> {
        self.program_of(&self.stack)
    }

    /// Replace the stack with a program from [`program`](Self::program)
    ///
    /// Each entry is looked up as an operation symbol, otherwise parsed as a number,
    /// otherwise taken as a variable if it is a name, otherwise dropped.
    /// Variable values are unaffected.
    pub fn restore<I, S>(&mut self, program: I) -> Evaluation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stack = Vec::new();
        for entry in program {
            let entry = entry.as_ref();
            if let Some(id) = self.registry.lookup(entry) {
                stack.push(Token::Operation(id));
            } else {
                match parse_number(entry) {
                    Ok(value) => stack.push(Token::Operand(value)),
                    Err(_) if is_name(entry) => stack.push(Token::Variable(entry.to_owned())),
                    Err(problem) => debug!(%problem, "dropped from restored program"),
                }
            }
        }
        self.stack = stack;
        self.evaluate()
    }
}

impl Default for Brain {
    fn default() -> Self {
        Self::new()
    }
}
