use num::traits::{Float, FloatConst};
use std::collections::HashMap;
use std::fmt;

/// Index of an [`Operation`] within the [`Registry`] which defined it
pub type OpId = usize;

/// An operation the brain knows by symbol
///
/// Binary functions receive the operand pushed last as their first parameter,
/// so "a b -" is computed by a function called with `(b, a)`.
#[derive(Clone, Debug)]
pub enum Operation {
    /// A named value, e.g. π
    Constant(String, f64),
    Unary(String, fn(f64) -> f64),
    Binary(String, fn(f64, f64) -> f64),
}

impl Operation {
    pub fn symbol(&self) -> &str {
        match self {
            Operation::Constant(symbol, _) => symbol,
            Operation::Unary(symbol, _) => symbol,
            Operation::Binary(symbol, _) => symbol,
        }
    }

    /// Does this operation consume operands?
    pub const fn is_operator(&self) -> bool {
        matches!(self, Operation::Unary(..) | Operation::Binary(..))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// Parameters arrive nearest first: `first` was pushed after `second`
fn multiply(first: f64, second: f64) -> f64 {
    second * first
}

fn divide(first: f64, second: f64) -> f64 {
    second / first
}

fn add(first: f64, second: f64) -> f64 {
    second + first
}

fn subtract(first: f64, second: f64) -> f64 {
    second - first
}

/// The table of symbols a [`Brain`](crate::Brain) can push as operations
///
/// Operations are only ever added, re-registering a symbol replaces its
/// definition in place. Once built a Registry is intended to be shared,
/// immutably, by any number of brains.
///
/// # Examples
///
/// ```
/// use rpncalc::{Operation, Registry};
/// let mut registry = Registry::new();
/// registry.register(Operation::Unary("neg".into(), |n| -n));
/// assert!(registry.lookup("neg").is_some());
/// assert!(registry.lookup("√").is_some());
/// assert!(registry.lookup("^").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Registry {
    ops: Vec<Operation>,
    index: HashMap<String, OpId>,
}

impl Registry {
    /// A Registry with no operations at all
    pub fn empty() -> Self {
        Self {
            ops: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The standard calculator operations: `*`, `/`, `+`, `-`, `√`, `sin`, `cos` and `π`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Operation::Binary("*".into(), multiply));
        registry.register(Operation::Binary("/".into(), divide));
        registry.register(Operation::Binary("+".into(), add));
        registry.register(Operation::Binary("-".into(), subtract));
        registry.register(Operation::Unary("√".into(), <f64 as Float>::sqrt));
        registry.register(Operation::Unary("sin".into(), <f64 as Float>::sin));
        registry.register(Operation::Unary("cos".into(), <f64 as Float>::cos));
        registry.register(Operation::Constant("π".into(), <f64 as FloatConst>::PI()));
        registry
    }

    /// Add this operation, replacing any previous operation with the same symbol
    pub fn register(&mut self, op: Operation) -> OpId {
        match self.index.get(op.symbol()) {
            Some(&id) => {
                self.ops[id] = op;
                id
            }
            None => {
                let id = self.ops.len();
                self.index.insert(op.symbol().to_owned(), id);
                self.ops.push(op);
                id
            }
        }
    }

    pub fn lookup(&self, symbol: &str) -> Option<OpId> {
        self.index.get(symbol).copied()
    }

    /// The operation for this [`OpId`], None if it wasn't issued by this Registry
    pub fn get(&self, id: OpId) -> Option<&Operation> {
        self.ops.get(id)
    }

    // Only for ids this Registry issued
    pub(crate) fn operation(&self, id: OpId) -> &Operation {
        &self.ops[id]
    }

    /// Every registered symbol, in the order first registered
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().map(Operation::symbol)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_binary(registry: &Registry, symbol: &str, first: f64, second: f64) -> f64 {
        let id = registry.lookup(symbol).unwrap();
        match registry.operation(id) {
            Operation::Binary(_, f) => f(first, second),
            other => panic!("{other} is not binary"),
        }
    }

    #[test]
    fn standard_symbols() {
        let registry = Registry::new();
        let symbols: Vec<&str> = registry.symbols().collect();
        assert_eq!(symbols, ["*", "/", "+", "-", "√", "sin", "cos", "π"]);
    }

    #[test]
    fn nearest_operand_first() {
        let registry = Registry::new();
        assert_eq!(apply_binary(&registry, "-", 2.0, 4.0), 2.0);
        assert_eq!(apply_binary(&registry, "/", 2.0, 10.0), 5.0);
        assert_eq!(apply_binary(&registry, "+", 2.0, 4.0), 6.0);
        assert_eq!(apply_binary(&registry, "*", 2.0, 4.0), 8.0);
    }

    #[test]
    fn domain_errors_pass_through() {
        let registry = Registry::new();
        assert_eq!(apply_binary(&registry, "/", 0.0, 1.0), f64::INFINITY);
        let sqrt = registry.lookup("√").unwrap();
        match registry.operation(sqrt) {
            Operation::Unary(_, f) => assert!(f(-1.0).is_nan()),
            other => panic!("{other} is not unary"),
        }
    }

    #[test]
    fn pi() {
        let registry = Registry::new();
        let id = registry.lookup("π").unwrap();
        let op = registry.operation(id);
        assert!(!op.is_operator());
        match op {
            Operation::Constant(_, value) => assert_eq!(*value, std::f64::consts::PI),
            other => panic!("{other} is not a constant"),
        }
    }

    #[test]
    fn replace() {
        let mut registry = Registry::new();
        let before = registry.len();
        let plus = registry.lookup("+").unwrap();
        let id = registry.register(Operation::Binary("+".into(), |a, b| a + b + 1.0));
        assert_eq!(id, plus);
        assert_eq!(registry.len(), before);
        assert_eq!(apply_binary(&registry, "+", 1.0, 1.0), 3.0);
    }

    #[test]
    fn foreign_id() {
        let registry = Registry::new();
        let id = registry.lookup("π").unwrap();
        assert_eq!(registry.get(id).map(Operation::symbol), Some("π"));
        assert!(Registry::empty().get(id).is_none());
        assert!(registry.get(registry.len()).is_none());
    }

    #[test]
    fn unknown() {
        assert_eq!(Registry::new().lookup("^"), None);
        assert!(Registry::empty().is_empty());
    }
}
