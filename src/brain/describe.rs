use super::{Brain, Token};
use crate::Operation;

// Shown wherever an operator is missing an operand
const MISSING: &str = "?";

// Does this description have a + or - outside of any parentheses?
fn has_top_level_sum(description: &str) -> bool {
    let mut depth = 0;
    for c in description.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '+' | '-' if depth == 0 => return true,
            _ => (),
        }
    }
    false
}

fn group(description: String) -> String {
    format!("({description})")
}

impl Brain {
    /// Human readable infix description of the stack
    ///
    /// Expressions which were never joined by an operator are listed
    /// separated by a comma, earliest first. Missing operands are shown as `?`.
    ///
    /// ```
    /// use rpncalc::Brain;
    /// let mut brain = Brain::new();
    /// brain.push_operand(3.0);
    /// brain.push_operand(5.0);
    /// brain.perform_operation("+");
    /// brain.push_operand(10.0);
    /// brain.perform_operation("cos");
    /// assert_eq!(brain.describe(), "3+5, cos(10)");
    /// brain.perform_operation("*");
    /// assert_eq!(brain.describe(), "(3+5)*cos(10)");
    /// ```
    ///
    /// A restored program may have operators lacking operands
    /// ```
    /// use rpncalc::Brain;
    /// let mut brain = Brain::new();
    /// brain.restore(["2", "√", "+"]);
    /// assert_eq!(brain.describe(), "?+√(2)");
    /// ```
    pub fn describe(&self) -> String {
        let mut description: Option<String> = None;
        let mut remaining = &self.stack[..];

        while !remaining.is_empty() {
            let (part, rest) = self.describe_from(remaining);
            description = Some(match description {
                Some(later) => format!("{part}, {later}"),
                None => part,
            });
            remaining = rest;
        }

        description.unwrap_or_default()
    }

    // Mirrors evaluate_from, but always consumes at least one token if there is one
    fn describe_from<'a>(&self, ops: &'a [Token]) -> (String, &'a [Token]) {
        let Some((op, rest)) = ops.split_last() else {
            return (MISSING.to_owned(), ops);
        };

        match op {
            Token::Operand(value) => (value.to_string(), rest),
            Token::Variable(name) => (name.clone(), rest),
            Token::Operation(id) => match self.registry.operation(*id) {
                Operation::Constant(symbol, _) => (symbol.clone(), rest),
                Operation::Unary(symbol, _) => {
                    let (operand, rest) = self.describe_from(rest);
                    (format!("{symbol}({operand})"), rest)
                }
                Operation::Binary(symbol, _) => {
                    let (mut first, rest) = self.describe_from(rest);
                    let (mut second, rest) = self.describe_from(rest);
                    if matches!(symbol.as_str(), "*" | "/") {
                        if has_top_level_sum(&first) {
                            first = group(first);
                        }
                        if has_top_level_sum(&second) {
                            second = group(second);
                        }
                    }
                    (format!("{second}{symbol}{first}"), rest)
                }
            },
        }
    }
}
