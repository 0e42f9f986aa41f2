//! A calculator keypad and display driving a [`Brain`].
//!
//! Keys are fed in one at a time, digits are collected on the display until
//! something commits them as an operand.

use crate::display::{format_number, parse_number, DEFAULT_PRECISION};
use crate::{Brain, Evaluation};
use tracing::trace;

#[derive(Clone, Debug)]
pub struct Calculator {
    brain: Brain,
    display: String,
    typing: bool,
    // Exact value behind the display when it shows a result
    shown: Option<f64>,
    precision: usize,
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_brain(Brain::new(), DEFAULT_PRECISION)
    }

    /// A calculator for this brain showing at most `precision` fractional digits
    pub fn with_brain(brain: Brain, precision: usize) -> Self {
        let mut calculator = Self {
            brain,
            display: String::new(),
            typing: false,
            shown: None,
            precision,
        };
        let evaluation = calculator.brain.evaluate();
        calculator.show(evaluation);
        calculator
    }

    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// The number on the display, if there is one
    pub fn display_value(&self) -> Option<f64> {
        if self.typing {
            parse_number(&self.display).ok()
        } else {
            self.shown
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Description of everything entered, marked ` =` if it ends with an operator
    pub fn history(&self) -> String {
        let description = self.brain.describe();
        if self.brain.last_is_operator() {
            format!("{description} =")
        } else {
            description
        }
    }

    fn show(&mut self, evaluation: Evaluation) -> Evaluation {
        self.shown = evaluation.value();
        self.display = match self.shown {
            Some(value) => format_number(value, self.precision),
            None => String::new(),
        };
        evaluation
    }

    /// A digit or the decimal point was pressed
    ///
    /// Only one decimal point is accepted per number, other characters are ignored.
    pub fn digit(&mut self, digit: char) {
        if !(digit.is_ascii_digit() || digit == '.') {
            trace!(?digit, "not a digit");
            return;
        }
        if self.typing {
            if digit == '.' && self.display.contains('.') {
                trace!("second decimal point ignored");
                return;
            }
            self.display.push(digit);
        } else {
            self.display = if digit == '.' {
                "0.".to_owned()
            } else {
                digit.to_string()
            };
            self.typing = true;
        }
        self.shown = None;
    }

    /// Push the number on the display as an operand
    pub fn enter(&mut self) -> Evaluation {
        let value = self.display_value();
        self.typing = false;
        match value {
            Some(value) => {
                let evaluation = self.brain.push_operand(value);
                self.show(evaluation)
            }
            None => {
                trace!(display = %self.display, "nothing to enter");
                self.brain.evaluate()
            }
        }
    }

    /// Push a complete number, entering any number being typed first
    pub fn enter_value(&mut self, value: f64) -> Evaluation {
        if self.typing {
            self.enter();
        }
        let evaluation = self.brain.push_operand(value);
        self.show(evaluation)
    }

    /// An operation key, including constants such as π
    ///
    /// A number being typed is entered first.
    pub fn operation(&mut self, symbol: &str) -> Evaluation {
        if self.typing {
            self.enter();
        }
        let evaluation = self.brain.perform_operation(symbol);
        self.show(evaluation)
    }

    /// Store the displayed number in a variable (→M)
    pub fn store(&mut self, name: &str) -> Evaluation {
        let value = self.display_value();
        self.typing = false;
        match value {
            Some(value) => {
                let evaluation = self.brain.set_variable(name, value);
                self.show(evaluation)
            }
            None => {
                trace!(name, "nothing to store");
                let evaluation = self.brain.evaluate();
                self.show(evaluation)
            }
        }
    }

    /// Push a variable (M)
    ///
    /// A number being typed is entered first.
    pub fn recall(&mut self, name: &str) -> Evaluation {
        if self.typing {
            self.enter();
        }
        let evaluation = self.brain.push_variable(name);
        self.show(evaluation)
    }

    /// Forget everything, including variables
    pub fn clear(&mut self) -> Evaluation {
        self.typing = false;
        let evaluation = self.brain.clear();
        self.shown = Some(0.0);
        self.display = "0".to_owned();
        evaluation
    }

    pub fn program(&self) -> Vec<String> {
        self.brain.program()
    }

    /// Replace what's been entered, see [`Brain::restore`]
    pub fn restore<I, S>(&mut self, program: I) -> Evaluation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.typing = false;
        let evaluation = self.brain.restore(program);
        self.show(evaluation)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
