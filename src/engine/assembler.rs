//! The input-assembly state machine.
//!
//! Keystrokes arrive as discrete [`InputEvent`]s and are folded into a
//! [`CalculatorState`] by a pure reducer: [`CalculatorState::apply`] takes
//! the current state and one event and returns the successor state plus an
//! optional history record. The evaluator is passed in by the caller, so
//! the reducer itself never depends on a particular evaluation library and
//! can be driven by a stub in tests.

use tracing::debug;

use crate::eval::{self, Evaluator};
use crate::history::HistoryEntry;

use super::token::{Token, is_glue};

/// What the result line currently shows.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ResultDisplay {
    /// Nothing has been evaluated since the last clear or fresh input.
    #[default]
    Empty,
    /// A successfully computed value.
    Value(String),
    /// The last evaluation failed.
    Error,
}

impl ResultDisplay {
    /// The text shown on the result line.
    pub fn text(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Value(value) => value,
            Self::Error => "Error",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A discrete edit or command applied to the calculator.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A keypad token: digit, decimal point or operator.
    Token(Token),
    /// The `=` key: evaluate the pending expression.
    Evaluate,
    /// The `AC` key: drop the expression and the result.
    Clear,
    /// The backspace key.
    Backspace,
    /// A history entry picked up for further editing.
    Recall(HistoryEntry),
}

/// The outcome of applying one event.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// The successor state.
    pub state: CalculatorState,
    /// A record for the history list, present only when an evaluation
    /// succeeded.
    pub record: Option<HistoryEntry>,
}

impl Transition {
    fn next(state: CalculatorState) -> Self {
        Self {
            state,
            record: None,
        }
    }
}

/// The calculator's entire mutable state: the expression being built and
/// the most recently shown result.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CalculatorState {
    pending: String,
    result: ResultDisplay,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The in-progress expression, in display glyphs.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// The result line.
    pub fn result(&self) -> &ResultDisplay {
        &self.result
    }

    /// Fold one event into the state.
    pub fn apply(&self, event: &InputEvent, evaluator: &dyn Evaluator) -> Transition {
        match event {
            InputEvent::Token(token) => self.append_token(*token),
            InputEvent::Evaluate => self.evaluate(evaluator),
            InputEvent::Clear => Transition::next(Self::default()),
            InputEvent::Backspace => self.backspace(),
            InputEvent::Recall(entry) => Transition::next(Self {
                pending: entry.expression.clone(),
                result: ResultDisplay::Empty,
            }),
        }
    }

    fn append_token(&self, token: Token) -> Transition {
        // A shown value is replaced outright by fresh numeric input...
        if matches!(self.result, ResultDisplay::Value(_)) && !token.is_operator() {
            return Transition::next(Self {
                pending: token.glyph().to_string(),
                result: ResultDisplay::Empty,
            });
        }
        // ...while an operator continues computing from whatever the
        // result line shows, error text included.
        if !self.result.is_empty() && token.is_operator() {
            let mut pending = self.result.text().to_string();
            pending.push(token.glyph());
            return Transition::next(Self {
                pending,
                result: ResultDisplay::Empty,
            });
        }
        if self.rejects(token) {
            return Transition::next(self.clone());
        }
        let mut pending = self.pending.clone();
        pending.push(token.glyph());
        Transition::next(Self {
            pending,
            result: self.result.clone(),
        })
    }

    /// Whether appending `token` would produce a malformed expression.
    fn rejects(&self, token: Token) -> bool {
        // No operator or decimal point directly after another.
        if let Some(last) = self.pending.chars().last()
            && is_glue(last)
            && is_glue(token.glyph())
        {
            return true;
        }
        // At most one decimal point per number segment.
        token == Token::Decimal && self.current_segment_has_decimal()
    }

    fn current_segment_has_decimal(&self) -> bool {
        self.pending
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .any(|c| c == '.')
    }

    fn evaluate(&self, evaluator: &dyn Evaluator) -> Transition {
        // Nothing to do on an empty expression or an unchanged result.
        if self.pending.is_empty() || self.pending == self.result.text() {
            return Transition::next(self.clone());
        }
        match evaluator.evaluate(&eval::sanitize(&self.pending)) {
            Ok(value) => {
                let formatted = eval::format_value(value);
                debug!(expression = %self.pending, result = %formatted, "evaluated");
                let record = HistoryEntry::new(self.pending.clone(), formatted.clone());
                Transition {
                    state: Self {
                        pending: formatted.clone(),
                        result: ResultDisplay::Value(formatted),
                    },
                    record: Some(record),
                }
            }
            Err(err) => {
                debug!(expression = %self.pending, %err, "evaluation failed");
                Transition::next(Self {
                    pending: self.pending.clone(),
                    result: ResultDisplay::Error,
                })
            }
        }
    }

    fn backspace(&self) -> Transition {
        // A shown result is discarded whole rather than edited.
        if !self.result.is_empty() {
            return Transition::next(Self::default());
        }
        let mut pending = self.pending.clone();
        pending.pop();
        Transition::next(Self {
            pending,
            result: ResultDisplay::Empty,
        })
    }
}
