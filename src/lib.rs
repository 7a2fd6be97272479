//! A keystroke-driven terminal calculator with history and themes.
//!
//! The behavioral core is [`engine`]: a pure reducer that folds keypad
//! events into a [`engine::CalculatorState`]. Evaluation is delegated
//! through [`eval::Evaluator`], completed calculations land in a bounded
//! [`history::History`], and both the history and the [`theme::Theme`]
//! flag persist through the [`storage::Storage`] capability. The terminal
//! frontend in [`ui`] is a thin shell over the core.

pub mod engine;
pub mod eval;
pub mod history;
pub mod storage;
pub mod theme;
pub mod ui;

pub use engine::{CalculatorState, InputEvent, Operator, ResultDisplay, Token, Transition};
pub use eval::{EvalError, Evaluator, FastevalEvaluator};
pub use history::{HISTORY_CAP, History, HistoryEntry};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use theme::Theme;
