//! The calculator core: the input vocabulary and the state reducer.
//!
//! This module provides functionality to:
//! - Parse keypad characters into [`Token`]s
//! - Fold edit and command events into a [`CalculatorState`]
//! - Emit history records for successful evaluations

mod assembler;
mod token;

pub use assembler::{CalculatorState, InputEvent, ResultDisplay, Transition};
pub use token::{Operator, Token};
