//! Terminal key bindings.
//!
//! Digits and the operator keys feed the calculator core; everything else
//! is an interface command. Keys with no binding are ignored.

use termion::event::Key;

use crate::engine::Token;

/// Everything a keystroke can ask the application to do.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AppEvent {
    /// Feed a keypad token to the calculator.
    Token(Token),
    /// Enter or `=`: evaluate, or recall the selection when the history
    /// panel is open.
    Submit,
    /// Delete the last character, or discard a shown result.
    Backspace,
    /// Esc: clear the calculator, or close the history panel.
    Cancel,
    /// Show or hide the history panel.
    ToggleHistory,
    /// Switch between the light and dark theme.
    ToggleTheme,
    /// Empty the history list (history panel only).
    ClearHistory,
    /// Move the history selection up.
    SelectPrevious,
    /// Move the history selection down.
    SelectNext,
    /// Leave the application.
    Quit,
}

/// Map a terminal key to an application event.
pub fn map_key(key: Key) -> Option<AppEvent> {
    match key {
        Key::Char('\n') | Key::Char('=') => Some(AppEvent::Submit),
        Key::Char('h') => Some(AppEvent::ToggleHistory),
        Key::Char('t') => Some(AppEvent::ToggleTheme),
        Key::Char('x') => Some(AppEvent::ClearHistory),
        Key::Char('q') | Key::Ctrl('c') => Some(AppEvent::Quit),
        Key::Char(c) => Token::from_char(c).map(AppEvent::Token),
        Key::Backspace => Some(AppEvent::Backspace),
        Key::Esc => Some(AppEvent::Cancel),
        Key::Up => Some(AppEvent::SelectPrevious),
        Key::Down => Some(AppEvent::SelectNext),
        _ => None,
    }
}
