//! The interactive terminal application.
//!
//! [`App`] owns the calculator state, the history, the theme and the
//! storage backend, folds [`AppEvent`]s into them, and drives the
//! raw-mode key loop. Rendering lives in [`view`], key bindings in
//! [`keymap`]; everything behavioral stays testable without a terminal.

mod keymap;
mod view;

pub use keymap::{AppEvent, map_key};

use std::io::{self, Write};

use termion::input::TermRead;
use termion::raw::IntoRawMode;

use crate::engine::{CalculatorState, InputEvent};
use crate::eval::Evaluator;
use crate::history::History;
use crate::storage::Storage;
use crate::theme::Theme;

/// The whole application: calculator core plus interface state.
pub struct App<E, S> {
    state: CalculatorState,
    history: History,
    theme: Theme,
    evaluator: E,
    storage: S,
    panel_open: bool,
    selected: usize,
    running: bool,
}

impl<E: Evaluator, S: Storage> App<E, S> {
    /// Load persisted state and build the application.
    ///
    /// `theme_override` skips the persisted flag without overwriting it.
    pub fn new(evaluator: E, storage: S, theme_override: Option<Theme>) -> Self {
        let history = History::load(&storage);
        let theme = theme_override.unwrap_or_else(|| Theme::load(&storage));
        Self {
            state: CalculatorState::new(),
            history,
            theme,
            evaluator,
            storage,
            panel_open: false,
            selected: 0,
            running: true,
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply one interface event.
    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Token(token) => self.dispatch(InputEvent::Token(token)),
            AppEvent::Submit => {
                if self.panel_open {
                    self.recall_selected();
                } else {
                    self.dispatch(InputEvent::Evaluate);
                }
            }
            AppEvent::Backspace => self.dispatch(InputEvent::Backspace),
            AppEvent::Cancel => {
                if self.panel_open {
                    self.panel_open = false;
                } else {
                    self.dispatch(InputEvent::Clear);
                }
            }
            AppEvent::ToggleHistory => {
                self.panel_open = !self.panel_open;
                self.selected = 0;
            }
            AppEvent::ToggleTheme => {
                self.theme = self.theme.toggle();
                self.theme.save(&mut self.storage);
            }
            AppEvent::ClearHistory => {
                if self.panel_open {
                    self.history.clear();
                    self.history.save(&mut self.storage);
                    self.selected = 0;
                }
            }
            AppEvent::SelectPrevious => {
                self.selected = self.selected.saturating_sub(1);
            }
            AppEvent::SelectNext => {
                if self.panel_open && !self.history.is_empty() {
                    self.selected = (self.selected + 1).min(self.history.len() - 1);
                }
            }
            AppEvent::Quit => self.running = false,
        }
    }

    fn recall_selected(&mut self) {
        if let Some(entry) = self.history.get(self.selected) {
            let entry = entry.clone();
            self.dispatch(InputEvent::Recall(entry));
        }
        self.panel_open = false;
    }

    /// Feed one event through the reducer and persist any new record.
    fn dispatch(&mut self, event: InputEvent) {
        let transition = self.state.apply(&event, &self.evaluator);
        self.state = transition.state;
        if let Some(record) = transition.record {
            self.history.push(record);
            self.history.save(&mut self.storage);
        }
    }

    /// Run the raw-mode key loop until quit.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout().into_raw_mode()?;
        write!(stdout, "{}", termion::cursor::Hide)?;
        self.draw(&mut stdout)?;
        for key in stdin.keys() {
            match map_key(key?) {
                Some(event) => self.handle(event),
                None => continue,
            }
            if !self.running {
                break;
            }
            self.draw(&mut stdout)?;
        }
        write!(
            stdout,
            "{}{}{}",
            termion::clear::All,
            termion::cursor::Goto(1, 1),
            termion::cursor::Show
        )?;
        stdout.flush()?;
        Ok(())
    }

    fn draw(&self, stdout: &mut impl Write) -> anyhow::Result<()> {
        let frame = view::render(
            &self.state,
            &self.history,
            self.theme,
            self.panel_open,
            self.selected,
        );
        write!(
            stdout,
            "{}{}{}",
            termion::clear::All,
            termion::cursor::Goto(1, 1),
            frame
        )?;
        stdout.flush()?;
        Ok(())
    }
}
