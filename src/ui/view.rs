//! Screen rendering for the terminal interface.
//!
//! Pure string assembly: [`render`] lays out the whole frame with
//! `\r\n` line endings so the caller can blit it into a raw-mode
//! terminal after clearing the screen.

use chrono::Local;
use colored::Colorize;

use crate::engine::{CalculatorState, ResultDisplay};
use crate::history::History;
use crate::theme::Theme;

/// Truecolor palette for one theme.
struct Palette {
    clock: (u8, u8, u8),
    pending: (u8, u8, u8),
    result: (u8, u8, u8),
    error: (u8, u8, u8),
    muted: (u8, u8, u8),
    highlight: (u8, u8, u8),
}

const DARK: Palette = Palette {
    clock: (0x78, 0x82, 0x8C),
    pending: (0xB4, 0xBE, 0xC8),
    result: (0xF0, 0xF0, 0xFA),
    error: (0xDC, 0x64, 0x5A),
    muted: (0x78, 0x82, 0x8C),
    highlight: (0x8C, 0xB4, 0xF0),
};

const LIGHT: Palette = Palette {
    clock: (0x8C, 0x8C, 0x96),
    pending: (0x50, 0x5A, 0x64),
    result: (0x14, 0x1E, 0x28),
    error: (0xB4, 0x3C, 0x32),
    muted: (0x8C, 0x8C, 0x96),
    highlight: (0x28, 0x64, 0xC8),
};

fn palette(theme: Theme) -> &'static Palette {
    if theme.is_dark() { &DARK } else { &LIGHT }
}

fn paint(text: &str, (r, g, b): (u8, u8, u8)) -> colored::ColoredString {
    text.truecolor(r, g, b)
}

/// Render one full frame.
pub fn render(
    state: &CalculatorState,
    history: &History,
    theme: Theme,
    panel_open: bool,
    selected: usize,
) -> String {
    let p = palette(theme);
    let mut lines = Vec::new();

    let clock = Local::now().format("%a %d %b %Y  %H:%M:%S").to_string();
    lines.push(paint(&clock, p.clock).to_string());
    lines.push(String::new());

    let pending = if state.pending().is_empty() {
        " ".to_string()
    } else {
        state.pending().to_string()
    };
    lines.push(paint(&pending, p.pending).to_string());
    lines.push(result_line(state.result(), p));
    lines.push(String::new());

    if panel_open {
        render_panel(&mut lines, history, selected, p);
    }

    lines.push(
        paint(
            "enter =  ·  esc clear  ·  bksp delete  ·  h history  ·  t theme  ·  q quit",
            p.muted,
        )
        .to_string(),
    );

    let mut frame = lines.join("\r\n");
    frame.push_str("\r\n");
    frame
}

fn result_line(result: &ResultDisplay, p: &Palette) -> String {
    match result {
        ResultDisplay::Error => paint("Error", p.error).bold().to_string(),
        // The result line shows `0` until something is computed.
        ResultDisplay::Empty => paint("0", p.result).bold().to_string(),
        ResultDisplay::Value(value) => paint(value, p.result).bold().to_string(),
    }
}

fn render_panel(lines: &mut Vec<String>, history: &History, selected: usize, p: &Palette) {
    lines.push(paint("History", p.result).bold().to_string());
    if history.is_empty() {
        lines.push(paint("No history yet.", p.muted).to_string());
    } else {
        for (index, entry) in history.iter().enumerate() {
            let line = entry.to_string();
            if index == selected {
                lines.push(paint(&format!("▸ {line}"), p.highlight).to_string());
            } else {
                lines.push(paint(&format!("  {line}"), p.pending).to_string());
            }
        }
        lines.push(paint("↑/↓ select  ·  enter recall  ·  x clear", p.muted).to_string());
    }
    lines.push(String::new());
}
