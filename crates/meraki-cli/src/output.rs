//! Console output: color gating, status lines, and table rendering.
//!
//! Status lines follow the `** message` voice of the reporting commands;
//! tables use `tabled` for row-shaped output.

use std::io::IsTerminal;

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::ColorMode;

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err()
        }
    }
}

/// Status-line printer with optional color.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Neutral progress line.
    pub fn note(&self, msg: &str) {
        println!("** {msg}");
    }

    /// A network being worked on.
    pub fn network(&self, name: &str) {
        if self.color {
            println!("** Checking network: {}", name.purple());
        } else {
            println!("** Checking network: {name}");
        }
    }

    /// Positive outcome.
    pub fn success(&self, msg: &str) {
        if self.color {
            println!("** {}", msg.green());
        } else {
            println!("** {msg}");
        }
    }

    /// Skipped work.
    pub fn skip(&self, msg: &str) {
        if self.color {
            println!("** {}", msg.yellow());
        } else {
            println!("** {msg}");
        }
    }

    /// Per-key failure or empty result worth flagging.
    pub fn flag(&self, msg: &str) {
        if self.color {
            println!("** {}", msg.red());
        } else {
            println!("** {msg}");
        }
    }
}

/// Render rows as a table for the terminal.
pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::sharp()).to_string()
}
