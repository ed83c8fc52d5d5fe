//! Output formatting module

pub mod human;
pub mod json;
pub mod reporter;
pub mod styles;

use chrono::{Local, NaiveDateTime};
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Timestamp layout of every console line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format `msg` as a console log line stamped with `at`.
#[must_use]
pub fn format_log_line(at: &NaiveDateTime, msg: &str) -> String {
    format!("[{}] {msg}", at.format(TIMESTAMP_FORMAT))
}

fn stamped(msg: &str) -> String {
    format_log_line(&Local::now().naive_local(), msg)
}

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress progress output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let use_colors =
            !no_color && Term::stdout().is_term() && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print a timestamped line. Suppressed when `quiet`.
    pub fn log(&self, msg: &str) {
        if !self.quiet {
            println!("{}", stamped(msg));
        }
    }

    /// Print a timestamped line regardless of `quiet`.
    pub fn log_always(&self, msg: &str) {
        println!("{}", stamped(msg));
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        self.log(&format!("{} {msg}", "✓".style(self.styles.success)));
    }

    /// Print a timestamped error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", stamped(&format!("{} {msg}", "✗".style(self.styles.error))));
    }

    /// Print a section header. Never suppressed.
    pub fn header(&self, msg: &str) {
        self.log_always(&msg.style(self.styles.header).to_string());
    }
}
