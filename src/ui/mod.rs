//! Terminal output components.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction (mockable in tests)
//! - [`TerminalUi`] for real terminal usage
//! - [`StatusKind`] as the canonical status icon vocabulary

pub mod mock;
pub mod status;
pub mod terminal;
pub mod theme;

pub use mock::MockUi;
pub use status::StatusKind;
pub use terminal::{create_ui, TerminalUi};
pub use theme::{should_use_colors, SurveyorTheme};

/// Output verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Errors and warnings only; all stdout reporting is suppressed.
    Quiet,
    /// Standard per-check output.
    #[default]
    Normal,
    /// Extra detail (traceability references, evidence for passing checks).
    Verbose,
}

/// Trait for user-facing output.
///
/// Commands write through this trait so tests can capture output.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a status line: icon plus message.
    fn status_line(&mut self, kind: StatusKind, msg: &str);
}
