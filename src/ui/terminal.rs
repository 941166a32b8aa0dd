//! Terminal UI implementation.

use super::status::StatusKind;
use super::theme::{should_use_colors, SurveyorTheme};
use super::{OutputMode, UserInterface};

/// Writes to stdout/stderr, with styling when the terminal supports it.
pub struct TerminalUi {
    mode: OutputMode,
    theme: SurveyorTheme,
    use_color: bool,
}

impl TerminalUi {
    /// Create a terminal UI, detecting color support from the environment.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: SurveyorTheme::default(),
            use_color: should_use_colors(),
        }
    }

    /// Create with explicit color handling (for tests).
    pub fn with_color(mode: OutputMode, use_color: bool) -> Self {
        Self {
            mode,
            theme: SurveyorTheme::default(),
            use_color,
        }
    }
}

impl UserInterface for TerminalUi {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode != OutputMode::Quiet {
            println!("{msg}");
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode != OutputMode::Quiet {
            if self.use_color {
                println!("{}", self.theme.success.apply_to(msg));
            } else {
                println!("{msg}");
            }
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.use_color {
            eprintln!("{}", self.theme.warning.apply_to(msg));
        } else {
            eprintln!("warning: {msg}");
        }
    }

    fn error(&mut self, msg: &str) {
        if self.use_color {
            eprintln!("{}", self.theme.error.apply_to(msg));
        } else {
            eprintln!("error: {msg}");
        }
    }

    fn status_line(&mut self, kind: StatusKind, msg: &str) {
        if self.mode == OutputMode::Quiet {
            return;
        }
        if self.use_color {
            println!("{} {msg}", kind.styled(&self.theme));
        } else {
            println!("{} {msg}", kind.bracketed());
        }
    }
}

/// Create the UI for the current environment.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUi::new(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_its_output_mode() {
        let ui = TerminalUi::with_color(OutputMode::Verbose, false);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn quiet_mode_suppresses_messages() {
        // Smoke test: printing in quiet mode must not panic.
        let mut ui = TerminalUi::with_color(OutputMode::Quiet, false);
        ui.message("hidden");
        ui.status_line(StatusKind::Pass, "hidden");
    }
}
