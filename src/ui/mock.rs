//! Mock UI for tests.

use super::status::StatusKind;
use super::{OutputMode, UserInterface};

/// Records everything written to it.
#[derive(Debug, Default)]
pub struct MockUi {
    pub mode: OutputMode,
    pub messages: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub status_lines: Vec<(StatusKind, String)>,
}

impl MockUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded output joined for substring assertions.
    pub fn combined_output(&self) -> String {
        let mut out = self.messages.join("\n");
        for (kind, msg) in &self.status_lines {
            out.push('\n');
            out.push_str(kind.bracketed());
            out.push(' ');
            out.push_str(msg);
        }
        out
    }
}

impl UserInterface for MockUi {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn status_line(&mut self, kind: StatusKind, msg: &str) {
        self.status_lines.push((kind, msg.to_string()));
    }
}
