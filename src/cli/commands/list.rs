//! List command implementation.
//!
//! `surveyor list` shows the check definitions discovered for a project
//! without running them.

use std::path::{Path, PathBuf};

use crate::checks::{load_definitions, CollectingSink};
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::spec;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let sink = CollectingSink::new();
        let definitions = load_definitions(&spec::checks_dir(&self.project_root), &sink);

        if self.args.json {
            let json = serde_json::to_string_pretty(&definitions).map_err(anyhow::Error::new)?;
            println!("{json}");
            return Ok(CommandResult::success());
        }

        for (file, reason) in sink.entries() {
            ui.warning(&format!("skipped {}: {reason}", file.display()));
        }
        for def in &definitions {
            let mut line = format!("{} ({})", def.id, def.kind.name());
            if let Some(title) = &def.title {
                line.push_str(" - ");
                line.push_str(title);
            }
            ui.message(&line);
        }
        ui.message(&format!("{} check definition(s)", definitions.len()));
        Ok(CommandResult::success())
    }
}
