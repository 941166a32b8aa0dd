//! Check command implementation.
//!
//! `surveyor check` runs the full check suite and prints either a
//! human-readable report or, with `--json`, the raw ordered results.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::checks::{
    load_definitions, run_definitions, CheckDefinition, CollectingSink, EngineOptions,
};
use crate::cli::args::CheckArgs;
use crate::error::{Result, SurveyorError};
use crate::spec::{self, SpecDocument};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn engine_options(&self) -> EngineOptions {
        match self.args.timeout_ms {
            Some(ms) => EngineOptions {
                timeout: Duration::from_millis(ms),
            },
            None => EngineOptions::default(),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // The one fatal error: running checks without a specification
        // context means the project is not initialized.
        let doc = match spec::load_spec(&self.project_root) {
            Ok(doc) => doc,
            Err(SurveyorError::SpecNotFound { path }) => {
                ui.error(&format!(
                    "No specification found at {}. Create it to initialize the project.",
                    path.display()
                ));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let sink = CollectingSink::new();
        let definitions = load_definitions(&spec::checks_dir(&self.project_root), &sink);
        let results = run_definitions(&self.project_root, definitions.clone(), &self.engine_options());

        if self.args.json {
            // Raw results only; diagnostics would corrupt the stream.
            let json = serde_json::to_string_pretty(&results).map_err(anyhow::Error::new)?;
            println!("{json}");
        } else {
            for (file, reason) in sink.entries() {
                ui.warning(&format!("skipped {}: {reason}", file.display()));
            }
            for warning in traceability_warnings(&doc, &definitions) {
                ui.warning(&warning);
            }

            let verbose = ui.output_mode() == OutputMode::Verbose;
            for (def, result) in definitions.iter().zip(&results) {
                let mut line = result.id.clone();
                if let Some(title) = &result.title {
                    line.push_str(" - ");
                    line.push_str(title);
                }
                ui.status_line(result.status.into(), &line);

                if let Some(evidence) = &result.evidence {
                    if verbose || !result.status.is_pass() {
                        ui.message(&format!("    evidence: {evidence}"));
                    }
                }
                if verbose {
                    let refs: Vec<&str> = def
                        .related_requirement_ids
                        .iter()
                        .chain(&def.related_invariant_ids)
                        .map(String::as_str)
                        .collect();
                    if !refs.is_empty() {
                        ui.message(&format!("    refs: {}", refs.join(", ")));
                    }
                }
            }

            let passed = results.iter().filter(|r| r.status.is_pass()).count();
            let failed = results.len() - passed;
            ui.message("");
            ui.message(&format!("{passed} passed, {failed} failed"));
        }

        let any_failed = results.iter().any(|r| !r.status.is_pass());
        if self.args.strict && any_failed {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

/// Advisory warnings for traceability references the specification never
/// mentions. Never affects a check's status.
fn traceability_warnings(doc: &SpecDocument, definitions: &[CheckDefinition]) -> Vec<String> {
    let mut warnings = Vec::new();
    for def in definitions {
        for id in def
            .related_requirement_ids
            .iter()
            .chain(&def.related_invariant_ids)
        {
            if !doc.mentions(id) {
                warnings.push(format!(
                    "check '{}' references {id}, which does not appear in the specification",
                    def.id
                ));
            }
        }
    }
    warnings
}
