//! Check definition discovery and loading.
//!
//! Definitions live as one JSON object per file in the project's check
//! directory, scanned non-recursively in lexical filename order. Loading is
//! deliberately best-effort: a file that fails to read, parse, or validate
//! is skipped with a diagnostic; a typo in one definition must not silently
//! disable the entire check suite.
//!
//! Skip diagnostics go through an injectable [`DiagnosticSink`] so callers
//! can capture or suppress them instead of depending on a process-global
//! stream.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use super::definition::CheckDefinition;

/// Receives diagnostics for definition files that were skipped.
pub trait DiagnosticSink {
    /// Called once per skipped file with the reason.
    fn skipped(&self, file: &Path, reason: &str);
}

/// Default sink: forwards skip diagnostics to `tracing::warn!`.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn skipped(&self, file: &Path, reason: &str) {
        tracing::warn!(file = %file.display(), reason, "skipping check definition");
    }
}

/// Sink that records diagnostics, for tests and for surfacing them in the UI.
#[derive(Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<(std::path::PathBuf, String)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics recorded so far, in load order.
    pub fn entries(&self) -> Vec<(std::path::PathBuf, String)> {
        self.entries.lock().expect("sink lock poisoned").clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn skipped(&self, file: &Path, reason: &str) {
        self.entries
            .lock()
            .expect("sink lock poisoned")
            .push((file.to_path_buf(), reason.to_string()));
    }
}

/// Load all valid check definitions from `config_dir`.
///
/// A missing directory is not an error (checks are optional for a project)
/// and yields an empty list. Files without a `.json` extension are ignored.
pub fn load_definitions(config_dir: &Path, sink: &dyn DiagnosticSink) -> Vec<CheckDefinition> {
    let entries = match fs::read_dir(config_dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut definitions = Vec::with_capacity(paths.len());
    for path in paths {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                sink.skipped(&path, &format!("unreadable: {e}"));
                continue;
            }
        };
        let def: CheckDefinition = match serde_json::from_str(&content) {
            Ok(def) => def,
            Err(e) => {
                sink.skipped(&path, &format!("invalid definition: {e}"));
                continue;
            }
        };
        if def.id.trim().is_empty() {
            sink.skipped(&path, "invalid definition: empty id");
            continue;
        }
        definitions.push(def);
    }

    tracing::debug!(
        count = definitions.len(),
        dir = %config_dir.display(),
        "loaded check definitions"
    );
    definitions
}
