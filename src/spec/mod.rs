//! Specification document loading.
//!
//! The specification is the project's versioned requirements document at
//! `.surveyor/spec.md`. Its presence marks a project as initialized; loading
//! it is the only step of a check run that may abort the whole run.
//!
//! The document itself is opaque to the check engine: it is loaded once per
//! run as execution context. The only structure extracted from it is the set
//! of requirement/invariant identifiers, used for traceability warnings when
//! a check definition references an id the document never mentions.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Result, SurveyorError};

/// Directory under the project root holding all Surveyor files.
pub const SURVEYOR_DIR: &str = ".surveyor";

/// Specification document filename inside [`SURVEYOR_DIR`].
pub const SPEC_FILE: &str = "spec.md";

/// The loaded specification document.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    /// Absolute path the document was read from.
    pub path: PathBuf,
    /// Raw document content.
    pub content: String,
    /// Requirement/invariant identifiers found in the document,
    /// e.g. `REQ-12` or `INV-ordering`.
    pub known_ids: BTreeSet<String>,
}

impl SpecDocument {
    /// Whether the document mentions the given requirement/invariant id.
    pub fn mentions(&self, id: &str) -> bool {
        self.known_ids.contains(id)
    }
}

/// Path to the specification document for a project root.
pub fn spec_path(project_root: &Path) -> PathBuf {
    project_root.join(SURVEYOR_DIR).join(SPEC_FILE)
}

/// Path to the check definition directory for a project root.
pub fn checks_dir(project_root: &Path) -> PathBuf {
    project_root.join(SURVEYOR_DIR).join("checks")
}

/// Load the specification document for a project.
///
/// # Errors
///
/// Returns [`SurveyorError::SpecNotFound`] when the document does not exist
/// (the project is not initialized) and [`SurveyorError::SpecReadError`]
/// when it exists but cannot be read.
pub fn load_spec(project_root: &Path) -> Result<SpecDocument> {
    let path = spec_path(project_root);
    if !path.exists() {
        return Err(SurveyorError::SpecNotFound { path });
    }

    let content = fs::read_to_string(&path).map_err(|e| SurveyorError::SpecReadError {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let known_ids = extract_ids(&content);
    Ok(SpecDocument {
        path,
        content,
        known_ids,
    })
}

/// Extract requirement/invariant identifiers from document text.
///
/// An identifier is an uppercase alphanumeric prefix, a dash, and a tail of
/// word characters, dots, or dashes: `REQ-12`, `INV-ordering`, `P-1.2`.
fn extract_ids(content: &str) -> BTreeSet<String> {
    // The pattern is a literal, so compilation cannot fail.
    let re = Regex::new(r"\b[A-Z][A-Z0-9]*-[A-Za-z0-9][A-Za-z0-9_.-]*\b").unwrap();
    re.find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}
