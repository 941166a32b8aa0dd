//! Pattern-match runner: regex presence/absence in a single file.

use std::fs;
use std::path::Path;

use crate::checks::definition::{CheckDefinition, PatternMatchSpec};
use crate::checks::report::{CheckResult, CheckStatus};
use crate::checks::timeout::CancelToken;

use super::compile_pattern;

/// Outcome of evaluating one pattern assertion against one file.
///
/// Shared between [`run_pattern_match`] and the multi-condition runner,
/// which applies the same semantics per sub-check.
#[derive(Debug)]
pub(crate) struct PatternOutcome {
    pub pass: bool,
    pub detail: String,
}

/// Evaluate a single pattern assertion.
///
/// Absent-file policy: a missing file is resolved by `must_exist`, not
/// treated as an automatic failure. `must_exist: false` against a missing
/// file passes, asserting the absence of a pattern by asserting the absence
/// of the file that would contain it.
pub(crate) fn eval_pattern(
    project_root: &Path,
    file: &str,
    pattern: &str,
    flags: Option<&str>,
    must_exist: bool,
    cancel: &CancelToken,
) -> PatternOutcome {
    if cancel.is_cancelled() {
        return PatternOutcome {
            pass: false,
            detail: format!("check cancelled before reading {file}"),
        };
    }

    let path = project_root.join(file);
    if !path.is_file() {
        return PatternOutcome {
            pass: !must_exist,
            detail: if must_exist {
                format!("file {file} not found (required evidence absent)")
            } else {
                format!("file {file} not found, forbidden pattern cannot occur")
            },
        };
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            return PatternOutcome {
                pass: false,
                detail: format!("failed to read {file}: {e}"),
            };
        }
    };

    let regex = match compile_pattern(pattern, flags) {
        Ok(regex) => regex,
        Err(message) => {
            return PatternOutcome {
                pass: false,
                detail: message,
            };
        }
    };

    let found = regex.is_match(&content);
    PatternOutcome {
        pass: found == must_exist,
        detail: if found {
            format!("pattern /{pattern}/ found in {file}")
        } else {
            format!("pattern /{pattern}/ not found in {file}")
        },
    }
}

/// Run a `PatternMatch` check.
pub fn run_pattern_match(
    project_root: &Path,
    def: &CheckDefinition,
    spec: &PatternMatchSpec,
    cancel: &CancelToken,
) -> CheckResult {
    let outcome = eval_pattern(
        project_root,
        &spec.file,
        &spec.pattern,
        spec.flags.as_deref(),
        spec.must_exist,
        cancel,
    );
    CheckResult::new(def, CheckStatus::from_pass(outcome.pass), outcome.detail)
}
