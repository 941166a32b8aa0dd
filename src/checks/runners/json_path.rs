//! JSONPath-assertion runner.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::checks::definition::{CheckDefinition, JsonPathSpec};
use crate::checks::jsonpath;
use crate::checks::report::{CheckResult, CheckStatus};
use crate::checks::timeout::CancelToken;

/// Run a `JsonPathAssertion` check.
///
/// With `equals`: PASS iff any query result is structurally equal to the
/// expected value. Without it: PASS iff `(results non-empty) == exists`.
pub fn run_json_path(
    project_root: &Path,
    def: &CheckDefinition,
    spec: &JsonPathSpec,
    cancel: &CancelToken,
) -> CheckResult {
    if cancel.is_cancelled() {
        return CheckResult::fail(def, format!("check cancelled before reading {}", spec.file));
    }

    let path = project_root.join(&spec.file);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => return CheckResult::fail(def, format!("failed to read {}: {e}", spec.file)),
    };

    let doc: Value = match serde_json::from_str(&content) {
        Ok(doc) => doc,
        Err(e) => return CheckResult::fail(def, format!("{} is not valid JSON: {e}", spec.file)),
    };

    let matches = match jsonpath::evaluate(&spec.path, &doc) {
        Ok(matches) => matches,
        Err(e) => return CheckResult::fail(def, e.to_string()),
    };

    if let Some(expected) = &spec.equals {
        let hit = matches.iter().any(|v| *v == expected);
        let evidence = if hit {
            format!("{} matched expected value in {}", spec.path, spec.file)
        } else {
            match matches.first() {
                Some(actual) => format!(
                    "{} in {} is {actual}, expected {expected}",
                    spec.path, spec.file
                ),
                None => format!("{} matched nothing in {}", spec.path, spec.file),
            }
        };
        return CheckResult::new(def, CheckStatus::from_pass(hit), evidence);
    }

    let found = !matches.is_empty();
    let evidence = if found {
        format!("{} matched {} value(s) in {}", spec.path, matches.len(), spec.file)
    } else {
        format!("{} matched nothing in {}", spec.path, spec.file)
    };
    CheckResult::new(def, CheckStatus::from_pass(found == spec.expect_exists()), evidence)
}
