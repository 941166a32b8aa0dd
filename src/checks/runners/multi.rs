//! Multi-condition runner: AND/OR of several pattern sub-checks.

use std::path::Path;

use crate::checks::definition::{CheckDefinition, MultiConditionSpec};
use crate::checks::report::{CheckResult, CheckStatus};
use crate::checks::timeout::CancelToken;

use super::pattern::eval_pattern;

/// Run a `MultiCondition` check.
///
/// Each sub-check is evaluated with the same semantics as a `PatternMatch`
/// (including the absent-file policy), then combined with AND (`mode: all`)
/// or OR (`mode: any`). Evidence is the pipe-joined per-check labels with
/// their individual verdicts.
pub fn run_multi_condition(
    project_root: &Path,
    def: &CheckDefinition,
    spec: &MultiConditionSpec,
    cancel: &CancelToken,
) -> CheckResult {
    let mut verdicts = Vec::with_capacity(spec.checks.len());
    let mut parts = Vec::with_capacity(spec.checks.len());

    for check in &spec.checks {
        let outcome = eval_pattern(
            project_root,
            &check.file,
            &check.pattern,
            check.flags.as_deref(),
            check.must_exist,
            cancel,
        );
        parts.push(format!(
            "{}:{}",
            check.display_label(),
            CheckStatus::from_pass(outcome.pass)
        ));
        verdicts.push(outcome.pass);
    }

    let pass = spec.mode.combine(verdicts);
    CheckResult::new(def, CheckStatus::from_pass(pass), parts.join(" | "))
}
