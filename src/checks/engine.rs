//! Check orchestration.
//!
//! The engine loads the specification context, loads all definitions, and
//! evaluates them strictly sequentially: one timeout-guarded runner at a
//! time, in definition load order. Result order is therefore deterministic
//! and checks reading the same files never contend.
//!
//! A single check can fail by any means (assertion, timeout, panic) without
//! affecting its siblings. The only error that aborts a run is a missing
//! specification document, which indicates the project is not initialized.

use std::path::Path;
use std::time::Duration;

use crate::checks::definition::{CheckDefinition, CheckKind};
use crate::checks::loader::{self, DiagnosticSink};
use crate::checks::report::CheckResult;
use crate::checks::runners;
use crate::checks::timeout::{run_with_deadline, CancelToken, DEFAULT_CHECK_TIMEOUT};
use crate::error::Result;
use crate::spec;

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Per-check deadline.
    pub timeout: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }
}

/// Run the full check suite for a project.
///
/// Loads the specification document (the one fatal step), loads definitions
/// best-effort through `sink`, and returns one result per definition in
/// load order.
pub fn run_checks(
    project_root: &Path,
    options: &EngineOptions,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<CheckResult>> {
    let doc = spec::load_spec(project_root)?;
    tracing::debug!(spec = %doc.path.display(), "loaded specification context");

    let definitions = loader::load_definitions(&spec::checks_dir(project_root), sink);
    Ok(run_definitions(project_root, definitions, options))
}

/// Evaluate already-loaded definitions sequentially.
pub fn run_definitions(
    project_root: &Path,
    definitions: Vec<CheckDefinition>,
    options: &EngineOptions,
) -> Vec<CheckResult> {
    run_definitions_with(project_root, definitions, options, dispatch)
}

/// The sequential loop, generic over the per-definition evaluator so tests
/// can substitute a stalling or failing one.
fn run_definitions_with<F>(
    project_root: &Path,
    definitions: Vec<CheckDefinition>,
    options: &EngineOptions,
    eval: F,
) -> Vec<CheckResult>
where
    F: Fn(&Path, &CheckDefinition, &CancelToken) -> CheckResult + Send + Sync + Clone + 'static,
{
    let mut results = Vec::with_capacity(definitions.len());
    for def in definitions {
        results.push(execute_definition(project_root, def, options.timeout, eval.clone()));
    }
    results
}

/// Evaluate one definition under the timeout guard.
///
/// Guard failures (deadline elapsed, runner panic) become FAIL results
/// carrying the check's id; they never abort the surrounding loop.
fn execute_definition<F>(
    project_root: &Path,
    def: CheckDefinition,
    timeout: Duration,
    eval: F,
) -> CheckResult
where
    F: FnOnce(&Path, &CheckDefinition, &CancelToken) -> CheckResult + Send + 'static,
{
    tracing::debug!(id = %def.id, kind = def.kind.name(), "running check");

    let root = project_root.to_path_buf();
    let guarded = def.clone();
    let outcome = run_with_deadline(&def.id, timeout, move |cancel| {
        eval(&root, &guarded, &cancel)
    });

    match outcome {
        Ok(result) => result,
        Err(err) => CheckResult::fail(&def, err.to_string()),
    }
}

/// Route a definition to the runner for its kind.
///
/// The match is exhaustive: adding a `CheckKind` variant without a runner
/// fails to compile.
fn dispatch(project_root: &Path, def: &CheckDefinition, cancel: &CancelToken) -> CheckResult {
    match &def.kind {
        CheckKind::PatternMatch(spec) => {
            runners::run_pattern_match(project_root, def, spec, cancel)
        }
        CheckKind::FileExists(spec) => runners::run_file_exists(project_root, def, spec, cancel),
        CheckKind::JsonPathAssertion(spec) => {
            runners::run_json_path(project_root, def, spec, cancel)
        }
        CheckKind::MultiCondition(spec) => {
            runners::run_multi_condition(project_root, def, spec, cancel)
        }
        CheckKind::GlobCountMatch(spec) => {
            runners::run_glob_count(project_root, def, spec, cancel)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::loader::CollectingSink;
    use crate::checks::report::CheckStatus;
    use crate::error::SurveyorError;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    /// Evaluator that stalls well past any short test deadline for the
    /// definition with id `stall` and behaves normally otherwise.
    fn stalling_eval(root: &Path, def: &CheckDefinition, cancel: &CancelToken) -> CheckResult {
        if def.id == "stall" {
            thread::sleep(Duration::from_millis(200));
        }
        dispatch(root, def, cancel)
    }

    fn init_project(temp: &TempDir) {
        let dir = temp.path().join(".surveyor");
        fs::create_dir_all(dir.join("checks")).unwrap();
        fs::write(dir.join("spec.md"), "# Spec\n\nREQ-1 applies.\n").unwrap();
    }

    fn write_check(temp: &TempDir, name: &str, json: &str) {
        fs::write(temp.path().join(".surveyor/checks").join(name), json).unwrap();
    }

    #[test]
    fn missing_spec_aborts_the_run() {
        let temp = TempDir::new().unwrap();
        let err = run_checks(temp.path(), &EngineOptions::default(), &CollectingSink::new())
            .unwrap_err();
        assert!(matches!(err, SurveyorError::SpecNotFound { .. }));
    }

    #[test]
    fn empty_check_dir_yields_empty_results() {
        let temp = TempDir::new().unwrap();
        init_project(&temp);
        let results =
            run_checks(temp.path(), &EngineOptions::default(), &CollectingSink::new()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn results_follow_definition_order() {
        let temp = TempDir::new().unwrap();
        init_project(&temp);
        write_check(
            &temp,
            "b.json",
            r#"{"id": "second", "kind": "FileExists", "file": "nope"}"#,
        );
        write_check(
            &temp,
            "a.json",
            r#"{"id": "first", "kind": "FileExists", "file": ".surveyor"}"#,
        );
        let results =
            run_checks(temp.path(), &EngineOptions::default(), &CollectingSink::new()).unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(results[0].status, CheckStatus::Pass);
        assert_eq!(results[1].status, CheckStatus::Fail);
    }

    #[test]
    fn malformed_definition_does_not_affect_siblings() {
        let temp = TempDir::new().unwrap();
        init_project(&temp);
        fs::write(temp.path().join("README.md"), "# hi").unwrap();
        write_check(
            &temp,
            "a.json",
            r#"{"id": "readme", "kind": "FileExists", "file": "README.md"}"#,
        );
        write_check(&temp, "broken.json", "{{{");
        write_check(
            &temp,
            "c.json",
            r#"{"id": "also", "kind": "FileExists", "file": "README.md"}"#,
        );

        let sink = CollectingSink::new();
        let results = run_checks(temp.path(), &EngineOptions::default(), &sink).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.status == CheckStatus::Pass));
        assert_eq!(sink.entries().len(), 1);
    }

    #[test]
    fn runs_are_idempotent() {
        let temp = TempDir::new().unwrap();
        init_project(&temp);
        fs::write(temp.path().join("pkg.json"), r#"{"version":"1.0.0"}"#).unwrap();
        write_check(
            &temp,
            "a.json",
            r#"{"id": "v", "kind": "JsonPathAssertion",
                "file": "pkg.json", "path": "$.version", "equals": "1.0.0"}"#,
        );
        write_check(
            &temp,
            "b.json",
            r#"{"id": "missing", "kind": "FileExists", "file": "gone"}"#,
        );

        let options = EngineOptions::default();
        let first = run_checks(temp.path(), &options, &CollectingSink::new()).unwrap();
        let second = run_checks(temp.path(), &options, &CollectingSink::new()).unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn report_alias_flows_through_to_results() {
        let temp = TempDir::new().unwrap();
        init_project(&temp);
        write_check(
            &temp,
            "a.json",
            r#"{"id": "internal", "reportAs": "public", "kind": "FileExists", "file": "x"}"#,
        );
        let results =
            run_checks(temp.path(), &EngineOptions::default(), &CollectingSink::new()).unwrap();
        assert_eq!(results[0].id, "public");
        assert_eq!(results[0].source_definition_id, "internal");
    }

    #[test]
    fn stalled_check_fails_with_timeout_evidence() {
        let temp = TempDir::new().unwrap();
        init_project(&temp);
        let def: CheckDefinition = serde_json::from_str(
            r#"{"id": "stall", "kind": "FileExists", "file": ".surveyor"}"#,
        )
        .unwrap();

        let result =
            execute_definition(temp.path(), def, Duration::from_millis(25), stalling_eval);
        assert_eq!(result.status, CheckStatus::Fail);
        let evidence = result.evidence.unwrap();
        assert!(evidence.contains("stall"));
        assert!(evidence.contains("timed out"));
    }

    #[test]
    fn stalled_check_does_not_affect_siblings() {
        let temp = TempDir::new().unwrap();
        init_project(&temp);
        let definitions: Vec<CheckDefinition> = [
            r#"{"id": "before", "kind": "FileExists", "file": ".surveyor"}"#,
            r#"{"id": "stall", "kind": "FileExists", "file": ".surveyor"}"#,
            r#"{"id": "after", "kind": "FileExists", "file": ".surveyor"}"#,
        ]
        .iter()
        .map(|s| serde_json::from_str(s).unwrap())
        .collect();

        let options = EngineOptions {
            timeout: Duration::from_millis(25),
        };
        let results = run_definitions_with(temp.path(), definitions, &options, stalling_eval);
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["before", "stall", "after"]);
        assert_eq!(results[0].status, CheckStatus::Pass);
        assert_eq!(results[1].status, CheckStatus::Fail);
        assert!(results[1].evidence.as_ref().unwrap().contains("timed out"));
        assert_eq!(results[2].status, CheckStatus::Pass);
    }

    #[test]
    fn all_failing_suite_is_still_a_successful_run() {
        let temp = TempDir::new().unwrap();
        init_project(&temp);
        write_check(
            &temp,
            "a.json",
            r#"{"id": "a", "kind": "FileExists", "file": "gone-1"}"#,
        );
        write_check(
            &temp,
            "b.json",
            r#"{"id": "b", "kind": "FileExists", "file": "gone-2"}"#,
        );
        let results =
            run_checks(temp.path(), &EngineOptions::default(), &CollectingSink::new()).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.status == CheckStatus::Fail));
    }
}
