//! File-existence runner.

use std::path::Path;

use crate::checks::definition::{CheckDefinition, FileExistsSpec};
use crate::checks::report::{CheckResult, CheckStatus};
use crate::checks::timeout::CancelToken;

/// Run a `FileExists` check: PASS iff `(file exists) == shouldExist`.
pub fn run_file_exists(
    project_root: &Path,
    def: &CheckDefinition,
    spec: &FileExistsSpec,
    cancel: &CancelToken,
) -> CheckResult {
    if cancel.is_cancelled() {
        return CheckResult::fail(def, format!("check cancelled before stat of {}", spec.file));
    }

    let exists = project_root.join(&spec.file).exists();
    let evidence = if exists {
        format!("file {} exists", spec.file)
    } else {
        format!("file {} does not exist", spec.file)
    };
    CheckResult::new(def, CheckStatus::from_pass(exists == spec.should_exist), evidence)
}
