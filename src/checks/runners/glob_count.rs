//! Glob-count runner: expand a glob and assert on the match count, with an
//! optional per-matched-file pattern check.

use std::fs;
use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::checks::definition::{CheckDefinition, GlobCountSpec};
use crate::checks::report::{CheckResult, CheckStatus};
use crate::checks::timeout::CancelToken;

use super::compile_pattern;

/// Glob evidence strings are capped at this many characters so a huge match
/// list cannot blow up a report.
pub const GLOB_EVIDENCE_MAX: usize = 400;

/// Run a `GlobCountMatch` check.
///
/// The verdict is `count >= min && count <= max` (when `max` is set), ANDed
/// with the combined `eachGrep` result when one is configured and at least
/// one path matched.
pub fn run_glob_count(
    project_root: &Path,
    def: &CheckDefinition,
    spec: &GlobCountSpec,
    cancel: &CancelToken,
) -> CheckResult {
    let include = match build_glob(&spec.pattern) {
        Ok(include) => include,
        Err(message) => return CheckResult::fail(def, message),
    };
    let ignore = match build_glob_set(&spec.ignore) {
        Ok(ignore) => ignore,
        Err(message) => return CheckResult::fail(def, message),
    };

    let mut matches = Vec::new();
    let walker = WalkDir::new(project_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            spec.dot || entry.depth() == 0 || !is_hidden(entry.file_name())
        });

    for entry in walker {
        if cancel.is_cancelled() {
            return CheckResult::fail(def, "check cancelled during glob expansion");
        }
        // Unreadable directories are skipped, not fatal.
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(project_root) else {
            continue;
        };
        let rel = rel.to_string_lossy().replace('\\', "/");
        if include.is_match(&rel) && !ignore.is_match(&rel) {
            matches.push(rel);
        }
    }
    matches.sort_unstable();

    let count = matches.len();
    let count_ok = count >= spec.min && spec.max.is_none_or(|max| count <= max);

    let mut evidence = format!("{count} file(s) matched '{}'", spec.pattern);
    if !count_ok {
        evidence.push_str(&format!(" (expected min {}", spec.min));
        if let Some(max) = spec.max {
            evidence.push_str(&format!(", max {max}"));
        }
        evidence.push(')');
    }
    if !matches.is_empty() {
        evidence.push_str(": ");
        evidence.push_str(&matches.join(", "));
    }

    let mut pass = count_ok;
    if let (Some(grep), false) = (&spec.each_grep, matches.is_empty()) {
        let regex = match compile_pattern(&grep.pattern, grep.flags.as_deref()) {
            Ok(regex) => regex,
            Err(message) => return CheckResult::fail(def, message),
        };
        let mut satisfied = 0usize;
        let mut verdicts = Vec::with_capacity(matches.len());
        for rel in &matches {
            if cancel.is_cancelled() {
                return CheckResult::fail(def, "check cancelled during eachGrep");
            }
            // An unreadable file counts as "pattern absent".
            let found = fs::read_to_string(project_root.join(rel))
                .map(|content| regex.is_match(&content))
                .unwrap_or(false);
            let ok = found == grep.must_exist;
            if ok {
                satisfied += 1;
            }
            verdicts.push(ok);
        }
        pass = pass && spec.each_mode.combine(verdicts);
        evidence.push_str(&format!(
            "; eachGrep /{}/ satisfied by {satisfied}/{count} file(s)",
            grep.pattern
        ));
    }

    CheckResult::new(def, CheckStatus::from_pass(pass), cap_evidence(evidence))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn build_glob(pattern: &str) -> std::result::Result<GlobSet, String> {
    build_glob_set(&[pattern.to_string()])
}

fn build_glob_set(patterns: &[String]) -> std::result::Result<GlobSet, String> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| format!("invalid glob '{pattern}': {e}"))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| format!("failed to build glob set: {e}"))
}

/// Truncate evidence to [`GLOB_EVIDENCE_MAX`] characters.
fn cap_evidence(evidence: String) -> String {
    if evidence.chars().count() <= GLOB_EVIDENCE_MAX {
        return evidence;
    }
    let mut capped: String = evidence.chars().take(GLOB_EVIDENCE_MAX - 1).collect();
    capped.push('…');
    capped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn run(root: &Path, json: serde_json::Value) -> CheckResult {
        let def: CheckDefinition = serde_json::from_value(json).unwrap();
        let spec = match &def.kind {
            crate::checks::definition::CheckKind::GlobCountMatch(spec) => spec.clone(),
            _ => unreachable!(),
        };
        run_glob_count(root, &def, &spec, &CancelToken::new())
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn counts_matching_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.rs", "");
        write(temp.path(), "src/deep/b.rs", "");
        write(temp.path(), "src/c.txt", "");
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "rs", "kind": "GlobCountMatch", "pattern": "src/**/*.rs", "min": 2
            }),
        );
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.evidence.unwrap().starts_with("2 file(s)"));
    }

    #[test]
    fn below_min_fails() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.rs", "");
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "rs", "kind": "GlobCountMatch", "pattern": "src/**/*.rs", "min": 3
            }),
        );
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.evidence.unwrap().contains("expected min 3"));
    }

    #[test]
    fn impossible_bound_fails_on_any_match() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.ts", "");
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "none", "kind": "GlobCountMatch",
                "pattern": "src/**/*.ts", "min": 1, "max": 0
            }),
        );
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn ignore_patterns_exclude_matches() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.rs", "");
        write(temp.path(), "src/gen/b.rs", "");
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "rs", "kind": "GlobCountMatch",
                "pattern": "src/**/*.rs", "ignore": ["src/gen/**"], "max": 1
            }),
        );
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.evidence.unwrap().contains("1 file(s)"));
    }

    #[test]
    fn dot_files_excluded_by_default() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".hidden/a.rs", "");
        write(temp.path(), "src/a.rs", "");
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "rs", "kind": "GlobCountMatch", "pattern": "**/*.rs", "max": 1
            }),
        );
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn dot_true_includes_hidden_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".hidden/a.rs", "");
        write(temp.path(), "src/a.rs", "");
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "rs", "kind": "GlobCountMatch",
                "pattern": "**/*.rs", "dot": true, "min": 2
            }),
        );
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn each_grep_all_mode_requires_every_file() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.rs", "// licensed\nfn a() {}");
        write(temp.path(), "src/b.rs", "fn b() {}");
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "lic", "kind": "GlobCountMatch", "pattern": "src/*.rs",
                "eachGrep": {"pattern": "licensed"}
            }),
        );
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.evidence.unwrap().contains("1/2 file(s)"));
    }

    #[test]
    fn each_grep_any_mode_passes_on_one_hit() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.rs", "// licensed");
        write(temp.path(), "src/b.rs", "fn b() {}");
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "lic", "kind": "GlobCountMatch", "pattern": "src/*.rs",
                "eachGrep": {"pattern": "licensed"}, "eachMode": "any"
            }),
        );
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn each_grep_skipped_when_nothing_matches() {
        let temp = TempDir::new().unwrap();
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "lic", "kind": "GlobCountMatch", "pattern": "src/*.rs",
                "min": 0, "eachGrep": {"pattern": "licensed"}
            }),
        );
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn invalid_glob_fails_with_evidence() {
        let temp = TempDir::new().unwrap();
        let result = run(
            temp.path(),
            serde_json::json!({
                "id": "bad", "kind": "GlobCountMatch", "pattern": "src/[unclosed"
            }),
        );
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.evidence.unwrap().contains("invalid glob"));
    }

    #[test]
    fn evidence_is_capped_at_400_chars() {
        let temp = TempDir::new().unwrap();
        for i in 0..60 {
            write(
                temp.path(),
                &format!("src/some_rather_long_module_name_{i:02}.rs"),
                "",
            );
        }
        let result = run(
            temp.path(),
            serde_json::json!({"id": "many", "kind": "GlobCountMatch", "pattern": "src/*.rs"}),
        );
        assert_eq!(result.status, CheckStatus::Pass);
        let evidence = result.evidence.unwrap();
        assert!(evidence.chars().count() <= GLOB_EVIDENCE_MAX);
        assert!(evidence.ends_with('…'));
    }

    #[test]
    fn cap_evidence_leaves_short_strings_alone() {
        assert_eq!(cap_evidence("short".into()), "short");
    }
}
