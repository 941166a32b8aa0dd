//! Check runners, one per definition kind.
//!
//! Every runner has the same shape: `(project_root, definition, payload,
//! cancel) -> CheckResult`. Runners never return errors; anticipated failure
//! paths (missing file, invalid regex, malformed JSON, glob error) are
//! converted locally into FAIL results with descriptive evidence. No runner
//! writes to the filesystem.

pub mod exists;
pub mod glob_count;
pub mod json_path;
pub mod multi;
pub mod pattern;

pub use exists::run_file_exists;
pub use glob_count::run_glob_count;
pub use json_path::run_json_path;
pub use multi::run_multi_condition;
pub use pattern::run_pattern_match;

use regex::{Regex, RegexBuilder};

/// Compile a pattern with JS-style flag characters.
///
/// `i`, `m`, `s`, and `x` map onto the regex crate's builder options;
/// `g` and `u` are accepted and ignored (meaningless for a single
/// `is_match`). Any other flag is rejected.
pub(crate) fn compile_pattern(
    pattern: &str,
    flags: Option<&str>,
) -> std::result::Result<Regex, String> {
    let mut builder = RegexBuilder::new(pattern);
    for ch in flags.unwrap_or_default().chars() {
        match ch {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            'g' | 'u' => {}
            other => return Err(format!("unsupported regex flag '{other}'")),
        }
    }
    builder
        .build()
        .map_err(|e| format!("invalid regex /{pattern}/: {e}"))
}
