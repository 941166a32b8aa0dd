//! Check definition schema.
//!
//! A check definition is one JSON object describing a declarative assertion
//! against the project tree. The `kind` field discriminates between the five
//! supported assertion kinds; shared metadata (id, title, reporting alias,
//! traceability lists) is common to all of them.
//!
//! Adding a new kind means adding a [`CheckKind`] variant; the exhaustive
//! match in the engine then makes "new kind, no runner" a compile error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single declarative check, parsed from one definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDefinition {
    /// Unique identifier for this check.
    pub id: String,

    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional alias used as the externally visible result identifier.
    /// Defaults to `id` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_as: Option<String>,

    /// Requirement ids this check provides evidence for.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_requirement_ids: Vec<String>,

    /// Invariant ids this check provides evidence for.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_invariant_ids: Vec<String>,

    /// The kind-specific assertion payload.
    #[serde(flatten)]
    pub kind: CheckKind,
}

impl CheckDefinition {
    /// The identifier used in results: `reportAs` falling back to `id`.
    pub fn report_id(&self) -> &str {
        self.report_as.as_deref().unwrap_or(&self.id)
    }
}

/// The five supported assertion kinds, discriminated by the `kind` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CheckKind {
    /// Regex presence/absence in a single file.
    PatternMatch(PatternMatchSpec),
    /// File existence/absence.
    FileExists(FileExistsSpec),
    /// JSONPath query against a JSON file.
    JsonPathAssertion(JsonPathSpec),
    /// AND/OR combination of several pattern sub-checks.
    MultiCondition(MultiConditionSpec),
    /// Glob expansion with match-count bounds and optional per-file grep.
    GlobCountMatch(GlobCountSpec),
}

impl CheckKind {
    /// Human-readable kind name, matching the wire discriminator.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PatternMatch(_) => "PatternMatch",
            Self::FileExists(_) => "FileExists",
            Self::JsonPathAssertion(_) => "JsonPathAssertion",
            Self::MultiCondition(_) => "MultiCondition",
            Self::GlobCountMatch(_) => "GlobCountMatch",
        }
    }
}

/// Payload for `kind: PatternMatch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatchSpec {
    /// File path relative to the project root.
    pub file: String,
    /// Regular expression source string.
    pub pattern: String,
    /// Optional regex flags (`i`, `m`, `s`, `x`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    /// `true`: PASS when the pattern is found. `false`: PASS when absent.
    /// A missing file resolves by this flag too: asserting the absence of
    /// a pattern succeeds when the file that would contain it is absent.
    #[serde(default = "default_true")]
    pub must_exist: bool,
}

/// Payload for `kind: FileExists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileExistsSpec {
    /// File path relative to the project root.
    pub file: String,
    /// `true`: PASS when the file exists. `false`: PASS when it does not.
    #[serde(default = "default_true")]
    pub should_exist: bool,
}

/// Payload for `kind: JsonPathAssertion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPathSpec {
    /// JSON file path relative to the project root.
    pub file: String,
    /// JSONPath expression, e.g. `$.version` or `$.scripts['build']`.
    pub path: String,
    /// Expected value: PASS iff any query result is structurally equal.
    /// Takes precedence over `exists` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
    /// Presence assertion used when `equals` is absent (defaults to `true`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
}

impl JsonPathSpec {
    /// The presence expectation when no `equals` value is given.
    pub fn expect_exists(&self) -> bool {
        self.exists.unwrap_or(true)
    }
}

/// Payload for `kind: MultiCondition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiConditionSpec {
    /// Ordered pattern sub-checks.
    pub checks: Vec<SubCheck>,
    /// How sub-results combine: `all` (AND) or `any` (OR).
    #[serde(default)]
    pub mode: CombineMode,
}

/// One sub-check inside a `MultiCondition`; evaluated exactly like
/// [`PatternMatchSpec`], including the absent-file policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCheck {
    pub file: String,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    #[serde(default = "default_true")]
    pub must_exist: bool,
    /// Label used in the pipe-joined evidence string; defaults to the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SubCheck {
    /// Evidence label: explicit `label` falling back to the file path.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.file)
    }
}

/// Payload for `kind: GlobCountMatch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobCountSpec {
    /// Glob expression relative to the project root, e.g. `src/**/*.rs`.
    pub pattern: String,
    /// Glob exclusions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
    /// Whether `*` matches dot-files.
    #[serde(default)]
    pub dot: bool,
    /// Minimum number of matched paths.
    #[serde(default = "default_min")]
    pub min: usize,
    /// Optional maximum number of matched paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    /// Optional pattern evaluated against every matched file's content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub each_grep: Option<EachGrep>,
    /// How per-file grep results combine: `all` (AND) or `any` (OR).
    #[serde(default)]
    pub each_mode: CombineMode,
}

/// Per-matched-file pattern check inside a `GlobCountMatch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EachGrep {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    /// An unreadable file counts as "pattern absent", so it satisfies a
    /// `mustExist: false` grep and fails a `mustExist: true` one.
    #[serde(default = "default_true")]
    pub must_exist: bool,
}

/// AND/OR combination mode for multi-part checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Every part must pass.
    #[default]
    All,
    /// At least one part must pass.
    Any,
}

impl CombineMode {
    /// Fold a sequence of booleans according to this mode.
    pub fn combine(self, results: impl IntoIterator<Item = bool>) -> bool {
        match self {
            Self::All => results.into_iter().all(|r| r),
            Self::Any => results.into_iter().any(|r| r),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_min() -> usize {
    1
}
