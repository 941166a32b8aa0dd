//! Unified status vocabulary for consistent CLI output.

use super::theme::SurveyorTheme;

/// Canonical status kinds used across all Surveyor output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Check passed.
    Pass,
    /// Check failed.
    Fail,
    /// Non-fatal warning (e.g. a skipped definition file).
    Warning,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pass => "✓",
            Self::Fail => "✗",
            Self::Warning => "⚠",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Pass => "[PASS]",
            Self::Fail => "[FAIL]",
            Self::Warning => "[warn]",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &SurveyorTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Pass => theme.success.apply_to(icon).to_string(),
            Self::Fail => theme.error.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
        }
    }
}

impl From<crate::checks::CheckStatus> for StatusKind {
    fn from(status: crate::checks::CheckStatus) -> Self {
        match status {
            crate::checks::CheckStatus::Pass => Self::Pass,
            crate::checks::CheckStatus::Fail => Self::Fail,
        }
    }
}
