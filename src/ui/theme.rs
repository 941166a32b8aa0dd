//! Color theme for terminal output.

use console::Style;

/// Styles used across all Surveyor output.
#[derive(Debug, Clone)]
pub struct SurveyorTheme {
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub dim: Style,
    pub bold: Style,
}

impl Default for SurveyorTheme {
    fn default() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red(),
            warning: Style::new().yellow(),
            dim: Style::new().dim(),
            bold: Style::new().bold(),
        }
    }
}

/// Whether colored output should be used.
///
/// Honors the `NO_COLOR` convention and falls back to terminal detection.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_styles_apply() {
        let theme = SurveyorTheme::default();
        // Styles render the text either way; color codes depend on the terminal.
        assert!(theme.success.apply_to("ok").to_string().contains("ok"));
    }
}
