//! Visual theme and styling.

use console::Style;

/// Plinth's visual theme.
#[derive(Debug, Clone)]
pub struct PlinthTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
}

impl Default for PlinthTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PlinthTheme {
    /// Create the default Plinth theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
        }
    }
}
