// Theme support for the TUI
//
// A small table of built-in palettes selected by name from the config
// file. Unknown names fall back to the default dark palette with a
// warning, so a typo never breaks startup.

use ratatui::style::Color;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Outline panel
    pub outline_text: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,

    // Log level colors
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,

    // UI chrome
    pub status_bar: Color,
    pub title: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Theme {
    /// The default palette; plain ANSI colors so it follows the terminal.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            outline_text: Color::Reset,
            selection_fg: Color::Black,
            selection_bg: Color::Cyan,
            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Green,
            log_debug: Color::Blue,
            log_trace: Color::DarkGray,
            status_bar: Color::Gray,
            title: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            outline_text: Color::Black,
            selection_fg: Color::White,
            selection_bg: Color::Blue,
            log_error: Color::Red,
            log_warn: Color::Rgb(0xb0, 0x6a, 0x00),
            log_info: Color::Rgb(0x00, 0x6e, 0x2e),
            log_debug: Color::Blue,
            log_trace: Color::Gray,
            status_bar: Color::DarkGray,
            title: Color::Blue,
            border: Color::Gray,
            border_focused: Color::Blue,
        }
    }

    /// High-contrast monochrome palette.
    pub fn mono() -> Self {
        Self {
            name: "mono".to_string(),
            outline_text: Color::White,
            selection_fg: Color::Black,
            selection_bg: Color::White,
            log_error: Color::White,
            log_warn: Color::White,
            log_info: Color::Gray,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
            status_bar: Color::White,
            title: Color::White,
            border: Color::Gray,
            border_focused: Color::White,
        }
    }

    /// Looks up a palette by config name, case-insensitive.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            "mono" => Self::mono(),
            other => {
                tracing::warn!("Unknown theme {:?}, using \"dark\"", other);
                Self::dark()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Theme::by_name("Light").name, "light");
        assert_eq!(Theme::by_name("MONO").name, "mono");
    }

    #[test]
    fn test_unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::by_name("solarized-nope").name, "dark");
    }
}
