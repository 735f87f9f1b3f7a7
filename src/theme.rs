//! Colour palette for the calculator
//! Defaults to warm amber tones; can be overridden by a kitty-style colour
//! file (`key #hexcolor` per line) named in the config.

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,       // Focused borders, selected option (color3/yellow)
    pub heading: Color,      // Title and section headings
    pub subtitle: Color,     // Subtitle and footer
    pub text: Color,         // Primary text (foreground)
    pub text_dim: Color,     // Hints, placeholder (color8)
    pub icon: Color,         // Result row icons
    pub value: Color,        // Result numbers
    pub panel_bg: Color,     // Result row background
    pub inactive: Color,     // Unfocused borders
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(245, 158, 11),    // amber-500
            heading: Color::Rgb(120, 53, 15),    // amber-900
            subtitle: Color::Rgb(180, 83, 9),    // amber-700
            text: Color::Rgb(229, 231, 235),
            text_dim: Color::Rgb(156, 163, 175),
            icon: Color::Rgb(217, 119, 6),       // amber-600
            value: Color::Rgb(253, 230, 138),
            panel_bg: Color::Rgb(41, 29, 18),
            inactive: Color::Rgb(107, 114, 128),
        }
    }
}

impl Theme {
    /// Load the theme, applying overrides from `path` when given
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_colors(&Self::parse_color_file(&content)),
            Err(e) => {
                tracing::warn!("Could not read theme file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Map kitty colour names onto the palette; missing keys keep defaults
    fn from_colors(colors: &HashMap<String, Color>) -> Self {
        let base = Self::default();
        let pick = |keys: &[&str], fallback: Color| {
            keys.iter()
                .find_map(|k| colors.get(*k))
                .copied()
                .unwrap_or(fallback)
        };

        Self {
            accent: pick(&["color3", "color11"], base.accent),
            heading: pick(&["color11", "color3"], base.heading),
            subtitle: pick(&["color9", "color1"], base.subtitle),
            text: pick(&["foreground"], base.text),
            text_dim: pick(&["color8"], base.text_dim),
            icon: pick(&["color3"], base.icon),
            value: pick(&["color15", "foreground"], base.value),
            panel_bg: pick(&["selection_background", "color0"], base.panel_bg),
            inactive: pick(&["inactive_border_color", "color8"], base.inactive),
        }
    }

    /// Parse `key value` lines, keeping those whose value is a hex colour
    fn parse_color_file(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(char::is_whitespace) {
                if let Some(color) = Self::parse_hex_color(value) {
                    colors.insert(key.trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match s.len() {
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16).ok()?;
                let g = u8::from_str_radix(&s[2..4], 16).ok()?;
                let b = u8::from_str_radix(&s[4..6], 16).ok()?;
                Some(Color::Rgb(r, g, b))
            }
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
                Some(Color::Rgb(r, g, b))
            }
            _ => None,
        }
    }
}
