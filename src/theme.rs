//! Theme colors loaded from Omarchy/Hyprland system theme
//! Reads colors from ~/.config/omarchy/current/theme/kitty.conf

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

use crate::capture::{Kind, Priority};
use crate::modules::Accent;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,        // Active borders, highlights
    pub accent_bright: Color, // Brighter accent (badges, counts)
    pub danger: Color,        // Errors, reject hints
    pub success: Color,       // Accept hints, note accents
    pub warning: Color,       // Status messages, medium priority
    pub text: Color,          // Primary text (foreground)
    pub text_dim: Color,      // Dimmed text (color8/bright black)
    pub bg_selected: Color,   // Selection background
    pub inactive: Color,      // Inactive borders
    pub header: Color,        // Section header text
}

impl Default for Theme {
    fn default() -> Self {
        // Fallback to Catppuccin-inspired colors if theme can't be loaded
        Self {
            accent: Color::Rgb(250, 179, 135),
            accent_bright: Color::Rgb(245, 194, 231),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(243, 139, 168),
        }
    }
}

impl Theme {
    /// Load theme from Omarchy system theme, falling back to defaults
    pub fn load() -> Self {
        if let Some(theme) = Self::load_omarchy_theme() {
            return theme;
        }

        Self::default()
    }

    /// Color for a module card's accent slot
    pub fn accent_color(&self, accent: Accent) -> Color {
        match accent {
            Accent::Primary => self.accent,
            Accent::Secondary => self.warning,
            Accent::Tertiary => self.success,
        }
    }

    /// Color for a classification kind badge
    pub fn kind_color(&self, kind: Kind) -> Color {
        match kind {
            Kind::Task => self.accent,
            Kind::Event => self.warning,
            Kind::Note => self.success,
            Kind::Custom => self.accent_bright,
        }
    }

    /// Color for a priority badge
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.danger,
            Priority::Medium => self.warning,
            Priority::Low => self.text_dim,
        }
    }

    /// Load colors from Omarchy kitty.conf theme file
    fn load_omarchy_theme() -> Option<Self> {
        let home = dirs::home_dir()?;
        let theme_path = home.join(".config/omarchy/current/theme/kitty.conf");

        let content = fs::read_to_string(&theme_path).ok()?;
        let colors = Self::parse_kitty_conf(&content);

        if colors.is_empty() {
            return None;
        }

        // Omarchy themes use unconventional slot mappings (e.g. Matte Black
        // puts its gold accent in color2), so map by slot, not by name.
        let accent = colors
            .get("color2")
            .or(colors.get("color10"))
            .copied()
            .unwrap_or(Color::Rgb(255, 193, 7));

        let accent_bright = colors
            .get("color10")
            .or(colors.get("color2"))
            .copied()
            .unwrap_or(Color::Rgb(255, 193, 7));

        let danger = colors
            .get("color1")
            .copied()
            .unwrap_or(Color::Rgb(211, 95, 95));

        let warning = colors
            .get("color4")
            .or(colors.get("color12"))
            .copied()
            .unwrap_or(Color::Rgb(230, 142, 13));

        let text = colors
            .get("foreground")
            .copied()
            .unwrap_or(Color::Rgb(190, 190, 190));

        let text_dim = colors
            .get("color8")
            .copied()
            .unwrap_or(Color::Rgb(138, 138, 141));

        let bg_selected = colors
            .get("selection_background")
            .or(colors.get("color0"))
            .copied()
            .unwrap_or(Color::Rgb(51, 51, 51));

        let inactive = colors
            .get("inactive_border_color")
            .or(colors.get("color8"))
            .copied()
            .unwrap_or(Color::Rgb(89, 89, 89));

        Some(Self {
            accent,
            accent_bright,
            danger,
            success: accent, // Use accent as success color in matte-black
            warning,
            text,
            text_dim,
            bg_selected,
            inactive,
            header: danger, // Use red/danger for headers (contrast)
        })
    }

    /// Parse kitty.conf format: `key value` or `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.splitn(2, char::is_whitespace).collect();
            if parts.len() == 2 {
                let key = parts[0].trim();
                let value = parts[1].trim();

                if let Some(color) = Self::parse_hex_color(value) {
                    colors.insert(key.to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_and_three_digit_hex() {
        assert_eq!(
            Theme::parse_hex_color("#ffc107"),
            Some(Color::Rgb(255, 193, 7))
        );
        assert_eq!(Theme::parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("not-a-color"), None);
    }

    #[test]
    fn kitty_conf_lines_map_to_colors() {
        let conf = "# comment\nforeground #bebebe\ncolor2 #FFC107\nbadline\n";
        let colors = Theme::parse_kitty_conf(conf);
        assert_eq!(colors.get("foreground"), Some(&Color::Rgb(190, 190, 190)));
        assert_eq!(colors.get("color2"), Some(&Color::Rgb(255, 193, 7)));
        assert_eq!(colors.len(), 2);
    }
}
