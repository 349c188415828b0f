use eframe::egui::Color32;

/// Colors and sizes shared by the deck and the presenter window.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub muted: Color32,
    pub panel_background: Color32,
    pub h1_size: f32,
    pub body_size: f32,
    pub notes_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            muted: Color32::from_rgb(0x80, 0x80, 0x80),
            panel_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            h1_size: 96.0,
            body_size: 44.0,
            notes_size: 22.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            muted: Color32::from_rgb(0x70, 0x70, 0x80),
            panel_background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            h1_size: 96.0,
            body_size: 44.0,
            notes_size: 22.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    /// Picks the theme named by a deck's class list, falling back to `default`.
    ///
    /// `"intro dark"` selects the dark theme; unknown classes are ignored.
    pub fn from_class_name(class_name: &str, default: &str) -> Self {
        let named = class_name
            .split_whitespace()
            .find(|c| matches!(*c, "dark" | "light"));
        Self::from_name(named.unwrap_or(default))
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_selects_theme() {
        assert_eq!(Theme::from_class_name("intro dark", "light").name, "dark");
        assert_eq!(Theme::from_class_name("", "dark").name, "dark");
        assert_eq!(Theme::from_class_name("wide", "light").name, "light");
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::light().toggled(), Theme::dark());
        assert_eq!(Theme::dark().toggled().name, "light");
    }
}
