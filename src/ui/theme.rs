use ratatui::style::{Color, Modifier, Style};

/// The two palettes the client can switch between at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" | "default" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    pub sidebar_background_color: Color,

    // Transcript
    pub caption_style: Style,
    pub user_bubble_style: Style,
    pub bot_bubble_style: Style,
    pub placeholder_style: Style,
    pub selection_style: Style,

    // Markdown and markup
    pub heading_style: Style,
    pub code_style: Style,
    pub link_style: Style,
    pub quote_style: Style,

    // Chrome
    pub title_style: Style,
    pub section_heading_style: Style,
    pub sidebar_text_style: Style,
    pub danger_style: Style,
    pub disabled_style: Style,
    pub notice_style: Style,
    pub input_border_style: Style,
    pub input_text_style: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        let text = Color::Rgb(0xfa, 0xfc, 0xff);
        let muted = Color::Rgb(0x9e, 0xa3, 0xad);
        let primary = Color::Rgb(0x90, 0xca, 0xf9);
        Theme {
            background_color: Color::Rgb(0x22, 0x22, 0x24),
            sidebar_background_color: Color::Rgb(0x1a, 0x1a, 0x1d),

            caption_style: Style::default().fg(muted),
            user_bubble_style: Style::default().fg(Color::Black).bg(primary),
            bot_bubble_style: Style::default().fg(text).bg(Color::Rgb(0x42, 0x42, 0x42)),
            placeholder_style: Style::default().fg(muted).add_modifier(Modifier::BOLD),
            selection_style: Style::default().add_modifier(Modifier::REVERSED),

            heading_style: Style::default().fg(primary).add_modifier(Modifier::BOLD),
            code_style: Style::default().fg(Color::Rgb(0xf4, 0xbf, 0x75)),
            link_style: Style::default()
                .fg(primary)
                .add_modifier(Modifier::UNDERLINED),
            quote_style: Style::default().fg(muted).add_modifier(Modifier::ITALIC),

            title_style: Style::default().fg(text).add_modifier(Modifier::BOLD),
            section_heading_style: Style::default()
                .fg(Color::Rgb(0x99, 0x99, 0x99))
                .add_modifier(Modifier::BOLD),
            sidebar_text_style: Style::default().fg(text),
            danger_style: Style::default().fg(Color::Rgb(0xf4, 0x43, 0x36)),
            disabled_style: Style::default().fg(Color::Rgb(0x66, 0x66, 0x66)),
            notice_style: Style::default().fg(text).bg(Color::Rgb(0x33, 0x41, 0x55)),
            input_border_style: Style::default().fg(Color::Rgb(0x44, 0x44, 0x44)),
            input_text_style: Style::default().fg(text),
        }
    }

    pub fn light() -> Self {
        let text = Color::Black;
        let muted = Color::Rgb(0x66, 0x66, 0x66);
        let primary = Color::Rgb(0x19, 0x76, 0xd2);
        Theme {
            background_color: Color::White,
            sidebar_background_color: Color::Rgb(0xf8, 0xf9, 0xfa),

            caption_style: Style::default().fg(muted),
            user_bubble_style: Style::default().fg(Color::Black).bg(Color::Rgb(0xad, 0xd8, 0xe6)),
            bot_bubble_style: Style::default().fg(text).bg(Color::Rgb(0xee, 0xee, 0xee)),
            placeholder_style: Style::default().fg(muted).add_modifier(Modifier::BOLD),
            selection_style: Style::default().add_modifier(Modifier::REVERSED),

            heading_style: Style::default().fg(primary).add_modifier(Modifier::BOLD),
            code_style: Style::default().fg(Color::Rgb(0xa3, 0x15, 0x15)),
            link_style: Style::default()
                .fg(primary)
                .add_modifier(Modifier::UNDERLINED),
            quote_style: Style::default().fg(muted).add_modifier(Modifier::ITALIC),

            title_style: Style::default().fg(text).add_modifier(Modifier::BOLD),
            section_heading_style: Style::default().fg(muted).add_modifier(Modifier::BOLD),
            sidebar_text_style: Style::default().fg(text),
            danger_style: Style::default().fg(Color::Rgb(0xd3, 0x2f, 0x2f)),
            disabled_style: Style::default().fg(Color::Rgb(0xbb, 0xbb, 0xbb)),
            notice_style: Style::default().fg(Color::Black).bg(Color::Rgb(0xad, 0xd8, 0xe6)),
            input_border_style: Style::default().fg(Color::Rgb(0xdd, 0xdd, 0xdd)),
            input_text_style: Style::default().fg(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_mode_round_trips_names() {
        assert_eq!(ThemeMode::from_name("LIGHT"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_name("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_name("dracula"), None);
        assert_eq!(ThemeMode::Light.as_str(), "light");
    }

    #[test]
    fn toggling_twice_restores_mode() {
        let mode = ThemeMode::default();
        assert!(mode.is_dark());
        assert_eq!(mode.toggled(), ThemeMode::Light);
        assert_eq!(mode.toggled().toggled(), mode);
    }

    #[test]
    fn palettes_differ_in_background() {
        assert_ne!(
            Theme::for_mode(ThemeMode::Dark).background_color,
            Theme::for_mode(ThemeMode::Light).background_color
        );
    }
}
