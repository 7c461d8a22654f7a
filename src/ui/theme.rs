use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub label: Style,
    pub required: Style,
    pub placeholder: Style,
    pub error: Style,
    pub focused: Style,
    pub disabled: Style,
    pub selected: Style,
    pub cursor: Style,
    pub hint: Style,
    pub success: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            title: Style::new().color(Color::Cyan).bold(),
            label: Style::new().bold().italic(),
            required: Style::new().color(Color::Red),
            placeholder: Style::new().color(Color::DarkGrey),
            error: Style::new().color(Color::Red),
            focused: Style::new().color(Color::Cyan).bold(),
            disabled: Style::new().color(Color::DarkGrey).dim(),
            selected: Style::new().color(Color::Green).bold(),
            cursor: Style::new().color(Color::Black).background(Color::Cyan),
            hint: Style::new().color(Color::DarkGrey),
            success: Style::new().color(Color::Green),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
