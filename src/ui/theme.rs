use log::Level;
use ratatui::style::{Color, Modifier, Style};

/// Styles used across the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub default_bg: Color,
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub input_text: Style,
    pub clip_number: Style,
    pub clip_text: Style,
    pub clip_text_selected: Style,
    pub selection_bg: Color,
    pub empty_history: Style,
    pub status_key: Style,
    pub status_desc: Style,
    pub status_bar_bg: Color,
    pub status_info: Style,
    pub flash_error: Style,
    pub flash_warn: Style,
    pub flash_info: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            default_bg: Color::Reset,
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            title: Style::default().fg(Color::Gray),
            input_text: Style::default().fg(Color::White),
            clip_number: Style::default().fg(Color::DarkGray),
            clip_text: Style::default().fg(Color::Gray),
            clip_text_selected: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            selection_bg: Color::Indexed(236),
            empty_history: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            status_key: Style::default().fg(Color::Cyan),
            status_desc: Style::default().fg(Color::Gray),
            status_bar_bg: Color::Reset,
            status_info: Style::default().fg(Color::DarkGray),
            flash_error: Style::default().fg(Color::Red),
            flash_warn: Style::default().fg(Color::Yellow),
            flash_info: Style::default().fg(Color::Green),
        }
    }
}

impl Theme {
    pub fn border_for(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border
        }
    }

    pub fn flash_style(&self, level: Level) -> Style {
        match level {
            Level::Error => self.flash_error,
            Level::Warn => self.flash_warn,
            _ => self.flash_info,
        }
    }
}
