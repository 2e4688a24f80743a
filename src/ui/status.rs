use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use crate::app::Focus;
use crate::logging::FlashMessage;

const ENTRY_HINTS: &[(&[&str], &str)] = &[
    (&["Enter"], "copy text"),
    (&["Tab"], "next pane"),
    (&["Ctrl-L"], "clear history"),
    (&["Esc"], "clear/quit"),
];

const LIMIT_HINTS: &[(&[&str], &str)] = &[
    (&["↑", "↓"], "step"),
    (&["Enter"], "apply"),
    (&["Tab"], "next pane"),
    (&["Esc"], "revert"),
];

const HISTORY_HINTS: &[(&[&str], &str)] = &[
    (&["j", "k"], "move"),
    (&["Enter"], "copy"),
    (&["d"], "delete"),
    (&["D"], "clear all"),
    (&["i"], "type"),
    (&["Tab"], "next pane"),
    (&["q"], "quit"),
];

/// Render keyboard hints bar showing shortcuts for the focused pane
pub fn render_keyboard_hints(frame: &mut Frame, area: Rect, focus: Focus, theme: &Theme) {
    let hint_data = match focus {
        Focus::Entry => ENTRY_HINTS,
        Focus::Limit => LIMIT_HINTS,
        Focus::History => HISTORY_HINTS,
    };

    let mut hints = Vec::new();

    for (keys, description) in hint_data {
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                hints.push(Span::styled("/", theme.status_desc.add_modifier(Modifier::DIM)));
            }
            hints.push(Span::styled(*key, theme.status_key));
        }

        hints.push(Span::raw(" "));
        hints.push(Span::styled(*description, theme.status_desc));
        hints.push(Span::raw("  "));
    }

    let paragraph =
        Paragraph::new(Line::from(hints)).style(theme.status_desc.bg(theme.status_bar_bg));

    frame.render_widget(paragraph, area);
}

/// Render the newest flash message, or `fallback` when there is none
pub fn render_status_line(
    frame: &mut Frame,
    area: Rect,
    flash_messages: &[FlashMessage],
    fallback: &str,
    theme: &Theme,
) {
    let line = match flash_messages.last() {
        Some(msg) => Line::from(Span::styled(
            format!("{}: {}", msg.level, msg.message),
            theme.flash_style(msg.level),
        )),
        None => Line::from(Span::styled(fallback.to_string(), theme.status_info)),
    };

    frame.render_widget(Paragraph::new(line), area);
}
