use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_input::Input;

use super::Theme;

/// Render a single-line bordered text field, placing the cursor when focused
pub fn render_text_input(
    frame: &mut Frame,
    area: Rect,
    input: &Input,
    title: &str,
    focused: bool,
    theme: &Theme,
) {
    // Borders take two columns, keep one for the cursor
    let inner_width = area.width.saturating_sub(3) as usize;
    let scroll = input.visual_scroll(inner_width);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_for(focused))
        .title(Span::styled(format!(" {} ", title), theme.title));

    let paragraph = Paragraph::new(input.value())
        .style(theme.input_text)
        .scroll((0, scroll as u16))
        .block(block);

    frame.render_widget(paragraph, area);

    if focused {
        let cursor = input.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position(Position::new(area.x + 1 + cursor, area.y + 1));
    }
}
