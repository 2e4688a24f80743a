use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::Theme;
use crate::models::preview;

/// Columns used by the highlight symbol in front of the selected row
const HIGHLIGHT_SYMBOL: &str = "> ";

/// Everything the history pane needs to draw itself
pub struct HistoryListContext<'a> {
    pub entries: &'a [String],
    pub max_size: usize,
    pub focused: bool,
    pub theme: &'a Theme,
}

/// Render numbered history rows, or a placeholder when the history is empty
pub fn render_history_list(
    frame: &mut Frame,
    area: Rect,
    state: &mut ListState,
    ctx: HistoryListContext,
) {
    let theme = ctx.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_for(ctx.focused))
        .title(Span::styled(
            format!(" History {}/{} ", ctx.entries.len(), ctx.max_size),
            theme.title,
        ));

    if ctx.entries.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "No History Available",
            theme.empty_history,
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let number_width = ctx.entries.len().to_string().len();
    // Borders, highlight symbol, number, ". "
    let preview_width = (area.width as usize)
        .saturating_sub(2 + HIGHLIGHT_SYMBOL.len() + number_width + 2);

    let items: Vec<ListItem> = ctx
        .entries
        .iter()
        .enumerate()
        .map(|(i, text)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>width$}. ", i + 1, width = number_width),
                    theme.clip_number,
                ),
                Span::styled(preview(text, preview_width), theme.clip_text),
            ]))
        })
        .collect();

    let highlight = if ctx.focused {
        theme.clip_text_selected.bg(theme.selection_bg)
    } else {
        Style::default().bg(theme.selection_bg)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    frame.render_stateful_widget(list, area, state);
}
