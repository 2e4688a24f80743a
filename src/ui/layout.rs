use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the history limit field, borders included
const LIMIT_FIELD_WIDTH: u16 = 18;

/// Areas of the main screen
pub struct MainLayout {
    pub entry: Rect,
    pub limit: Rect,
    pub history: Rect,
    pub status: Rect,
    pub hints: Rect,
}

/// Split the screen: input row on top, history list, then status and hint bars
pub fn create_main_layout(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Entry + limit inputs
            Constraint::Min(3),    // History list
            Constraint::Length(1), // Status / flash messages
            Constraint::Length(1), // Keyboard hints
        ])
        .split(area);

    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(LIMIT_FIELD_WIDTH)])
        .split(rows[0]);

    MainLayout {
        entry: input_row[0],
        limit: input_row[1],
        history: rows[1],
        status: rows[2],
        hints: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_covers_screen() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create_main_layout(area);

        assert_eq!(layout.entry.height, 3);
        assert_eq!(layout.limit.width, LIMIT_FIELD_WIDTH);
        assert_eq!(layout.entry.width + layout.limit.width, 80);
        assert_eq!(layout.history.height, 24 - 3 - 2);
        assert_eq!(layout.hints.y, 23);
    }
}
