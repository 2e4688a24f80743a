use ratatui::Frame;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::{Block, ListState};
use std::num::NonZeroUsize;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::clipboard::ClipboardBridge;
use crate::logging::FlashMessage;
use crate::models::{HistoryChange, HistoryStore};
use crate::ui::{self, HistoryListContext, Theme};

/// Pane that receives key presses
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Free text entry, Enter copies it to the clipboard
    #[default]
    Entry,
    /// History size limit field
    Limit,
    /// History list navigation
    History,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Entry => Focus::Limit,
            Focus::Limit => Focus::History,
            Focus::History => Focus::Entry,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Entry => Focus::History,
            Focus::Limit => Focus::Entry,
            Focus::History => Focus::Limit,
        }
    }
}

/// Main application state
///
/// The app never mutates history directly for rendering: it acts through the
/// bridge/store and re-reads the snapshot when a change notification arrives.
pub struct App {
    /// Pane with keyboard focus
    pub focus: Focus,

    /// Clipboard bridge (owns the shared history)
    bridge: ClipboardBridge,

    /// Change notifications from the history store
    changes: Receiver<HistoryChange>,

    /// Last history snapshot, most recent first
    pub entries: Vec<String>,

    /// Limit in effect when the snapshot was taken
    pub max_size: NonZeroUsize,

    /// Text to publish
    pub entry_input: Input,

    /// History size field
    pub limit_input: Input,

    /// Selected row in the history list
    pub selected_index: usize,

    /// Scroll state for the history list
    list_state: ListState,

    /// History list height in rows (updated each frame)
    list_height: u16,

    theme: Theme,

    /// Flash messages displayed in the status line
    pub flash_messages: Vec<FlashMessage>,

    /// Receiver for flash messages from logger
    flash_rx: Option<Receiver<FlashMessage>>,

    /// How long flash messages stay visible
    flash_duration: Duration,

    /// Flag to request application exit
    pub should_quit: bool,
}

impl App {
    pub fn new(
        bridge: ClipboardBridge,
        flash_rx: Option<Receiver<FlashMessage>>,
        flash_duration: Duration,
    ) -> Self {
        let changes = bridge.history().subscribe();
        let max_size = bridge.history().max_size();

        let mut app = App {
            focus: Focus::default(),
            changes,
            entries: Vec::new(),
            max_size,
            entry_input: Input::default(),
            limit_input: Input::new(max_size.to_string()),
            selected_index: 0,
            list_state: ListState::default(),
            list_height: 10,
            theme: Theme::default(),
            flash_messages: Vec::new(),
            flash_rx,
            flash_duration,
            should_quit: false,
            bridge,
        };
        app.refresh_history();
        app
    }

    fn history(&self) -> &HistoryStore {
        self.bridge.history()
    }

    /// Drain change notifications and re-read the history if anything changed
    /// Should be called in the event loop before rendering
    pub fn sync_history(&mut self) {
        let mut changed = false;
        while let Ok(change) = self.changes.try_recv() {
            if let HistoryChange::LimitChanged(limit) = change
                && self.focus != Focus::Limit
            {
                self.limit_input = Input::new(limit.to_string());
            }
            changed = true;
        }

        if changed {
            self.refresh_history();
        }
    }

    fn refresh_history(&mut self) {
        self.entries = self.history().snapshot();
        self.max_size = self.history().max_size();

        if self.entries.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.entries.len() {
            self.selected_index = self.entries.len() - 1;
        }
    }

    /// Poll flash message receiver and add to queue
    pub fn poll_flash_messages(&mut self) {
        if let Some(rx) = &self.flash_rx {
            while let Ok(msg) = rx.try_recv() {
                self.flash_messages.push(msg);
            }
        }
    }

    /// Remove expired flash messages
    pub fn prune_flash_messages(&mut self) {
        if self.flash_messages.is_empty() {
            return;
        }

        let now = Instant::now();
        let duration = self.flash_duration;
        self.flash_messages
            .retain(|msg| now.duration_since(msg.timestamp) < duration);
    }

    /// Get the currently selected entry text
    pub fn selected_entry(&self) -> Option<&str> {
        self.entries.get(self.selected_index).map(String::as_str)
    }

    /// Publish the typed text and clear the field
    pub fn publish_entry(&mut self) {
        let text = self.entry_input.value().to_string();
        if self.bridge.publish(&text) {
            self.entry_input.reset();
            self.selected_index = 0;
        }
        self.sync_history();
    }

    /// Copy the selected entry back to the clipboard
    /// The selected occurrence is removed first so the entry moves to the front
    pub fn copy_selected(&mut self) {
        let Some(text) = self.selected_entry().map(str::to_string) else {
            return;
        };

        self.history().remove_at(self.selected_index, &text);
        self.bridge.publish(&text);
        self.selected_index = 0;
        self.sync_history();
    }

    /// Remove the selected entry from history
    pub fn delete_selected(&mut self) {
        let Some(text) = self.selected_entry().map(str::to_string) else {
            return;
        };

        self.history().remove_at(self.selected_index, &text);
        self.sync_history();
    }

    pub fn clear_history(&mut self) {
        self.history().clear();
        self.selected_index = 0;
        self.sync_history();
    }

    /// Apply the typed limit; invalid input reverts the field
    pub fn apply_limit(&mut self) {
        self.history().apply_max_size_input(self.limit_input.value());
        self.sync_history();
        self.limit_input = Input::new(self.max_size.to_string());
    }

    /// Raise or lower the limit by `delta`, never below 1
    pub fn step_limit(&mut self, delta: isize) {
        let current = self.history().max_size().get();
        let stepped = current.saturating_add_signed(delta).max(1);
        if let Some(limit) = NonZeroUsize::new(stepped) {
            self.history().set_max_size(limit);
        }
        self.sync_history();
        self.limit_input = Input::new(self.max_size.to_string());
    }

    /// Move selection up by n items
    pub fn move_up(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Move selection down by n items
    pub fn move_down(&mut self, n: usize) {
        if !self.entries.is_empty() {
            self.selected_index = (self.selected_index + n).min(self.entries.len() - 1);
        }
    }

    pub fn jump_to_top(&mut self) {
        self.selected_index = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.selected_index = self.entries.len().saturating_sub(1);
    }

    fn page_size(&self) -> usize {
        (self.list_height as usize).max(1)
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handle keyboard event for the focused pane
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.quit();
                return;
            }
            KeyCode::Char('l') if ctrl => {
                self.clear_history();
                return;
            }
            KeyCode::Tab => {
                self.leave_limit_field();
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.leave_limit_field();
                self.focus = self.focus.previous();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Entry => self.handle_entry_key(key),
            Focus::Limit => self.handle_limit_key(key),
            Focus::History => self.handle_history_key(key),
        }
    }

    // Unapplied edits are discarded when focus moves away
    fn leave_limit_field(&mut self) {
        if self.focus == Focus::Limit {
            self.limit_input = Input::new(self.max_size.to_string());
        }
    }

    fn handle_entry_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.publish_entry(),
            KeyCode::Esc => {
                if self.entry_input.value().is_empty() {
                    self.quit();
                } else {
                    self.entry_input.reset();
                }
            }
            _ => {
                // Delegate editing keys to tui-input
                self.entry_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn handle_limit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.apply_limit(),
            KeyCode::Up | KeyCode::Char('+') => self.step_limit(1),
            KeyCode::Down | KeyCode::Char('-') => self.step_limit(-1),
            KeyCode::Esc => {
                self.leave_limit_field();
                self.focus = Focus::History;
            }
            _ => {
                self.limit_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(1),
            KeyCode::Home | KeyCode::Char('g') => self.jump_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.jump_to_bottom(),
            KeyCode::PageUp => {
                let count = self.page_size();
                self.move_up(count);
            }
            KeyCode::PageDown => {
                let count = self.page_size();
                self.move_down(count);
            }
            KeyCode::Enter => self.copy_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('D') => self.clear_history(),
            KeyCode::Char('i') => self.focus = Focus::Entry,
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    /// Render the TUI
    pub fn draw(&mut self, frame: &mut Frame) {
        let size = frame.area();
        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(self.theme.default_bg)),
            size,
        );

        let layout = ui::create_main_layout(size);
        self.list_height = layout.history.height.saturating_sub(2);

        ui::render_text_input(
            frame,
            layout.entry,
            &self.entry_input,
            "Enter text to copy",
            self.focus == Focus::Entry,
            &self.theme,
        );
        ui::render_text_input(
            frame,
            layout.limit,
            &self.limit_input,
            "Max history",
            self.focus == Focus::Limit,
            &self.theme,
        );

        if self.entries.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.selected_index));
        }
        ui::render_history_list(
            frame,
            layout.history,
            &mut self.list_state,
            HistoryListContext {
                entries: &self.entries,
                max_size: self.max_size.get(),
                focused: self.focus == Focus::History,
                theme: &self.theme,
            },
        );

        let fallback = if self.bridge.is_live() {
            format!("Watching clipboard ({})", self.bridge.backend_name())
        } else {
            "Clipboard unavailable: manual entry only".to_string()
        };
        ui::render_status_line(
            frame,
            layout.status,
            &self.flash_messages,
            &fallback,
            &self.theme,
        );
        ui::render_keyboard_hints(frame, layout.hints, self.focus, &self.theme);
    }
}
