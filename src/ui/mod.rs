pub mod history_list;
pub mod inputs;
pub mod layout;
pub mod status;
pub mod theme;

pub use history_list::{HistoryListContext, render_history_list};
pub use inputs::render_text_input;
pub use layout::{MainLayout, create_main_layout};
pub use status::{render_keyboard_hints, render_status_line};
pub use theme::Theme;
