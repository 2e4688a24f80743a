pub mod history;
pub mod limit;
pub mod preview;

pub use history::{HistoryChange, HistoryStore};
pub use limit::{DEFAULT_MAX_HISTORY, LimitError, default_max_size, parse_max_size};
pub use preview::preview;
