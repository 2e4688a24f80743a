use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::limit::parse_max_size;

/// Notification sent to observers after the history changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryChange {
    /// Text was pushed to the front (older entries may have been evicted)
    Inserted(String),
    /// One occurrence of the text was removed
    Removed(String),
    /// All entries were dropped
    Cleared,
    /// The size limit changed (entries beyond it were dropped)
    LimitChanged(NonZeroUsize),
}

/// Entries and limit, always accessed together under one lock
#[derive(Debug)]
struct HistoryState {
    /// Most recent first
    entries: VecDeque<String>,
    max_size: NonZeroUsize,
}

impl HistoryState {
    fn trim_to_limit(&mut self) -> usize {
        let limit = self.max_size.get();
        let overflow = self.entries.len().saturating_sub(limit);
        self.entries.truncate(limit);
        overflow
    }
}

/// Bounded, most-recent-first clipboard history shared between the UI
/// thread and the clipboard poller
///
/// Every method locks internally, so callers hold an `Arc<HistoryStore>`
/// and never deal with the mutex themselves. Observers registered with
/// [`HistoryStore::subscribe`] receive a [`HistoryChange`] after each
/// mutation and re-read [`HistoryStore::snapshot`].
#[derive(Debug)]
pub struct HistoryStore {
    state: Mutex<HistoryState>,
    observers: Mutex<Vec<Sender<HistoryChange>>>,
}

impl HistoryStore {
    /// Create an empty history holding at most `max_size` entries
    pub fn new(max_size: NonZeroUsize) -> Self {
        HistoryStore {
            state: Mutex::new(HistoryState {
                entries: VecDeque::with_capacity(max_size.get().min(1024)),
                max_size,
            }),
            observers: Mutex::new(Vec::new()),
        }
    }

    // A panic while holding the lock cannot leave the deque half-updated,
    // so a poisoned lock is still safe to use.
    fn lock_state(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an observer. Dropped receivers are pruned on the next change.
    pub fn subscribe(&self) -> Receiver<HistoryChange> {
        let (tx, rx) = mpsc::channel();
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    fn notify(&self, change: HistoryChange) {
        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        observers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    /// Push `text` to the front of the history
    ///
    /// Blank text and text equal to the current front are ignored.
    /// Returns true if the entry was added.
    pub fn insert_front(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let evicted = {
            let mut state = self.lock_state();
            if state.entries.front().is_some_and(|front| front == text) {
                return false;
            }
            state.entries.push_front(text.to_string());
            state.trim_to_limit()
        };

        if evicted > 0 {
            log::trace!("History full, evicted {} oldest entries", evicted);
        }
        self.notify(HistoryChange::Inserted(text.to_string()));
        true
    }

    /// Remove the first occurrence of `text`. Returns false if it was absent.
    pub fn remove_value(&self, text: &str) -> bool {
        let removed = {
            let mut state = self.lock_state();
            match state.entries.iter().position(|e| e == text) {
                Some(pos) => state.entries.remove(pos).is_some(),
                None => false,
            }
        };

        if removed {
            self.notify(HistoryChange::Removed(text.to_string()));
        } else {
            log::debug!("Remove requested for an entry not in history");
        }
        removed
    }

    /// Remove the entry at `index` if it still holds `expected`
    ///
    /// Lets a view act on the row it displayed even when the same text
    /// appears more than once. Returns false if the history changed under
    /// the view and the row no longer matches.
    pub fn remove_at(&self, index: usize, expected: &str) -> bool {
        let removed = {
            let mut state = self.lock_state();
            if state.entries.get(index).is_some_and(|e| e == expected) {
                state.entries.remove(index)
            } else {
                None
            }
        };

        match removed {
            Some(text) => {
                self.notify(HistoryChange::Removed(text));
                true
            }
            None => {
                log::debug!("Entry {} changed before it could be removed", index);
                false
            }
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock_state().entries.clear();
        self.notify(HistoryChange::Cleared);
    }

    /// Change the size limit, dropping the oldest entries if the history
    /// is now over it
    pub fn set_max_size(&self, max_size: NonZeroUsize) {
        let dropped = {
            let mut state = self.lock_state();
            state.max_size = max_size;
            state.trim_to_limit()
        };

        log::debug!(
            "History limit set to {} ({} entries dropped)",
            max_size,
            dropped
        );
        self.notify(HistoryChange::LimitChanged(max_size));
    }

    /// Apply a size limit typed by the user
    ///
    /// Invalid input leaves the previous limit in place. Returns true if
    /// the limit was applied.
    pub fn apply_max_size_input(&self, input: &str) -> bool {
        match parse_max_size(input) {
            Ok(max_size) => {
                self.set_max_size(max_size);
                true
            }
            Err(e) => {
                log::debug!("Ignoring history limit input: {}", e);
                false
            }
        }
    }

    /// Current entries, most recent first
    pub fn snapshot(&self) -> Vec<String> {
        self.lock_state().entries.iter().cloned().collect()
    }

    pub fn max_size(&self) -> NonZeroUsize {
        self.lock_state().max_size
    }

    pub fn front(&self) -> Option<String> {
        self.lock_state().entries.front().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().entries.is_empty()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(super::limit::default_max_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn store_with(max: usize, oldest_first: &[&str]) -> HistoryStore {
        let store = HistoryStore::new(limit(max));
        for text in oldest_first {
            store.insert_front(text);
        }
        store
    }

    #[test]
    fn test_insert_into_empty() {
        let store = HistoryStore::default();
        assert!(store.insert_front("hello"));
        assert_eq!(store.snapshot(), vec!["hello"]);
        assert_eq!(store.front().as_deref(), Some("hello"));
    }

    #[test]
    fn test_blank_text_ignored() {
        let store = HistoryStore::default();
        assert!(!store.insert_front(""));
        assert!(!store.insert_front("  \n\t "));
        assert!(store.is_empty());
    }

    #[test]
    fn test_repeat_of_front_ignored() {
        let store = store_with(3, &["a", "b", "c"]);
        assert!(!store.insert_front("c"));
        assert_eq!(store.snapshot(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_oldest_evicted_when_full() {
        let store = store_with(3, &["a", "b", "c", "d"]);
        assert_eq!(store.snapshot(), vec!["d", "c", "b"]);
    }

    #[test]
    fn test_many_inserts_keep_last_max() {
        let store = HistoryStore::new(limit(5));
        let inserted: Vec<String> = (0..50).map(|i| format!("clip {}", i)).collect();
        for text in &inserted {
            store.insert_front(text);
        }

        let expected: Vec<String> = inserted.iter().rev().take(5).cloned().collect();
        assert_eq!(store.len(), 5);
        assert_eq!(store.snapshot(), expected);
    }

    #[test]
    fn test_non_front_duplicate_is_kept() {
        let store = store_with(10, &["a", "b", "c"]);
        assert!(store.insert_front("b"));
        assert_eq!(store.snapshot(), vec!["b", "c", "b", "a"]);

        let small = store_with(3, &["a", "b", "c"]);
        small.insert_front("b");
        assert_eq!(small.snapshot(), vec!["b", "c", "b"]);
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let store = store_with(10, &["x", "a", "b", "a"]);
        assert_eq!(store.snapshot(), vec!["a", "b", "a", "x"]);

        assert!(store.remove_value("a"));
        assert_eq!(store.snapshot(), vec!["b", "a", "x"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let store = store_with(10, &["a", "b"]);
        assert!(!store.remove_value("zzz"));
        assert_eq!(store.snapshot(), vec!["b", "a"]);
    }

    #[test]
    fn test_remove_at_targets_the_given_duplicate() {
        let store = store_with(10, &["a", "b", "c", "b"]);
        assert_eq!(store.snapshot(), vec!["b", "c", "b", "a"]);
        let rx = store.subscribe();

        assert!(store.remove_at(2, "b"));
        assert_eq!(store.snapshot(), vec!["b", "c", "a"]);
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![HistoryChange::Removed("b".to_string())]
        );
    }

    #[test]
    fn test_remove_at_stale_row_is_noop() {
        let store = store_with(10, &["a", "b", "c"]);
        assert!(!store.remove_at(0, "b"));
        assert!(!store.remove_at(7, "a"));
        assert_eq!(store.snapshot(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_clear() {
        let store = store_with(10, &["a", "b", "c"]);
        store.clear();
        assert!(store.snapshot().is_empty());

        store.clear();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_invalid_limit_input_keeps_state() {
        let store = store_with(4, &["a", "b", "c"]);
        for input in ["", "abc", "0", "-2", "1.5"] {
            assert!(!store.apply_max_size_input(input));
            assert_eq!(store.max_size().get(), 4);
            assert_eq!(store.snapshot(), vec!["c", "b", "a"]);
        }
    }

    #[test]
    fn test_valid_limit_input_applies() {
        let store = HistoryStore::default();
        assert!(store.apply_max_size_input(" 7 "));
        assert_eq!(store.max_size().get(), 7);
    }

    #[test]
    fn test_shrinking_limit_trims_oldest() {
        let store = store_with(10, &["a", "b", "c", "d", "e"]);
        store.set_max_size(limit(2));
        assert_eq!(store.snapshot(), vec!["e", "d"]);

        store.set_max_size(limit(10));
        assert_eq!(store.snapshot(), vec!["e", "d"]);
    }

    #[test]
    fn test_observers_see_each_mutation() {
        let store = HistoryStore::new(limit(3));
        let rx = store.subscribe();

        store.insert_front("a");
        store.insert_front("a");
        store.insert_front("b");
        store.remove_value("a");
        store.remove_value("missing");
        store.set_max_size(limit(1));
        store.clear();

        let changes: Vec<HistoryChange> = rx.try_iter().collect();
        assert_eq!(
            changes,
            vec![
                HistoryChange::Inserted("a".to_string()),
                HistoryChange::Inserted("b".to_string()),
                HistoryChange::Removed("a".to_string()),
                HistoryChange::LimitChanged(limit(1)),
                HistoryChange::Cleared,
            ]
        );
    }

    #[test]
    fn test_dropped_observer_is_pruned() {
        let store = HistoryStore::default();
        let rx = store.subscribe();
        drop(rx);

        store.insert_front("a");
        assert!(store.observers.lock().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_writers_respect_limit() {
        let store = Arc::new(HistoryStore::new(limit(8)));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..200 {
                        store.insert_front(&format!("{}-{}", t, i));
                        if i % 7 == 0 {
                            let _ = store.snapshot();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 8);
        for pair in snapshot.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
