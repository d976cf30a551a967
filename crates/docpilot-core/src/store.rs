//! Canonical content store.
//!
//! Holds the authoritative plain-text string for the whole document, the
//! single source of truth consumed by the AI collaborator and the hosting
//! application. The store notifies subscribers on every write, with one
//! exception: an internal write that does not change the value is suppressed
//! so local echoes never fan out.
//!
//! Writes are `pub(crate)`: only the view synchronizer mutates the store, and
//! the single-writer discipline is enforced by visibility rather than
//! convention.

/// Origin tag attached to one content-change cycle.
///
/// Modeled as a value consumed exactly once per cycle, never as a persistent
/// shared flag, so a change can never be misclassified by state leaking
/// across cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// The change originated from direct interaction with the surface:
    /// typing, or a mutation this engine itself performed.
    Internal,
    /// The change was supplied by the hosting application from outside the
    /// surface.
    External,
}

/// Content change callback function type.
pub type ContentChangeCallback = Box<dyn FnMut(&str) + Send>;

/// The authoritative plain-text document state.
pub struct ContentStore {
    text: String,
    word_count: usize,
    callbacks: Vec<ContentChangeCallback>,
}

impl ContentStore {
    /// Create a store seeded with `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            word_count: count_words(text),
            callbacks: Vec::new(),
        }
    }

    /// The canonical document text.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Whitespace-delimited token count of the canonical text, recomputed on
    /// every mutation.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Subscribe to content changes. Callbacks fire after every accepted
    /// write, in subscription order.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Write `text` with the given origin.
    ///
    /// An [`ChangeOrigin::Internal`] write whose value equals the current
    /// value is a no-op and notifies nobody. Every other write replaces the
    /// text, recomputes the word count, and notifies all subscribers.
    pub(crate) fn set(&mut self, text: &str, origin: ChangeOrigin) {
        if origin == ChangeOrigin::Internal && text == self.text {
            return;
        }
        self.text = text.to_string();
        self.word_count = count_words(text);
        for callback in &mut self.callbacks {
            callback(&self.text);
        }
    }
}

/// Count of whitespace-delimited non-empty tokens in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_word_count_seeded_and_recomputed() {
        let mut store = ContentStore::new("one two three");
        assert_eq!(store.word_count(), 3);

        store.set("one  two\tthree four\n", ChangeOrigin::Internal);
        assert_eq!(store.word_count(), 4);

        store.set("", ChangeOrigin::Internal);
        assert_eq!(store.word_count(), 0);
    }

    #[test]
    fn test_internal_noop_is_suppressed() {
        let mut store = ContentStore::new("same");
        let fired = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&fired);
        store.subscribe(move |_| *counter.lock().unwrap() += 1);

        store.set("same", ChangeOrigin::Internal);
        assert_eq!(*fired.lock().unwrap(), 0);

        store.set("same", ChangeOrigin::External);
        assert_eq!(*fired.lock().unwrap(), 1);

        store.set("changed", ChangeOrigin::Internal);
        assert_eq!(*fired.lock().unwrap(), 2);
    }

    #[test]
    fn test_callbacks_receive_new_text() {
        let mut store = ContentStore::new("");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |text| sink.lock().unwrap().push(text.to_string()));

        store.set("first", ChangeOrigin::Internal);
        store.set("second", ChangeOrigin::External);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("one two-and-a-half three"), 3);
        assert_eq!(count_words("你好 世界"), 2);
    }
}
