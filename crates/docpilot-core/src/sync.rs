//! View synchronizer.
//!
//! Bidirectional bridge between the canonical content store and the live
//! surface. Every content change is classified as *internal* (typed into the
//! surface, or performed on the surface by this engine) or *external*
//! (supplied by the hosting application), and the classification decides the
//! direction of synchronization:
//!
//! - internal: the surface is the truth; its flattened text is pushed into
//!   the store and on to the host.
//! - external: the incoming text is the truth; the surface is rewritten
//!   wholesale, with the selection captured strictly before the rewrite and
//!   restored (or clamped) strictly after.
//!
//! The origin tag is a one-shot token consumed exactly once per cycle, so an
//! internal edit echoed back by the host can never re-trigger an external
//! rewrite of the same payload, and no flag leaks across cycles.
//!
//! # Example
//!
//! ```rust
//! use docpilot_core::{DocumentEngine, SegmentedBuffer, TextSurface};
//!
//! let mut engine = DocumentEngine::new(SegmentedBuffer::new(""), "Hello world");
//! assert_eq!(engine.text(), "Hello world");
//! assert_eq!(engine.word_count(), 2);
//!
//! // Externally supplied content rewrites the surface and settles in one pass.
//! engine.set_content("Hello there");
//! assert_eq!(engine.text(), "Hello there");
//! assert_eq!(engine.surface().text(), "Hello there");
//! ```

use tracing::debug;

use crate::line_index::LineIndex;
use crate::selection::{SelectionTracker, restore_selection};
use crate::store::{ChangeOrigin, ContentStore};
use crate::surface::TextSurface;

/// The document synchronization engine.
///
/// Owns the surface, the canonical content store, and the selection tracker,
/// and keeps all three consistent under interleaved user typing, suggestion
/// application, and out-of-band content replacement. All mutation happens
/// synchronously through `&mut self`; one operation always runs to completion
/// before the next can begin.
pub struct DocumentEngine<S: TextSurface> {
    surface: S,
    store: ContentStore,
    tracker: SelectionTracker,
    last_known: String,
    pending_origin: Option<ChangeOrigin>,
}

impl<S: TextSurface> DocumentEngine<S> {
    /// Create an engine around `surface`, seeding it with `initial_content`
    /// if the surface is currently empty.
    pub fn new(mut surface: S, initial_content: &str) -> Self {
        if surface.text().is_empty() && !initial_content.is_empty() {
            surface.set_text(initial_content);
        }
        let last_known = surface.text();
        let store = ContentStore::new(&last_known);
        Self {
            surface,
            store,
            tracker: SelectionTracker::new(),
            last_known,
            pending_origin: None,
        }
    }

    /// The canonical document text.
    pub fn text(&self) -> &str {
        self.store.get()
    }

    /// Current word count (whitespace-delimited non-empty tokens).
    pub fn word_count(&self) -> usize {
        self.store.word_count()
    }

    /// Shared access to the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, for hosts that dispatch native
    /// formatting commands directly. Call [`notify_input`](Self::notify_input)
    /// afterwards so the mutation is observed and propagated.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Subscribe to canonical content changes. Fires after every internal
    /// mutation and after every completed external replacement.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.store.subscribe(callback);
    }

    /// Zero-based line containing `char_offset` in the canonical text.
    pub fn line_of_offset(&self, char_offset: usize) -> usize {
        LineIndex::from_text(self.store.get()).line_of_char(char_offset)
    }

    /// Surface-input notification: the user typed, or the surface was
    /// otherwise mutated in place.
    ///
    /// Reads the flattened surface text; if it differs from the last known
    /// content, tags the propagation [`ChangeOrigin::Internal`], pushes it to
    /// the store (notifying the host), and arms the one-shot origin token so
    /// the host echoing the same content back does not start an external
    /// cycle.
    pub fn notify_input(&mut self) {
        let text = self.surface.text();
        if text == self.last_known {
            return;
        }
        debug!(chars = text.chars().count(), "internal edit observed");
        self.last_known = text.clone();
        self.pending_origin = Some(ChangeOrigin::Internal);
        self.store.set(&text, ChangeOrigin::Internal);
    }

    /// Receive the desired canonical content from the hosting application.
    ///
    /// Consumes the pending origin token exactly once. If the token says the
    /// change originated inside this engine, the content is an echo of our
    /// own propagation and no external cycle runs. Content equal to the last
    /// known text settles immediately in one pass. Otherwise the external
    /// replacement protocol runs in program order: capture the selection,
    /// rewrite the surface wholesale, then restore the capture — clamping it
    /// into the new text, or collapsing the cursor to the end when
    /// restoration fails.
    pub fn set_content(&mut self, content: &str) {
        let origin = self.pending_origin.take().unwrap_or(ChangeOrigin::External);
        if origin == ChangeOrigin::Internal {
            debug!("content change already internal; skipping external cycle");
            return;
        }
        if content == self.last_known {
            return;
        }

        debug!(chars = content.chars().count(), "external content replacement");
        let captured = self.tracker.capture(&self.surface);
        self.surface.set_text(content);
        match captured {
            Some(descriptor) => restore_selection(&mut self.surface, &descriptor),
            None => self.surface.collapse_selection_to_end(),
        }
        self.last_known = content.to_string();
        self.store.set(content, ChangeOrigin::External);
    }

    /// Selection-change notification from the surface.
    ///
    /// A non-collapsed selection inside the surface is captured for later
    /// restoration and for the applier's selection fallback; anything else
    /// invalidates the previous capture.
    pub fn notify_selection_changed(&mut self) {
        match self.surface.selection() {
            Some(selection) if !selection.is_collapsed() => {
                self.tracker.capture(&self.surface);
            }
            _ => self.tracker.invalidate(),
        }
    }

    /// Focus-loss notification from the surface. A still-standing selection
    /// is captured on the way out; otherwise the previous capture is
    /// invalidated.
    pub fn notify_focus_lost(&mut self) {
        self.notify_selection_changed();
    }

    /// First half of the two-phase selection protocol: capture the current
    /// selection before a host-driven mutating step (a native formatting
    /// command, a link insertion). Returns `true` if a selection was
    /// captured.
    pub fn save_selection(&mut self) -> bool {
        self.tracker.capture(&self.surface).is_some()
    }

    /// Second half of the two-phase selection protocol: re-establish the
    /// saved selection after the mutating step, strictly after it in program
    /// order. Best-effort; a stale capture degrades to a clamped caret.
    pub fn restore_saved_selection(&mut self) {
        if let Some(descriptor) = self.tracker.captured().cloned() {
            restore_selection(&mut self.surface, &descriptor);
        }
    }

    pub(crate) fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    pub(crate) fn tracker_mut(&mut self) -> &mut SelectionTracker {
        &mut self.tracker
    }
}
