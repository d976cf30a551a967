//! Suggestion application.
//!
//! One accepted suggestion runs locate → select → delete → insert →
//! notify-store as a single uninterruptible operation against the live
//! surface. Failure never crosses the boundary as anything but `false`; the
//! document is left byte-for-byte unchanged when no target can be
//! established or the surface rejects the replacement.

use tracing::{debug, warn};

use crate::locate::{SegmentMap, locate_in};
use crate::surface::{SurfaceRange, TextSurface};
use crate::sync::DocumentEngine;

impl<S: TextSurface> DocumentEngine<S> {
    /// Apply one accepted suggestion: replace the first occurrence of
    /// `original` in the live surface with `suggested`.
    ///
    /// The target is established against the current live surface text, never
    /// the last-known content. When full-surface search misses, two fallbacks
    /// are tried in order: the most recently captured selection, then the
    /// presently active selection, each only if it currently spans text equal
    /// to `original`. The precedence is a deliberate, non-essential design
    /// choice kept from the system this engine replaces.
    ///
    /// On success the cursor collapses immediately after the inserted text,
    /// the propagation is tagged internal, and the canonical text and word
    /// count are re-derived from the surface. Returns `false` — with the
    /// document unchanged — when no target was established or the surface
    /// rejected the replacement.
    pub fn apply_suggestion(&mut self, original: &str, suggested: &str) -> bool {
        if original.is_empty() {
            return false;
        }

        let segments = self.surface().segments();
        let map = SegmentMap::new(&segments);

        let mut target = locate_in(&map, original).map(|hit| hit.range);

        if target.is_none() {
            if let Some(descriptor) = self.tracker().captured() {
                if descriptor.spanned_text(&map).as_deref() == Some(original) {
                    target = Some(descriptor.range());
                }
            }
        }
        if target.is_none() {
            if let (Some(selection), Some(text)) =
                (self.surface().selection(), self.surface().selected_text())
            {
                if text == original {
                    target = Some(selection);
                }
            }
        }

        let Some(range) = target else {
            debug!(
                needle_chars = original.chars().count(),
                "suggestion target not found in surface"
            );
            return false;
        };

        let after = match self.surface_mut().replace_range(range, suggested) {
            Ok(point) => point,
            Err(err) => {
                warn!(%err, "surface rejected replacement; suggestion not applied");
                return false;
            }
        };

        if self
            .surface_mut()
            .set_selection(SurfaceRange::collapsed(after))
            .is_err()
        {
            self.surface_mut().collapse_selection_to_end();
        }

        // The capture is consumed by the apply; the mutation made it stale.
        self.tracker_mut().invalidate();
        self.notify_input();
        true
    }
}
