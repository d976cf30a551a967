#![warn(missing_docs)]
//! DocPilot Core - Document Synchronization & Suggestion Application Engine
//!
//! # Overview
//!
//! `docpilot-core` is the headless core of an AI-assisted rich-text editor.
//! It keeps an authoritative plain-text representation of a document
//! consistent with an interactively edited surface, locates arbitrary text
//! snippets even when the surface splits text across formatting boundaries,
//! and safely replaces a located snippet when an externally produced
//! suggestion is accepted - preserving cursor placement and preventing
//! feedback loops between locally typed edits and externally injected
//! content.
//!
//! It does not render, generate suggestions, or own a document model: the
//! host supplies an editable surface (anything implementing [`TextSurface`])
//! and this crate drives it.
//!
//! # Core Features
//!
//! - **Canonical Content Store**: single source of truth for the plain text,
//!   with change callbacks and internal no-op suppression
//! - **Text Locator**: exact first-occurrence search with matches mapped back
//!   onto `(segment, offset)` endpoints, including boundary-spanning matches
//! - **Selection Tracking**: pure, serializable selection descriptors with
//!   lazy validation and clamped best-effort restoration
//! - **View Synchronization**: internal/external change classification via a
//!   one-shot origin token; external replacements re-establish the cursor
//! - **Suggestion Application**: locate → delete → insert → notify as one
//!   settled operation, `false` on any failure with the document unchanged
//!
//! # Architecture Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  DocumentEngine (sync + apply)               │  ← Public API
//! ├──────────────────────────────────────────────┤
//! │  Selection Tracker (capture / restore)       │
//! ├──────────────────────────────────────────────┤
//! │  Text Locator (SegmentMap + first match)     │
//! ├──────────────────────────────────────────────┤
//! │  Canonical Content Store (text + callbacks)  │
//! ├──────────────────────────────────────────────┤
//! │  TextSurface (host-provided editable view)   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use docpilot_core::{DocumentEngine, SegmentedBuffer};
//!
//! let surface = SegmentedBuffer::new("The cat sat on the mat.");
//! let mut engine = DocumentEngine::new(surface, "The cat sat on the mat.");
//!
//! // Accept a suggestion produced elsewhere: replace "cat" with "dog".
//! assert!(engine.apply_suggestion("cat", "dog"));
//! assert_eq!(engine.text(), "The dog sat on the mat.");
//! assert_eq!(engine.word_count(), 6);
//!
//! // A snippet that no longer exists is a clean no-op.
//! assert!(!engine.apply_suggestion("cat", "dog"));
//! ```
//!
//! Hosts that push content from outside the surface go through
//! [`DocumentEngine::set_content`]:
//!
//! ```rust
//! use docpilot_core::{DocumentEngine, SegmentedBuffer};
//!
//! let mut engine = DocumentEngine::new(SegmentedBuffer::new(""), "Draft outline");
//! engine.subscribe(|text| {
//!     println!("document is now {} bytes", text.len());
//! });
//!
//! engine.set_content("Draft outline\n\n1. Introduction");
//! assert_eq!(engine.word_count(), 4);
//! ```
//!
//! # Module Description
//!
//! - [`surface`] - the abstract editable surface and the in-memory
//!   [`SegmentedBuffer`] implementation
//! - [`store`] - canonical content store and change-origin tagging
//! - [`locate`] - text location over a segmented snapshot
//! - [`line_index`] - Rope-based line/offset mapping
//! - [`selection`] - selection capture and best-effort restoration
//! - [`sync`] - the view synchronizer and engine type
//!
//! # Concurrency Model
//!
//! Single-threaded, cooperative, event-driven. All mutation happens
//! synchronously through `&mut self`; a suggestion application always runs to
//! completion before the next operation begins, and no background thread
//! ever touches the document.

pub mod line_index;
pub mod locate;
pub mod selection;
pub mod store;
pub mod surface;
pub mod sync;

mod apply;

pub use line_index::LineIndex;
pub use locate::{Located, SegmentMap, locate, locate_in};
pub use selection::{SelectionDescriptor, SelectionTracker, restore_selection};
pub use store::{ChangeOrigin, ContentChangeCallback, ContentStore, count_words};
pub use surface::{SegmentedBuffer, SurfaceError, SurfacePoint, SurfaceRange, TextSurface};
pub use sync::DocumentEngine;
