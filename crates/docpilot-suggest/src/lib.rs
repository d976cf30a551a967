#![warn(missing_docs)]
//! `docpilot-suggest` - suggestion wire types for the DocPilot engine.
//!
//! The AI collaborator returns structured suggestion objects over the wire;
//! this crate owns their Rust shape, the camelCase JSON decoding, and the
//! small bridge that feeds an accepted suggestion into a
//! [`docpilot_core::DocumentEngine`]. The engine itself never sees JSON and
//! never owns suggestion lifecycle - pending lists, dismissal, and retry
//! belong to the host.
//!
//! # Example
//!
//! ```rust
//! use docpilot_core::{DocumentEngine, SegmentedBuffer};
//! use docpilot_suggest::parse_response;
//!
//! let payload = r#"{
//!     "content": "I found one issue.",
//!     "suggestions": [{
//!         "id": "s-1",
//!         "type": "grammar",
//!         "original": "cat",
//!         "suggested": "dog",
//!         "reason": "Species correction."
//!     }]
//! }"#;
//!
//! let response = parse_response(payload).unwrap();
//! let mut engine = DocumentEngine::new(SegmentedBuffer::new("The cat sat."), "The cat sat.");
//! for suggestion in &response.suggestions {
//!     assert!(suggestion.apply_to(&mut engine));
//! }
//! assert_eq!(engine.text(), "The dog sat.");
//! ```

pub mod types;

pub use types::{ChatResponse, DecodeError, Suggestion, SuggestionKind, parse_response, parse_suggestion};
