//! Wire types for AI-produced suggestions.
//!
//! Field names and optionality mirror the JSON the suggestion service emits:
//! camelCase keys, a `type` tag drawn from a closed set, optional `context`
//! and `lineNumber` (which may also be `null`). Unknown `type` tags decode as
//! [`SuggestionKind::Other`] rather than failing the whole payload - the
//! service is a language model and occasionally invents categories.

use docpilot_core::{DocumentEngine, TextSurface};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Grammar or spelling fix.
    Grammar,
    /// Rewording without changing meaning.
    Paraphrase,
    /// Terminology or tone consistency.
    Consistency,
    /// Citation formatting or sourcing.
    Citation,
    /// Potentially unoriginal passage.
    Plagiarism,
    /// Stylistic improvement.
    Style,
    /// Anything else, including tags this crate does not know.
    Other,
}

impl SuggestionKind {
    /// The wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grammar => "grammar",
            Self::Paraphrase => "paraphrase",
            Self::Consistency => "consistency",
            Self::Citation => "citation",
            Self::Plagiarism => "plagiarism",
            Self::Style => "style",
            Self::Other => "other",
        }
    }

    fn from_wire(tag: &str) -> Self {
        match tag {
            "grammar" => Self::Grammar,
            "paraphrase" => Self::Paraphrase,
            "consistency" => Self::Consistency,
            "citation" => Self::Citation,
            "plagiarism" => Self::Plagiarism,
            "style" => Self::Style,
            _ => Self::Other,
        }
    }
}

impl<'de> Deserialize<'de> for SuggestionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&tag))
    }
}

/// One structured suggestion produced by the AI collaborator.
///
/// `original` must exactly match a substring of the live document at
/// acceptance time, or application fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Service-assigned identifier.
    pub id: String,
    /// Suggestion category (`type` on the wire).
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    /// Exact text to replace.
    pub original: String,
    /// Replacement text.
    pub suggested: String,
    /// Surrounding text the service used to anchor the suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// One-based line hint from the service; display-only, never trusted for
    /// location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    /// Human-readable justification shown next to the suggestion.
    pub reason: String,
}

impl Suggestion {
    /// Apply this suggestion to `engine`, replacing the first occurrence of
    /// [`original`](Self::original) with [`suggested`](Self::suggested).
    ///
    /// Returns the engine's verdict. On `true` the caller is responsible for
    /// removing this suggestion from any pending list it maintains.
    pub fn apply_to<S: TextSurface>(&self, engine: &mut DocumentEngine<S>) -> bool {
        engine.apply_suggestion(&self.original, &self.suggested)
    }
}

/// Envelope for one conversational turn from the suggestion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Natural-language reply accompanying the suggestions.
    pub content: String,
    /// Structured suggestions, possibly empty for conversational turns.
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Failure to decode a suggestion payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload was not valid JSON for the expected shape.
    #[error("invalid suggestion payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a full [`ChatResponse`] from the service's JSON.
pub fn parse_response(json: &str) -> Result<ChatResponse, DecodeError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a single [`Suggestion`] from JSON.
pub fn parse_suggestion(json: &str) -> Result<Suggestion, DecodeError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_suggestion() {
        let json = r#"{
            "id": "sug-42",
            "type": "paraphrase",
            "original": "in order to",
            "suggested": "to",
            "context": "changes are required in order to proceed",
            "lineNumber": 7,
            "reason": "Tighter phrasing."
        }"#;
        let suggestion = parse_suggestion(json).unwrap();
        assert_eq!(suggestion.kind, SuggestionKind::Paraphrase);
        assert_eq!(suggestion.original, "in order to");
        assert_eq!(suggestion.line_number, Some(7));
        assert_eq!(suggestion.context.as_deref(), Some("changes are required in order to proceed"));
    }

    #[test]
    fn test_decode_minimal_suggestion() {
        let json = r#"{
            "id": "sug-1",
            "type": "grammar",
            "original": "their",
            "suggested": "there",
            "reason": "Wrong homophone."
        }"#;
        let suggestion = parse_suggestion(json).unwrap();
        assert_eq!(suggestion.context, None);
        assert_eq!(suggestion.line_number, None);
    }

    #[test]
    fn test_null_line_number_decodes_as_none() {
        let json = r#"{
            "id": "sug-2",
            "type": "style",
            "original": "very unique",
            "suggested": "unique",
            "lineNumber": null,
            "reason": "Redundant intensifier."
        }"#;
        let suggestion = parse_suggestion(json).unwrap();
        assert_eq!(suggestion.line_number, None);
    }

    #[test]
    fn test_unknown_kind_decodes_as_other() {
        let json = r#"{
            "id": "sug-3",
            "type": "vibes",
            "original": "a",
            "suggested": "b",
            "reason": "The model got creative."
        }"#;
        let suggestion = parse_suggestion(json).unwrap();
        assert_eq!(suggestion.kind, SuggestionKind::Other);
    }

    #[test]
    fn test_kind_roundtrips_known_tags() {
        for kind in [
            SuggestionKind::Grammar,
            SuggestionKind::Paraphrase,
            SuggestionKind::Consistency,
            SuggestionKind::Citation,
            SuggestionKind::Plagiarism,
            SuggestionKind::Style,
            SuggestionKind::Other,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_response_with_empty_suggestions() {
        let json = r#"{"content": "Just chatting."}"#;
        let response = parse_response(json).unwrap();
        assert_eq!(response.content, "Just chatting.");
        assert!(response.suggestions.is_empty());
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        assert!(parse_response("{").is_err());
        assert!(parse_suggestion(r#"{"id": "x"}"#).is_err());
    }
}
