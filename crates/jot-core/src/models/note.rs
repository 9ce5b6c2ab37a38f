//! Note model and wire types for the notes backend.

use serde::{Deserialize, Serialize};

/// A note as stored by the backend.
///
/// The backend assigns `id` and `created_at`; the client never fabricates
/// either field and treats the id as an opaque, immutable string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Backend-assigned opaque identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Plain text content
    pub content: String,
    /// Creation timestamp string, informational only; display order is
    /// derived from list position, never from this value
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

/// Request body for creating a note.
#[derive(Debug, Serialize)]
pub struct CreateNote<'a> {
    pub content: &'a str,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn note_deserializes_wire_names() {
        let note: Note = serde_json::from_str(
            r#"{"_id":"abc123","content":"Buy milk","createdAt":"2026-08-30T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(note.id, "abc123");
        assert_eq!(note.content, "Buy milk");
        assert_eq!(note.created_at.as_deref(), Some("2026-08-30T10:00:00Z"));
    }

    #[test]
    fn note_deserializes_without_created_at() {
        let note: Note = serde_json::from_str(r#"{"_id":"abc123","content":"Buy milk"}"#).unwrap();
        assert_eq!(note.created_at, None);
    }

    #[test]
    fn note_ignores_unknown_fields() {
        let note: Note =
            serde_json::from_str(r#"{"_id":"abc123","content":"x","updatedAt":"ignored"}"#)
                .unwrap();
        assert_eq!(note.id, "abc123");
    }

    #[test]
    fn create_note_serializes_content_only() {
        let body = serde_json::to_string(&CreateNote { content: "Buy milk" }).unwrap();
        assert_eq!(body, r#"{"content":"Buy milk"}"#);
    }
}
