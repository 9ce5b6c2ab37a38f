use std::io::{self, IsTerminal, Read};

use chrono::{DateTime, Utc};
use jot_core::{ClientConfig, Note, NotesClient};
use serde::Serialize;

use crate::error::CliError;

/// Message shown when the backend holds no notes.
pub const EMPTY_LIST_MESSAGE: &str = "No notes yet. Add one above!";

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub preview: String,
    pub content: String,
    pub created_at: Option<String>,
    pub relative_time: Option<String>,
}

pub fn build_client(api_url: Option<String>) -> Result<NotesClient, CliError> {
    let config = ClientConfig::from_env(api_url)?;
    Ok(NotesClient::new(&config)?)
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now = Utc::now();
    notes
        .iter()
        .map(|note| {
            let short_id = note.id.chars().take(13).collect::<String>();
            let preview = note_preview(note, 40);
            let age = note
                .created_at
                .as_deref()
                .map(|raw| format_created_at(raw, now));

            age.map_or_else(
                || format!("{short_id:<13}  {preview}"),
                |age| format!("{short_id:<13}  {preview:<40}  {age}"),
            )
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now = Utc::now();
    NoteListItem {
        id: note.id.clone(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        created_at: note.created_at.clone(),
        relative_time: note
            .created_at
            .as_deref()
            .map(|raw| format_created_at(raw, now)),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note.content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

/// Relative age when the timestamp parses as RFC 3339, the raw string
/// otherwise. The value is display-only; ordering never depends on it.
pub fn format_created_at(raw: &str, now: DateTime<Utc>) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |created| {
            format_relative_time(
                created.with_timezone(&Utc).timestamp_millis(),
                now.timestamp_millis(),
            )
        },
    )
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}
