//! The notes view component: wires the API client to the state container.
//!
//! Reconciliation model: every successful mutation is followed by a full
//! re-fetch, so the published snapshot always equals server state as of the
//! most recent successful list call. The client never predicts a mutation's
//! effect locally.

use std::sync::Arc;

use crate::api::NotesApiClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::store::{NotesStore, Operation, Snapshot};

/// Client component owning the API client and the published view state.
pub struct NotesClient {
    api: NotesApiClient,
    store: Arc<NotesStore>,
}

impl NotesClient {
    /// Builds a client against the configured backend with a fresh store.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            api: NotesApiClient::new(config)?,
            store: Arc::new(NotesStore::new()),
        })
    }

    /// The shared state container, for subscriptions and direct reads.
    #[must_use]
    pub fn store(&self) -> &Arc<NotesStore> {
        &self.store
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> Snapshot {
        self.store.state()
    }

    /// Replaces the collection with a fresh server snapshot.
    ///
    /// On failure the previous collection is kept as-is and the message is
    /// recorded; the caller may simply re-invoke. A response that loses the
    /// race to a newer list call is discarded.
    pub async fn list(&self) -> Result<()> {
        let seq = self.store.next_list_seq();
        self.store.begin(Operation::List);

        match self.api.fetch_notes().await {
            Ok(notes) => {
                if !self.store.apply_notes(seq, notes) {
                    tracing::debug!(seq, "Discarded stale list response");
                }
                self.store.finish(Operation::List);
                Ok(())
            }
            Err(error) => {
                self.store.fail(Operation::List, error.to_string());
                Err(error)
            }
        }
    }

    /// Creates a note, then re-fetches the authoritative collection.
    ///
    /// Whitespace-only content is rejected before any network call. The
    /// create response body is discarded by design; the follow-up list is
    /// the source of truth for server-assigned fields. On success the draft
    /// buffer is cleared; on failure it is preserved so the user can retry
    /// without retyping.
    pub async fn create(&self, content: &str) -> Result<()> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            let error = Error::EmptyContent;
            self.store.fail(Operation::Create, error.to_string());
            return Err(error);
        }

        self.store.begin(Operation::Create);
        match self.api.create_note(trimmed).await {
            Ok(()) => {
                self.store.finish(Operation::Create);
                self.store.clear_draft();
                self.list().await
            }
            Err(error) => {
                self.store.fail(Operation::Create, error.to_string());
                Err(error)
            }
        }
    }

    /// Submits the current draft buffer as a new note.
    pub async fn submit_draft(&self) -> Result<()> {
        let draft = self.state().draft;
        self.create(&draft).await
    }

    /// Deletes a note, then re-fetches the collection unconditionally.
    ///
    /// A failed delete is surfaced as an error, but the re-fetch still runs
    /// first so the view matches server truth either way; the delete failure
    /// is recorded after the fetch so it survives the fetch's error reset.
    /// Deleting an id the backend answers 2xx for remains a silent no-op.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.begin(Operation::Delete);
        let deleted = self.api.delete_note(id).await;
        self.store.finish(Operation::Delete);

        let listed = self.list().await;

        if let Err(error) = deleted {
            tracing::warn!(id, "Delete failed: {error}");
            self.store.record_error(error.to_string());
            return Err(error);
        }
        listed
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    use pretty_assertions::assert_eq;

    use super::*;

    // Nothing listens on TCP port 9 (discard); connecting fails immediately,
    // which exercises the transport-error paths without a live backend.
    fn unreachable_client() -> NotesClient {
        let config = ClientConfig::new("http://127.0.0.1:9/api").unwrap();
        NotesClient::new(&config).unwrap()
    }

    /// Minimal HTTP/1.1 backend answering each request from a canned
    /// method+path table, one connection per request.
    ///
    /// Returns the base URL to point a client at. Unknown routes get a 404
    /// with an empty body.
    fn spawn_backend(routes: Vec<(&'static str, &'static str, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind backend listener");
        let base_url = format!("http://{}", listener.local_addr().expect("backend addr"));

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let request = read_request(&mut stream);
                let mut request_line = request.lines().next().unwrap_or("").split_whitespace();
                let method = request_line.next().unwrap_or("");
                let path = request_line.next().unwrap_or("");

                let (status, body) = routes
                    .iter()
                    .find(|(route_method, route_path, _)| {
                        *route_method == method && *route_path == path
                    })
                    .map_or(("404 Not Found", ""), |(_, _, body)| ("200 OK", *body));

                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        base_url
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buffer = [0u8; 4096];
        let mut raw = Vec::new();
        loop {
            let Ok(read) = stream.read(&mut buffer) else { break };
            if read == 0 {
                break;
            }
            raw.extend_from_slice(&buffer[..read]);

            if let Some(header_end) = raw.windows(4).position(|window| window == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&raw[..header_end]).to_string();
                let content_length = headers
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if raw.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&raw).to_string()
    }

    fn client_for(base_url: &str) -> NotesClient {
        let config = ClientConfig::new(format!("{base_url}/api")).unwrap();
        NotesClient::new(&config).unwrap()
    }

    fn contents(snapshot: &Snapshot) -> Vec<String> {
        snapshot
            .notes
            .iter()
            .map(|note| note.content.clone())
            .collect()
    }

    #[tokio::test]
    async fn create_reconciles_from_follow_up_list() {
        // The create response body deliberately disagrees with the list
        // response; the store must reflect only the latter.
        let base_url = spawn_backend(vec![
            (
                "POST",
                "/api/notes",
                r#"{"_id":"server-id","content":"Server says something else"}"#,
            ),
            (
                "GET",
                "/api/notes",
                r#"[{"_id":"n1","content":"Buy milk","createdAt":"2026-08-30T10:00:00Z"}]"#,
            ),
        ]);
        let client = client_for(&base_url);
        client.store().set_draft("Buy milk");

        client.submit_draft().await.unwrap();

        let state = client.state();
        assert_eq!(contents(&state), vec!["Buy milk"]);
        assert_eq!(state.draft, "");
        assert_eq!(state.last_error, None);
        assert!(!state.is_busy());
    }

    #[tokio::test]
    async fn delete_reconciles_from_follow_up_list() {
        let base_url = spawn_backend(vec![
            ("DELETE", "/api/notes/n1", "{}"),
            ("GET", "/api/notes", r#"[{"_id":"n2","content":"Still here"}]"#),
        ]);
        let client = client_for(&base_url);

        client.delete("n1").await.unwrap();

        let state = client.state();
        assert_eq!(contents(&state), vec!["Still here"]);
        assert_eq!(state.last_error, None);
        assert!(!state.is_busy());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_a_silent_no_op() {
        // The backend answers 2xx for ids it no longer holds; the follow-up
        // list still runs and the final state is server truth, no error.
        let base_url = spawn_backend(vec![
            ("DELETE", "/api/notes/abc123", "{}"),
            ("GET", "/api/notes", r#"[{"_id":"n3","content":"Unrelated"}]"#),
        ]);
        let client = client_for(&base_url);

        client.delete("abc123").await.unwrap();

        let state = client.state();
        assert_eq!(contents(&state), vec!["Unrelated"]);
        assert_eq!(state.last_error, None);
    }

    #[tokio::test]
    async fn create_rejects_empty_content_without_network() {
        let client = unreachable_client();

        let result = client.create("   ").await;
        assert!(matches!(result, Err(Error::EmptyContent)));

        let state = client.state();
        assert!(!state.is_busy());
        assert_eq!(
            state.last_error.as_deref(),
            Some("Note content cannot be empty.")
        );
        assert!(state.notes.is_empty());
    }

    #[tokio::test]
    async fn submit_draft_rejects_empty_draft_and_preserves_it() {
        let client = unreachable_client();
        client.store().set_draft("  ");

        assert!(client.submit_draft().await.is_err());
        assert_eq!(client.state().draft, "  ");
    }

    #[tokio::test]
    async fn list_failure_keeps_previous_notes() {
        let client = unreachable_client();

        let result = client.list().await;
        assert!(matches!(result, Err(Error::Transport(_))));

        let state = client.state();
        assert!(state.notes.is_empty());
        assert!(!state.is_busy());
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn delete_failure_is_surfaced_after_reconcile() {
        let client = unreachable_client();

        let result = client.delete("abc123").await;
        assert!(result.is_err());

        let state = client.state();
        assert!(!state.is_busy());
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn create_failure_preserves_draft() {
        let client = unreachable_client();
        client.store().set_draft("Buy milk");

        assert!(client.submit_draft().await.is_err());

        let state = client.state();
        assert_eq!(state.draft, "Buy milk");
        assert!(state.last_error.is_some());
    }
}
