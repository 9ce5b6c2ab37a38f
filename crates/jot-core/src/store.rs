//! Immutable-snapshot state container for the notes view.
//!
//! Every mutation publishes a complete replacement `Snapshot` and notifies
//! subscribers; readers never observe a partially updated collection. List
//! responses carry a sequence number so an overlapping fetch that loses the
//! race cannot overwrite a newer snapshot.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::Note;

/// The three network-backed operations tracked by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Delete,
}

/// Per-operation in-flight flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pending {
    pub list: bool,
    pub create: bool,
    pub delete: bool,
}

impl Pending {
    /// True while any operation is in flight; gates resubmission in the UI.
    #[must_use]
    pub const fn any(self) -> bool {
        self.list || self.create || self.delete
    }

    fn flag_mut(&mut self, operation: Operation) -> &mut bool {
        match operation {
            Operation::List => &mut self.list,
            Operation::Create => &mut self.create,
            Operation::Delete => &mut self.delete,
        }
    }
}

/// One immutable view of client state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Full replacement copy of the server collection from the most recent
    /// successfully applied list call; never incrementally patched.
    pub notes: Vec<Note>,
    /// Per-operation in-flight flags.
    pub pending: Pending,
    /// Message from the most recent failed operation, cleared when a new
    /// attempt starts.
    pub last_error: Option<String>,
    /// Create-form input buffer; preserved on failure, cleared on success.
    pub draft: String,
}

impl Snapshot {
    /// Notes in display order, most recent first.
    ///
    /// The backend returns ascending creation order; presentation reverses
    /// it. Pure transform, not stored state.
    #[must_use]
    pub fn display_notes(&self) -> Vec<Note> {
        self.notes.iter().rev().cloned().collect()
    }

    /// True while any operation is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.pending.any()
    }
}

/// Handle returned by [`NotesStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&Snapshot) + Send + Sync>;

struct Inner {
    snapshot: Snapshot,
    applied_list_seq: u64,
}

/// State container owning the current snapshot.
///
/// Listeners are invoked with each published snapshot while the listener
/// table is locked, so they must not subscribe or unsubscribe reentrantly.
pub struct NotesStore {
    inner: Mutex<Inner>,
    listeners: Mutex<HashMap<u64, Listener>>,
    next_listener_id: AtomicU64,
    list_seq: AtomicU64,
}

impl NotesStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                snapshot: Snapshot::default(),
                applied_list_seq: 0,
            }),
            listeners: Mutex::new(HashMap::new()),
            next_listener_id: AtomicU64::new(1),
            list_seq: AtomicU64::new(1),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> Snapshot {
        self.lock_inner().snapshot.clone()
    }

    /// Registers a listener invoked with every newly published snapshot.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Snapshot) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock_listeners().insert(id, Box::new(listener));
        SubscriptionId(id)
    }

    /// Removes a previously registered listener.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.lock_listeners().remove(&id.0);
    }

    /// Allocates the sequence number for a new list invocation.
    ///
    /// Monotonically increasing; the matching [`Self::apply_notes`] call is
    /// discarded if a newer sequence has been applied in the meantime.
    pub fn next_list_seq(&self) -> u64 {
        self.list_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Marks an operation in flight and clears the previous error.
    pub fn begin(&self, operation: Operation) {
        self.mutate(|snapshot| {
            *snapshot.pending.flag_mut(operation) = true;
            snapshot.last_error = None;
        });
    }

    /// Clears an operation's pending flag.
    pub fn finish(&self, operation: Operation) {
        self.mutate(|snapshot| {
            *snapshot.pending.flag_mut(operation) = false;
        });
    }

    /// Clears an operation's pending flag and records its failure message.
    pub fn fail(&self, operation: Operation, message: impl Into<String>) {
        let message = message.into();
        self.mutate(|snapshot| {
            *snapshot.pending.flag_mut(operation) = false;
            snapshot.last_error = Some(message);
        });
    }

    /// Records an error without touching pending flags.
    pub fn record_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.mutate(|snapshot| {
            snapshot.last_error = Some(message);
        });
    }

    /// Replaces the collection with the snapshot fetched under `seq`.
    ///
    /// Returns `false` when a response with a newer sequence number has
    /// already been applied; the stale response is discarded wholesale and
    /// nothing is published.
    pub fn apply_notes(&self, seq: u64, notes: Vec<Note>) -> bool {
        let snapshot = {
            let mut inner = self.lock_inner();
            if seq <= inner.applied_list_seq {
                return false;
            }
            inner.applied_list_seq = seq;
            inner.snapshot.notes = notes;
            inner.snapshot.clone()
        };
        self.publish(&snapshot);
        true
    }

    /// Updates the create-form draft buffer.
    pub fn set_draft(&self, draft: impl Into<String>) {
        let draft = draft.into();
        self.mutate(|snapshot| snapshot.draft = draft);
    }

    /// Clears the draft after a successful create.
    pub fn clear_draft(&self) {
        self.mutate(|snapshot| snapshot.draft.clear());
    }

    fn mutate(&self, apply: impl FnOnce(&mut Snapshot)) {
        let snapshot = {
            let mut inner = self.lock_inner();
            apply(&mut inner.snapshot);
            inner.snapshot.clone()
        };
        self.publish(&snapshot);
    }

    fn publish(&self, snapshot: &Snapshot) {
        let listeners = self.lock_listeners();
        for listener in listeners.values() {
            listener(snapshot);
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, HashMap<u64, Listener>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NotesStore {
    fn default() -> Self {
        Self::new()
    }
}
