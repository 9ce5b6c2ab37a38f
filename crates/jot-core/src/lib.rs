//! jot-core - Core library for Jot
//!
//! This crate contains the shared models, the notes backend API client, and
//! the view state container used by all Jot interfaces (CLI today).

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod util;

pub use client::NotesClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::Note;
pub use store::{NotesStore, Snapshot};
