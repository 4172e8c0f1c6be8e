//! Tab registry: the set of open documents and which one is active.
//!
//! `TabRegistry` owns every `Document`, hands out stable `DocumentId`s and
//! routes open/save through a `core_io::Persistence` backend. It is a plain
//! value owned by its host; `SharedRegistry` wraps one for hosts that call in
//! from several threads.
//!
//! Core invariants (must hold after every public call):
//! * at least one document is open;
//! * the active index always names an open document;
//! * ids are never reused for the lifetime of a registry;
//! * a failed open or save leaves every document exactly as it was.

use core_io::PersistError;
use core_state::DocumentId;
use thiserror::Error;

mod registry;
mod shared;

pub use registry::{RegistryOptions, TabRegistry};
pub use shared::SharedRegistry;

/// Failure of a registry operation.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No file path set")]
    NoPathSet,
    #[error("Unknown tab id {0}")]
    UnknownTab(DocumentId),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Flat classification of `EditorError` for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NoPathSet,
    UnknownTab,
    NotFound,
    PermissionDenied,
    InvalidData,
    Io,
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoPathSet => ErrorKind::NoPathSet,
            Self::UnknownTab(_) => ErrorKind::UnknownTab,
            Self::Persist(PersistError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Persist(PersistError::PermissionDenied { .. }) => ErrorKind::PermissionDenied,
            Self::Persist(PersistError::InvalidData { .. }) => ErrorKind::InvalidData,
            Self::Persist(PersistError::Io { .. }) => ErrorKind::Io,
        }
    }
}
