//! Session context store.
//!
//! Keeps a bounded rolling summary per chat session so the chat collaborator
//! can send recent context to a completion API without keeping full
//! transcripts.
//!
//! ```text
//! GatewayState
//! └── Arc<dyn SummaryStore>
//!     └── InMemorySummaryStore
//!         └── DashMap<session_id, SessionState>
//!             ├── summary       (<= max_chars chars)
//!             └── last_updated  (read by the idle sweeper)
//! ```
//!
//! State lives for the lifetime of the process. Callers that need durability
//! must persist `get_summary` results themselves, or plug a durable backend in
//! behind [`SummaryStore`].

pub mod compress;
pub mod memory;
pub mod sweeper;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ContextStoreError;

pub use compress::{DEFAULT_MAX_CHARS, merge_and_bound, tail_truncate};
pub use memory::InMemorySummaryStore;
pub use sweeper::spawn_idle_sweeper;

/// Rolling summary for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub summary: String,
    pub last_updated: DateTime<Utc>,
}

impl SessionState {
    pub fn new(summary: String) -> Self {
        Self {
            summary,
            last_updated: Utc::now(),
        }
    }
}

/// Backend-agnostic session summary store.
///
/// Every operation is atomic per session id. Operations on different ids
/// must not serialize behind one another.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Full state for a session, or `None` if it has never been written or
    /// has been reset.
    async fn get_state(&self, session_id: &str)
    -> Result<Option<SessionState>, ContextStoreError>;

    /// Current summary text. An existing empty summary is `Some("")`.
    async fn get_summary(&self, session_id: &str) -> Result<Option<String>, ContextStoreError> {
        Ok(self.get_state(session_id).await?.map(|state| state.summary))
    }

    /// Append `new_text` on a new line, trim, and keep the most recent
    /// characters up to the store's bound. Creates the session if absent.
    ///
    /// Returns the state this append produced, even if another writer
    /// replaces it immediately afterwards.
    async fn append_and_compress(
        &self,
        session_id: &str,
        new_text: &str,
    ) -> Result<SessionState, ContextStoreError>;

    /// Replace the summary outright, keeping the most recent characters up to
    /// the store's bound.
    async fn set_summary(&self, session_id: &str, summary: &str) -> Result<(), ContextStoreError>;

    /// Remove a session. Returns whether it existed; removing an absent
    /// session is not an error.
    async fn reset_session(&self, session_id: &str) -> Result<bool, ContextStoreError>;

    /// Remove sessions not updated within `max_idle`. Returns the number removed.
    async fn evict_idle(&self, max_idle: Duration) -> Result<usize, ContextStoreError>;

    /// Number of live sessions.
    async fn session_count(&self) -> Result<usize, ContextStoreError>;
}
