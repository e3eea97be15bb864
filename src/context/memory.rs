//! In-memory summary store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;

use crate::context::compress::{DEFAULT_MAX_CHARS, merge_and_bound, tail_truncate};
use crate::context::{SessionState, SummaryStore};
use crate::error::ContextStoreError;

/// Process-local session summaries.
///
/// Each mutation runs its read-modify-write while holding the write lock of
/// the shard that owns the session id, so concurrent writers on one session
/// serialize and writers on other shards proceed independently.
pub struct InMemorySummaryStore {
    sessions: DashMap<String, SessionState>,
    max_chars: usize,
}

impl Default for InMemorySummaryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl InMemorySummaryStore {
    /// Create an empty store bounding every summary to `max_chars` characters.
    pub fn new(max_chars: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_chars,
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Current summary for a session.
    pub fn summary(&self, session_id: &str) -> Option<String> {
        self.sessions
            .get(session_id)
            .map(|state| state.summary.clone())
    }

    /// Snapshot of a session's state.
    pub fn state(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.get(session_id).map(|state| state.value().clone())
    }

    /// Merge `new_text` into the session's summary and return the state it
    /// produced. The snapshot is taken before the shard lock is released.
    pub fn append(&self, session_id: &str, new_text: &str) -> SessionState {
        let max_chars = self.max_chars;
        self.sessions
            .entry(session_id.to_string())
            .and_modify(|state| {
                state.summary = merge_and_bound(Some(&state.summary), new_text, max_chars);
                state.last_updated = Utc::now();
            })
            .or_insert_with(|| SessionState::new(merge_and_bound(None, new_text, max_chars)))
            .value()
            .clone()
    }

    /// Replace the session's summary.
    pub fn set(&self, session_id: &str, summary: &str) {
        let bounded = tail_truncate(summary, self.max_chars).to_string();
        self.sessions
            .insert(session_id.to_string(), SessionState::new(bounded));
    }

    /// Drop a session. Returns whether it existed.
    pub fn reset(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Drop every session last updated at or before `cutoff`.
    pub fn evict_idle_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut evicted = 0;
        self.sessions.retain(|_, state| {
            let keep = state.last_updated > cutoff;
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SummaryStore for InMemorySummaryStore {
    async fn get_state(
        &self,
        session_id: &str,
    ) -> Result<Option<SessionState>, ContextStoreError> {
        Ok(self.state(session_id))
    }

    async fn get_summary(&self, session_id: &str) -> Result<Option<String>, ContextStoreError> {
        Ok(self.summary(session_id))
    }

    async fn append_and_compress(
        &self,
        session_id: &str,
        new_text: &str,
    ) -> Result<SessionState, ContextStoreError> {
        Ok(self.append(session_id, new_text))
    }

    async fn set_summary(&self, session_id: &str, summary: &str) -> Result<(), ContextStoreError> {
        self.set(session_id, summary);
        Ok(())
    }

    async fn reset_session(&self, session_id: &str) -> Result<bool, ContextStoreError> {
        Ok(self.reset(session_id))
    }

    async fn evict_idle(&self, max_idle: Duration) -> Result<usize, ContextStoreError> {
        // A TTL too large to represent means nothing can be idle that long.
        let Some(cutoff) = TimeDelta::from_std(max_idle)
            .ok()
            .and_then(|delta| Utc::now().checked_sub_signed(delta))
        else {
            return Ok(0);
        };
        Ok(self.evict_idle_before(cutoff))
    }

    async fn session_count(&self) -> Result<usize, ContextStoreError> {
        Ok(self.len())
    }
}
