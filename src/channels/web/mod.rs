//! HTTP gateway for the session context store.
//!
//! ```text
//! chat collaborator ──HTTP──▶ auth_middleware ──▶ handlers ──▶ Arc<dyn SummaryStore>
//! ```

pub mod auth;
pub mod server;
pub mod types;
