//! Rolling session context for the A.R.I.A. legal assistant.
//!
//! A bounded, per-session summary of recent conversation that a chat
//! collaborator reads before composing a prompt and extends after each turn.
//! The store is exposed over a small authenticated HTTP gateway.

pub mod channels;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod settings;
