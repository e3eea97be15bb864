//! Inbound channels. The web gateway is the only one.

pub mod web;
