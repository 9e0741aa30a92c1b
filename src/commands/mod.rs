//! Command handlers for Newschat
//!
//! Each CLI subcommand gets a handler module. Handlers are thin: they wire
//! up the service client, store, and pointer, invoke controller operations,
//! and render whatever state the controller exposes.

pub mod chat;
pub mod history;
pub mod ingest;
