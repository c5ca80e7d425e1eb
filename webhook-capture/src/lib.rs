//! Webhook capture service
//!
//! Records inbound webhook requests, optionally persists them to a blob
//! store, and echoes the capture back to the sender.

#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

/// Blob storage backends
pub mod blob_store;

/// Request capture and persistence
pub mod capture;

pub mod listing;

pub mod routes;

pub mod server;

/// Application state
pub mod state;

pub mod types;
