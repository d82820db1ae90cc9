//! # chirpdb
//!
//! A users/posts service backed by a single-file JSON document store:
//! - Whole dataset loaded, mutated and rewritten on every write
//! - Referential check: posts can only be created for existing users
//! - Single-writer/multi-reader lock around each read-modify-write cycle
//! - HTTP/JSON API
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server                             │
//! │                   (axum, tokio)                              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  spawn_blocking
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Document Store                             │
//! │            (Single Writer / Multi Reader)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  load → mutate → save
//!                       ▼
//!               ┌───────────────┐
//!               │    Codec      │
//!               │   (JSON)      │
//!               └───────┬───────┘
//!                       ▼
//!               ┌───────────────┐
//!               │   db.json     │
//!               │   (0600)      │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod storage;
pub mod store;
pub mod api;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ChirpError, Result};
pub use config::Config;
pub use model::{Dataset, Post, User};
pub use store::DocumentStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of chirpdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
