//! Network Module
//!
//! HTTP listener and lifecycle.
//!
//! ## Architecture
//! - tokio accept loop driven by `axum::serve`
//! - Store calls run on tokio's blocking pool
//! - Graceful shutdown on Ctrl+C

mod server;

pub use server::{shutdown_signal, Server};
