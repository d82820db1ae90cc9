//! Storage Module
//!
//! Persistence of the dataset as a single JSON file.
//!
//! ## Responsibilities
//! - Encode/decode the dataset (`codec`)
//! - Read and rewrite the database file as a whole (`file`)
//! - Create the file owner-read/write only
//!
//! ## Non-goals
//! - No atomic replace (the file is truncated and rewritten in place)
//! - No indexes, no migrations

pub mod codec;
mod file;

pub use codec::{decode, encode, encode_pretty};
pub use file::{DatabaseFile, FILE_MODE};
