//! Model Module
//!
//! Entities kept in the database file.
//!
//! ## Entities
//! - `User`: keyed by email, no generated id
//! - `Post`: keyed by a random UUID, references its author by email
//! - `Dataset`: both collections together, the unit of persistence
//!
//! All field names are camelCase on the wire (`createdAt`, `userEmail`).

mod user;
mod post;
mod dataset;

pub use user::User;
pub use post::Post;
pub use dataset::Dataset;
