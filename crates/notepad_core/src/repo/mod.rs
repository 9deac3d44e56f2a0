//! Repository layer: persistence contracts and their SQLite implementation.
//!
//! # Responsibility
//! - Define the post store contract used by services and the CLI.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Backend failures surface as `StoreError::Db`, never as empty results.
//! - A lookup miss is a normal `None`, not an error.

pub mod post_repo;
