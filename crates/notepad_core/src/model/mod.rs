//! Post model: the shared contract, its variants and their row mapping.
//!
//! # Responsibility
//! - Define the `Post` trait and the base fields every variant carries.
//! - Provide the memo/task/link variants and the countdown used by tasks.
//!
//! # Invariants
//! - Every variant serializes `type` and `created_at` through `PostBase`.
//! - Variants never remove base columns when merging their own.

pub mod countdown;
pub mod dates;
pub mod intake;
pub mod link;
pub mod memo;
pub mod post;
pub mod row;
pub mod task;
