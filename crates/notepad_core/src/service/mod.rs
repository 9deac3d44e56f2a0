//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate registry, store and export calls into use-case level APIs.
//! - Keep the CLI decoupled from storage details.

pub mod post_service;
