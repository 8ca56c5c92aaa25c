//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate catalog, feed assembly and overlay into page-level APIs.
//! - Keep presentation layers decoupled from storage and store details.

pub mod feed_service;
