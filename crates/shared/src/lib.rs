//! Shared types and configuration for Innkeep.
//!
//! This crate provides common types used across all other crates:
//! - Document number formats (folio, reservation, bill, ticket)
//! - Pagination types for list endpoints
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
