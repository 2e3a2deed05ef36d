//! Data models
//!
//! Shared between the import pipeline, the registry client and the frontend
//! (via API). Field names serialize in camelCase to match the REST payloads.

pub mod member;

// Re-exports
pub use member::*;
