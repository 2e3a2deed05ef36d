//! Shared types for the member registry
//!
//! Common types used by every registry crate: the canonical member model,
//! error codes and the API response envelope, plus small time helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Gender, Member, MemberField, MemberRecord, MembershipType, PartyUnit, Religion};
