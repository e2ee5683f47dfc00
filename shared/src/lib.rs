//! Shared types for the Roster service
//!
//! Employee models, the validation policy for employee records, date
//! helpers and the unified error system used by the server and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Employee, EmployeeCreate, EmployeeUpdate, EmployeeValidationError};
