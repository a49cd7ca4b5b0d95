//! # signup-audit-api
//!
//! Shared API types for the signup-audit service.
//! Nothing here depends on the HTTP stack, so the same types can be reused
//! by a client or a frontend build.
//!
//! ## Features
//!
//! - The persisted record shape (`UserRecord`)
//! - Request DTOs (`SignupRequest`, `LoginRequest`)
//! - Response DTOs (`SignupResponse`, `LoginResponse`, listings)
//! - Error response format (`ErrorResponse`)
//!
//! ## Example
//!
//! ```rust
//! use signup_audit_api::LoginRequest;
//!
//! let request = LoginRequest {
//!     identifier: Some("alice".to_string()),
//!     password: Some("secret1".to_string()),
//! };
//! assert!(request.identifier.is_some());
//! ```

pub mod error;
pub mod record;
pub mod requests;
pub mod responses;

// Re-exports for convenient access
pub use error::ErrorResponse;
pub use record::{FAILED_LOGIN_NAME, UserRecord};
pub use requests::*;
pub use responses::*;
