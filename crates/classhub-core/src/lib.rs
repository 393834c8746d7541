//! # Classhub Core
//!
//! Foundational types shared by every Classhub crate.
//!
//! - [`errors`]: the [`AppError`] type and its HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use classhub_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Class not found"));
//! assert_eq!(error.status, axum::http::StatusCode::NOT_FOUND);
//! ```

pub mod errors;

pub use errors::AppError;
