//! fmhub Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the fmhub catalog.
//!
//! # Overview
//!
//! This crate provides common functionality used across all fmhub workspace
//! members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Checksums**: File integrity verification for uploaded model files
//! - **Logging**: Centralized tracing setup
//! - **Types**: Shared domain types (ORCID identifiers, pagination)
//!
//! # Example
//!
//! ```no_run
//! use fmhub_common::{Result, FmhubError};
//! use fmhub_common::checksum::{compute_file_checksum, ChecksumAlgorithm};
//!
//! fn register_upload(path: &str) -> Result<String> {
//!     let checksum = compute_file_checksum(path, ChecksumAlgorithm::Sha256)?;
//!     Ok(checksum)
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use checksum::ChecksumAlgorithm;
pub use error::{FmhubError, Result};
