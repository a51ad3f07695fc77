//! Feature modules organized by aggregate
//!
//! Each feature follows the same layout: `commands/` for writes, `queries/`
//! for reads, one file per operation with its request, response, error type,
//! handler, and tests.

pub mod datasets;
pub mod feature_models;
pub mod shared;
