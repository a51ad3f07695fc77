//! Feature model operations

pub mod commands;
pub mod queries;
