//! Dataset aggregate operations

pub mod commands;
pub mod queries;
