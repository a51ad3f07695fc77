//! Utilities shared across feature modules

pub mod validation;
