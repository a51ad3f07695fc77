//! Marker traits separating writes from reads
//!
//! Every request dispatched through the mediator tags itself as a command or
//! a query. The split keeps the read/write boundary visible at the type
//! level and gives cross-cutting middleware a hook to discriminate on.

/// A request that mutates catalog state
pub trait Command {}

/// A request that only reads catalog state
pub trait Query {}
