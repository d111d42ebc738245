//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! - [`persistence`] - SQLite repository implementations

pub mod persistence;
