//! Shared report types for freetier capacity checks.

pub mod types;

pub use types::*;
