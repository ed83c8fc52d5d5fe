//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod capacity;
pub mod config;
pub mod credentials;
pub mod error;

pub use capacity::{
    AvailabilityDomain, CapacityReport, CompartmentId, DomainResult, ProbeOutcome, ProbeResult,
    RunSummary, ShapeAvailability, ShapeConfig, ShapeProbe, ShapeTarget, select_targets,
};
pub use config::{FreetierConfig, validate_config_key, validate_config_value};
pub use error::{CheckError, ConfigError, CredentialError, ProviderError};
