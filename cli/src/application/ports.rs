//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;

use anyhow::Result;

use crate::domain::{
    AvailabilityDomain, CapacityReport, CompartmentId, CredentialError, FreetierConfig,
    ProviderError, ShapeProbe,
};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or outlives the
    /// runner's timeout. A timed-out child is killed.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
}

// ── Credential Port ───────────────────────────────────────────────────────────

/// Produces the compartment id every provider call is scoped to.
pub trait CredentialSource {
    /// Resolve the compartment/tenancy id.
    ///
    /// # Errors
    ///
    /// Returns a `CredentialError` when no valid id can be determined.
    fn resolve_compartment_id(&self) -> Result<CompartmentId, CredentialError>;
}

// ── Provider Port ─────────────────────────────────────────────────────────────

/// Cloud provider operations the capacity check depends on.
#[allow(async_fn_in_trait)]
pub trait CapacityProvider {
    /// List availability domains in the compartment, in provider order.
    async fn list_availability_domains(
        &self,
        compartment: &CompartmentId,
    ) -> Result<Vec<AvailabilityDomain>, ProviderError>;

    /// Request a compute capacity report for `probes` in one domain.
    async fn capacity_report(
        &self,
        compartment: &CompartmentId,
        domain: &AvailabilityDomain,
        probes: &[ShapeProbe],
    ) -> Result<CapacityReport, ProviderError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a neutral informational message.
    fn info(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading and saving the freetier configuration file.
pub trait ConfigStore {
    /// Load the configuration, returning defaults if no file exists.
    fn load(&self) -> Result<FreetierConfig>;
    /// Persist the configuration.
    fn save(&self, config: &FreetierConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
