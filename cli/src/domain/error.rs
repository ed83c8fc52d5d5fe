//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Credential errors ─────────────────────────────────────────────────────────

/// Errors raised while resolving the compartment/tenancy identifier.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("OCI config file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("cannot read OCI config file {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("no tenancy= entry for profile [{profile}] in {}", .path.display())]
    MissingTenancy { path: PathBuf, profile: String },

    #[error("invalid compartment id '{0}': expected an OCID like ocid1.tenancy.oc1..<id>")]
    InvalidOcid(String),

    #[error("cannot determine home directory")]
    NoHomeDir,
}

// ── Provider errors ───────────────────────────────────────────────────────────

/// Errors raised by a provider call. `operation` names the call for log lines.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("{operation}: {message}")]
    Exec { operation: String, message: String },

    #[error("{operation} exited with {}: {}", exit_code_display(.code), .stderr.trim())]
    CommandFailed {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{operation}: malformed response: {message}")]
    MalformedResponse { operation: String, message: String },
}

#[allow(clippy::ref_option)]
fn exit_code_display(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("status {c}"))
}

// ── Check errors ──────────────────────────────────────────────────────────────

/// Fatal setup failures that abort a capacity check before any probe runs.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Could not determine compartment/tenancy ID: {0}")]
    NoCompartment(#[from] CredentialError),

    #[error("Could not fetch availability domains: {0}")]
    DomainListing(#[from] ProviderError),

    #[error("No availability domains returned for compartment {0}")]
    NoDomains(String),
}

impl CheckError {
    /// Stable machine-readable code for JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::NoCompartment(_) => "NO_COMPARTMENT",
            CheckError::DomainListing(_) => "DOMAIN_LISTING_FAILED",
            CheckError::NoDomains(_) => "NO_DOMAINS",
        }
    }

    /// Remediation hint shown below the error in human output.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            CheckError::NoCompartment(_) => "Please ensure OCI CLI is configured: oci setup config",
            CheckError::DomainListing(_) | CheckError::NoDomains(_) => {
                "Verify the OCI CLI works: oci iam availability-domain list"
            }
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}
