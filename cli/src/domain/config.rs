//! Domain types and validators for freetier configuration.
//!
//! Pure functions only, no I/O.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::capacity::{CompartmentId, DEFAULT_AMPERE_MEMORY_GBS, DEFAULT_AMPERE_OCPUS};
use crate::domain::credentials::DEFAULT_PROFILE;
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "oci.cli",
    "oci.profile",
    "oci.config_file",
    "oci.compartment_id",
    "oci.timeout_secs",
    "ampere.ocpus",
    "ampere.memory_gbs",
];

/// Always Free Ampere allowance per tenancy.
pub const MAX_AMPERE_OCPUS: f64 = 4.0;
pub const MAX_AMPERE_MEMORY_GBS: f64 = 24.0;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.freetier/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FreetierConfig {
    /// OCI CLI and credential settings.
    pub oci: OciConfig,
    /// Sizing used when probing the flexible Ampere shape.
    pub ampere: AmpereConfig,
}

/// OCI CLI and credential settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OciConfig {
    /// Program name or path of the OCI CLI.
    pub cli: String,
    /// Profile section read from the OCI config file.
    pub profile: String,
    /// OCI config file; `~/.oci/config` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    /// Explicit compartment id; bypasses the OCI config file when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compartment_id: Option<String>,
    /// Per-command timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OciConfig {
    fn default() -> Self {
        Self {
            cli: "oci".to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            config_file: None,
            compartment_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Sizing for the `VM.Standard.A1.Flex` probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmpereConfig {
    pub ocpus: f64,
    pub memory_gbs: f64,
}

impl Default for AmpereConfig {
    fn default() -> Self {
        Self {
            ocpus: DEFAULT_AMPERE_OCPUS,
            memory_gbs: DEFAULT_AMPERE_MEMORY_GBS,
        }
    }
}

impl FreetierConfig {
    /// Apply an already-validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "oci.cli" => self.oci.cli = value.to_string(),
            "oci.profile" => self.oci.profile = value.to_string(),
            "oci.config_file" => self.oci.config_file = Some(value.to_string()),
            "oci.compartment_id" => self.oci.compartment_id = Some(value.trim().to_string()),
            "oci.timeout_secs" => self.oci.timeout_secs = value.parse()?,
            "ampere.ocpus" => self.ampere.ocpus = value.parse()?,
            "ampere.memory_gbs" => self.ampere.memory_gbs = value.parse()?,
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }

    /// Check every loaded value against the same rules `set` enforces.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` of the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let mut values = vec![
            ("oci.cli", self.oci.cli.clone()),
            ("oci.profile", self.oci.profile.clone()),
            ("oci.timeout_secs", self.oci.timeout_secs.to_string()),
            ("ampere.ocpus", self.ampere.ocpus.to_string()),
            ("ampere.memory_gbs", self.ampere.memory_gbs.to_string()),
        ];
        if let Some(path) = &self.oci.config_file {
            values.push(("oci.config_file", path.clone()));
        }
        if let Some(id) = &self.oci.compartment_id {
            values.push(("oci.compartment_id", id.clone()));
        }
        for (key, value) in &values {
            validate_config_value(key, value)?;
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |expected: &str| -> anyhow::Error {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
        .into()
    };

    match key {
        "oci.cli" | "oci.profile" | "oci.config_file" => {
            if value.trim().is_empty() {
                return Err(invalid("a non-empty string"));
            }
        }
        "oci.compartment_id" => {
            if CompartmentId::parse(value).is_err() {
                return Err(invalid("an OCID like ocid1.tenancy.oc1..<id>"));
            }
        }
        "oci.timeout_secs" => match value.parse::<u64>() {
            Ok(n) if n > 0 => {}
            _ => return Err(invalid("a positive number of seconds")),
        },
        "ampere.ocpus" => {
            if !in_range(value, MAX_AMPERE_OCPUS) {
                return Err(invalid("a number greater than 0 and at most 4"));
            }
        }
        "ampere.memory_gbs" => {
            if !in_range(value, MAX_AMPERE_MEMORY_GBS) {
                return Err(invalid("a number greater than 0 and at most 24"));
            }
        }
        _ => {}
    }
    Ok(())
}

fn in_range(value: &str, max: f64) -> bool {
    value
        .parse::<f64>()
        .is_ok_and(|v| v.is_finite() && v > 0.0 && v <= max)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
