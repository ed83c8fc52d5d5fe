use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-tier shape family a check targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ShapeClass {
    /// Arm-based `VM.Standard.A1.Flex`.
    Ampere,
    /// AMD-based `VM.Standard.E2.1.Micro`.
    Micro,
}

impl ShapeClass {
    /// Every class, in the order checks run.
    pub const ALL: [ShapeClass; 2] = [ShapeClass::Ampere, ShapeClass::Micro];

    /// Short human label used in log lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ShapeClass::Ampere => "Ampere A1",
            ShapeClass::Micro => "E2.1.Micro",
        }
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Availability status reported by the compute capacity API.
///
/// Statuses not known to this crate are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AvailabilityStatus {
    Available,
    OutOfHostCapacity,
    HardwareNotSupported,
    Other(String),
}

impl AvailabilityStatus {
    /// Wire value of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AvailabilityStatus::Available => "AVAILABLE",
            AvailabilityStatus::OutOfHostCapacity => "OUT_OF_HOST_CAPACITY",
            AvailabilityStatus::HardwareNotSupported => "HARDWARE_NOT_SUPPORTED",
            AvailabilityStatus::Other(s) => s,
        }
    }

    /// Only an exact `AVAILABLE` counts as launchable.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, AvailabilityStatus::Available)
    }
}

impl From<&str> for AvailabilityStatus {
    fn from(value: &str) -> Self {
        match value {
            "AVAILABLE" => AvailabilityStatus::Available,
            "OUT_OF_HOST_CAPACITY" => AvailabilityStatus::OutOfHostCapacity,
            "HARDWARE_NOT_SUPPORTED" => AvailabilityStatus::HardwareNotSupported,
            other => AvailabilityStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for AvailabilityStatus {
    fn from(value: String) -> Self {
        AvailabilityStatus::from(value.as_str())
    }
}

impl From<AvailabilityStatus> for String {
    fn from(value: AvailabilityStatus) -> Self {
        match value {
            AvailabilityStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single shape probe, as emitted in `--json` output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Available,
    Unavailable,
    NotReported,
    Failed,
}

/// One shape probe within one availability domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    pub class: ShapeClass,
    pub shape: String,
    pub status: ProbeStatus,
    /// Provider status string or failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// All probes run against one availability domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainReport {
    pub name: String,
    pub probes: Vec<ProbeReport>,
}

/// Run-level verdict for one shape class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeSummary {
    pub class: ShapeClass,
    pub shape: String,
    pub available: bool,
}

/// Machine-readable result of `freetier check --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub checked_at: DateTime<Utc>,
    pub compartment_id: String,
    pub domains: Vec<DomainReport>,
    pub shapes: Vec<ShapeSummary>,
    pub failed_probes: usize,
    pub any_available: bool,
}
