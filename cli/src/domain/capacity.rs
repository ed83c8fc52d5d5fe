//! Capacity domain types: compartments, shape targets, probe outcomes and the
//! run summary.
//!
//! Pure data in, data out. No I/O.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use freetier_common::{
    AvailabilityStatus, CheckReport, DomainReport, ProbeReport, ProbeStatus, ShapeClass,
    ShapeSummary,
};
use regex::Regex;

use crate::domain::error::{CredentialError, ProviderError};

// ── Constants ────────────────────────────────────────────────────────────────

/// Arm-based flexible free-tier shape.
pub const AMPERE_SHAPE: &str = "VM.Standard.A1.Flex";
/// AMD-based fixed free-tier shape.
pub const MICRO_SHAPE: &str = "VM.Standard.E2.1.Micro";

pub const DEFAULT_AMPERE_OCPUS: f64 = 1.0;
pub const DEFAULT_AMPERE_MEMORY_GBS: f64 = 6.0;

/// `ocid1.<type>.<realm>.<region>.<unique>`; region may be empty.
static OCID_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^ocid1\.[a-z0-9]+\.[a-z0-9-]+\.[a-z0-9.-]*[a-z0-9]$").expect("valid regex")
});

// ── Identifiers ──────────────────────────────────────────────────────────────

/// Tenancy or compartment OCID every provider call is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompartmentId(String);

impl CompartmentId {
    /// Validate and wrap a compartment id. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidOcid` if the value is not OCID-shaped.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let id = raw.trim();
        if !OCID_RE.is_match(id) {
            return Err(CredentialError::InvalidOcid(id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Availability domain name, e.g. `Uocm:EU-FRANKFURT-1-AD-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityDomain(pub String);

impl AvailabilityDomain {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvailabilityDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Probe requests ───────────────────────────────────────────────────────────

/// Sizing for flexible shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeConfig {
    pub ocpus: f64,
    pub memory_gbs: f64,
}

/// One entry of a capacity report request.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeProbe {
    pub shape: String,
    pub config: Option<ShapeConfig>,
}

/// A shape class together with the request used to probe it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTarget {
    pub class: ShapeClass,
    pub probe: ShapeProbe,
}

impl ShapeTarget {
    #[must_use]
    pub fn ampere(ocpus: f64, memory_gbs: f64) -> Self {
        Self {
            class: ShapeClass::Ampere,
            probe: ShapeProbe {
                shape: AMPERE_SHAPE.to_string(),
                config: Some(ShapeConfig { ocpus, memory_gbs }),
            },
        }
    }

    #[must_use]
    pub fn micro() -> Self {
        Self {
            class: ShapeClass::Micro,
            probe: ShapeProbe {
                shape: MICRO_SHAPE.to_string(),
                config: None,
            },
        }
    }
}

/// Build the target list for the given classes, in `ShapeClass::ALL` order.
/// An empty `only` selects every class.
#[must_use]
pub fn select_targets(only: &[ShapeClass], ocpus: f64, memory_gbs: f64) -> Vec<ShapeTarget> {
    ShapeClass::ALL
        .into_iter()
        .filter(|class| only.is_empty() || only.contains(class))
        .map(|class| match class {
            ShapeClass::Ampere => ShapeTarget::ampere(ocpus, memory_gbs),
            ShapeClass::Micro => ShapeTarget::micro(),
        })
        .collect()
}

// ── Reports and outcomes ─────────────────────────────────────────────────────

/// One `shape-availabilities` entry of a capacity report response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeAvailability {
    pub shape: String,
    pub status: AvailabilityStatus,
}

/// Parsed capacity report for one availability domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityReport {
    pub entries: Vec<ShapeAvailability>,
}

impl CapacityReport {
    /// Status reported for `shape`, matched by name. Response order is not
    /// guaranteed to follow request order.
    #[must_use]
    pub fn status_for(&self, shape: &str) -> Option<&AvailabilityStatus> {
        self.entries
            .iter()
            .find(|entry| entry.shape == shape)
            .map(|entry| &entry.status)
    }
}

/// What a single shape probe in a single domain found.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    Available,
    Unavailable(AvailabilityStatus),
    /// The report had no entry for the requested shape.
    NotReported,
    Failed(ProviderError),
}

impl ProbeOutcome {
    /// Reduce a report to the outcome for `shape`.
    #[must_use]
    pub fn from_report(report: &CapacityReport, shape: &str) -> Self {
        match report.status_for(shape) {
            Some(status) if status.is_available() => ProbeOutcome::Available,
            Some(status) => ProbeOutcome::Unavailable(status.clone()),
            None => ProbeOutcome::NotReported,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, ProbeOutcome::Available)
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, ProbeOutcome::Failed(_))
    }

    fn to_report(&self, target: &ShapeTarget) -> ProbeReport {
        let (status, detail) = match self {
            ProbeOutcome::Available => (
                ProbeStatus::Available,
                Some(AvailabilityStatus::Available.to_string()),
            ),
            ProbeOutcome::Unavailable(s) => (ProbeStatus::Unavailable, Some(s.to_string())),
            ProbeOutcome::NotReported => (ProbeStatus::NotReported, None),
            ProbeOutcome::Failed(e) => (ProbeStatus::Failed, Some(e.to_string())),
        };
        ProbeReport {
            class: target.class,
            shape: target.probe.shape.clone(),
            status,
            detail,
        }
    }
}

/// Outcome of one target in one domain.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub target: ShapeTarget,
    pub outcome: ProbeOutcome,
}

/// All probe results for one availability domain.
#[derive(Debug, Clone)]
pub struct DomainResult {
    pub domain: AvailabilityDomain,
    pub probes: Vec<ProbeResult>,
}

// ── Run summary ──────────────────────────────────────────────────────────────

/// Aggregated outcome of one `check` run. Lives only for the current process.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub compartment_id: CompartmentId,
    pub targets: Vec<ShapeTarget>,
    pub domains: Vec<DomainResult>,
}

impl RunSummary {
    #[must_use]
    pub fn new(compartment_id: CompartmentId, targets: Vec<ShapeTarget>) -> Self {
        Self {
            compartment_id,
            targets,
            domains: Vec::new(),
        }
    }

    /// `true` if `class` was available in at least one domain.
    #[must_use]
    pub fn is_available(&self, class: ShapeClass) -> bool {
        self.domains
            .iter()
            .flat_map(|d| &d.probes)
            .any(|p| p.target.class == class && p.outcome.is_available())
    }

    #[must_use]
    pub fn any_available(&self) -> bool {
        self.targets.iter().any(|t| self.is_available(t.class))
    }

    #[must_use]
    pub fn failed_probes(&self) -> usize {
        self.domains
            .iter()
            .flat_map(|d| &d.probes)
            .filter(|p| p.outcome.is_failed())
            .count()
    }

    /// Process exit code: 0 if any target is launchable somewhere, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.any_available())
    }

    /// Machine-readable form for `--json` output.
    #[must_use]
    pub fn to_report(&self, checked_at: DateTime<Utc>) -> CheckReport {
        CheckReport {
            checked_at,
            compartment_id: self.compartment_id.to_string(),
            domains: self
                .domains
                .iter()
                .map(|d| DomainReport {
                    name: d.domain.to_string(),
                    probes: d
                        .probes
                        .iter()
                        .map(|p| p.outcome.to_report(&p.target))
                        .collect(),
                })
                .collect(),
            shapes: self
                .targets
                .iter()
                .map(|t| ShapeSummary {
                    class: t.class,
                    shape: t.probe.shape.clone(),
                    available: self.is_available(t.class),
                })
                .collect(),
            failed_probes: self.failed_probes(),
            any_available: self.any_available(),
        }
    }
}
