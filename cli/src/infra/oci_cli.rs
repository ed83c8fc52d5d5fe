//! Infrastructure implementation of the `CapacityProvider` port.
//!
//! `OciCli<R>` routes all provider calls through the OCI command-line tool via
//! a `CommandRunner` and parses its JSON stdout.

use serde::{Deserialize, Serialize};

use crate::application::ports::{CapacityProvider, CommandRunner};
use crate::domain::credentials::DEFAULT_PROFILE;
use crate::domain::{
    AvailabilityDomain, CapacityReport, CompartmentId, ProviderError, ShapeAvailability,
    ShapeProbe,
};

const LIST_DOMAINS: &str = "list availability domains";
const CAPACITY_REPORT: &str = "create compute capacity report";

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct AvailabilityDomainDto {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CapacityReportDto {
    #[serde(default)]
    shape_availabilities: Vec<ShapeAvailabilityDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ShapeAvailabilityDto {
    instance_shape: String,
    #[serde(default)]
    availability_status: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ShapeAvailabilityRequest<'a> {
    instance_shape: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instance_shape_config: Option<ShapeConfigRequest>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ShapeConfigRequest {
    ocpus: f64,
    memory_in_gbs: f64,
}

/// Encode probes as the `--shape-availabilities` JSON argument.
///
/// # Errors
///
/// Returns `ProviderError::Exec` if the request cannot be serialized.
pub fn shape_availabilities_arg(probes: &[ShapeProbe]) -> Result<String, ProviderError> {
    let request: Vec<_> = probes
        .iter()
        .map(|p| ShapeAvailabilityRequest {
            instance_shape: &p.shape,
            instance_shape_config: p.config.map(|c| ShapeConfigRequest {
                ocpus: c.ocpus,
                memory_in_gbs: c.memory_gbs,
            }),
        })
        .collect();
    serde_json::to_string(&request).map_err(|e| ProviderError::Exec {
        operation: CAPACITY_REPORT.to_string(),
        message: format!("cannot encode shape availabilities: {e}"),
    })
}

// ── Provider ──────────────────────────────────────────────────────────────────

/// OCI CLI adapter. Generic over `R: CommandRunner` so that tests can inject a
/// mock runner without spawning real processes.
pub struct OciCli<R: CommandRunner> {
    runner: R,
    program: String,
    global_args: Vec<String>,
}

impl<R: CommandRunner> OciCli<R> {
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
            global_args: Vec::new(),
        }
    }

    /// Select a non-default profile for every call.
    #[must_use]
    pub fn with_profile(mut self, profile: &str) -> Self {
        if profile != DEFAULT_PROFILE {
            self.global_args.push("--profile".to_string());
            self.global_args.push(profile.to_string());
        }
        self
    }

    /// Point every call at an explicit OCI config file.
    #[must_use]
    pub fn with_config_file(mut self, path: &str) -> Self {
        self.global_args.push("--config-file".to_string());
        self.global_args.push(path.to_string());
        self
    }

    async fn invoke(&self, operation: &str, args: &[&str]) -> Result<Vec<u8>, ProviderError> {
        let mut full: Vec<&str> = args.to_vec();
        full.extend(self.global_args.iter().map(String::as_str));

        let output = self
            .runner
            .run(&self.program, &full)
            .await
            .map_err(|e| ProviderError::Exec {
                operation: operation.to_string(),
                message: format!("{e:#}"),
            })?;

        if !output.status.success() {
            return Err(ProviderError::CommandFailed {
                operation: operation.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output.stdout)
    }
}

fn malformed(operation: &str, e: &serde_json::Error) -> ProviderError {
    ProviderError::MalformedResponse {
        operation: operation.to_string(),
        message: e.to_string(),
    }
}

impl<R: CommandRunner> CapacityProvider for OciCli<R> {
    async fn list_availability_domains(
        &self,
        compartment: &CompartmentId,
    ) -> Result<Vec<AvailabilityDomain>, ProviderError> {
        let stdout = self
            .invoke(
                LIST_DOMAINS,
                &[
                    "iam",
                    "availability-domain",
                    "list",
                    "--compartment-id",
                    compartment.as_str(),
                ],
            )
            .await?;

        // The OCI CLI prints nothing at all for an empty list.
        if stdout.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let envelope: Envelope<Vec<AvailabilityDomainDto>> =
            serde_json::from_slice(&stdout).map_err(|e| malformed(LIST_DOMAINS, &e))?;
        Ok(envelope
            .data
            .into_iter()
            .map(|ad| AvailabilityDomain(ad.name))
            .collect())
    }

    async fn capacity_report(
        &self,
        compartment: &CompartmentId,
        domain: &AvailabilityDomain,
        probes: &[ShapeProbe],
    ) -> Result<CapacityReport, ProviderError> {
        let shapes = shape_availabilities_arg(probes)?;
        let stdout = self
            .invoke(
                CAPACITY_REPORT,
                &[
                    "compute",
                    "compute-capacity-report",
                    "create-compute-capacity-report",
                    "--availability-domain",
                    domain.as_str(),
                    "--compartment-id",
                    compartment.as_str(),
                    "--shape-availabilities",
                    shapes.as_str(),
                ],
            )
            .await?;

        let envelope: Envelope<CapacityReportDto> =
            serde_json::from_slice(&stdout).map_err(|e| malformed(CAPACITY_REPORT, &e))?;
        Ok(CapacityReport {
            entries: envelope
                .data
                .shape_availabilities
                .into_iter()
                .map(|s| ShapeAvailability {
                    shape: s.instance_shape,
                    status: s.availability_status.as_deref().unwrap_or("UNKNOWN").into(),
                })
                .collect(),
        })
    }
}
