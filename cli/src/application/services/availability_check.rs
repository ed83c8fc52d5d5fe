//! Application service: free-tier capacity check use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Setup failures (no compartment id, no domains) abort with `CheckError`;
//! per-probe provider failures are recorded as `ProbeOutcome::Failed` and the
//! run continues.

use crate::application::ports::{CapacityProvider, CredentialSource, ProgressReporter};
use crate::domain::{
    AvailabilityDomain, CheckError, CompartmentId, DomainResult, ProbeOutcome, ProbeResult,
    RunSummary, ShapeTarget,
};

/// Run one full check: resolve the compartment, list domains, then probe every
/// target in every domain, one call at a time.
///
/// # Errors
///
/// Returns `CheckError` if the compartment id cannot be resolved or the
/// availability domains cannot be listed (or the list is empty). No shape is
/// probed in either case.
pub async fn run_check(
    credentials: &impl CredentialSource,
    provider: &impl CapacityProvider,
    targets: Vec<ShapeTarget>,
    reporter: &impl ProgressReporter,
) -> Result<RunSummary, CheckError> {
    let compartment_id = credentials.resolve_compartment_id()?;
    reporter.info(&format!("Using compartment: {compartment_id}"));

    let domains = list_domains(provider, &compartment_id, reporter).await?;

    let mut summary = RunSummary::new(compartment_id, targets);
    for domain in domains {
        reporter.step(&format!("Checking availability domain: {domain}"));
        let mut probes = Vec::with_capacity(summary.targets.len());
        for target in &summary.targets {
            let outcome =
                probe_shape(provider, &summary.compartment_id, &domain, target, reporter).await;
            probes.push(ProbeResult {
                target: target.clone(),
                outcome,
            });
        }
        summary.domains.push(DomainResult { domain, probes });
    }
    Ok(summary)
}

/// Fetch the availability domains of a compartment.
///
/// # Errors
///
/// Returns `CheckError::DomainListing` if the provider call fails and
/// `CheckError::NoDomains` if it succeeds with an empty list.
pub async fn list_domains(
    provider: &impl CapacityProvider,
    compartment_id: &CompartmentId,
    reporter: &impl ProgressReporter,
) -> Result<Vec<AvailabilityDomain>, CheckError> {
    reporter.step("Fetching availability domains...");
    let domains = provider.list_availability_domains(compartment_id).await?;
    if domains.is_empty() {
        return Err(CheckError::NoDomains(compartment_id.to_string()));
    }
    reporter.info(&format!("Found {} availability domains", domains.len()));
    Ok(domains)
}

/// Probe a single target in a single domain. Never fails: provider errors are
/// logged and returned as `ProbeOutcome::Failed`.
pub async fn probe_shape(
    provider: &impl CapacityProvider,
    compartment_id: &CompartmentId,
    domain: &AvailabilityDomain,
    target: &ShapeTarget,
    reporter: &impl ProgressReporter,
) -> ProbeOutcome {
    let label = target.class.label();
    reporter.step(&format!("Checking {label} availability in {domain}..."));

    let outcome = match provider
        .capacity_report(compartment_id, domain, std::slice::from_ref(&target.probe))
        .await
    {
        Ok(report) => ProbeOutcome::from_report(&report, &target.probe.shape),
        Err(e) => ProbeOutcome::Failed(e),
    };

    match &outcome {
        ProbeOutcome::Available => {
            reporter.info(&format!("{label} status: AVAILABLE"));
            reporter.success(&format!("{label} instances are AVAILABLE!"));
        }
        ProbeOutcome::Unavailable(status) => {
            reporter.info(&format!("{label} status: {status}"));
        }
        ProbeOutcome::NotReported => {
            reporter.warn(&format!(
                "{label}: capacity report has no entry for {}",
                target.probe.shape
            ));
        }
        ProbeOutcome::Failed(e) => {
            reporter.warn(&format!("{label} check failed: {e}"));
        }
    }
    outcome
}
