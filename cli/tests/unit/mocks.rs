//! Shared mock infrastructure for unit tests.
//!
//! Provides canned port implementations so each test file doesn't have to
//! re-define the same boilerplate.

#![allow(clippy::expect_used, dead_code)]

use std::collections::HashMap;
use std::process::Output;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use freetier_cli::application::ports::{
    CapacityProvider, CommandRunner, CredentialSource, ProgressReporter,
};
use freetier_cli::domain::{
    AvailabilityDomain, CapacityReport, CompartmentId, CredentialError, ProviderError,
    ShapeAvailability, ShapeProbe,
};

use crate::helpers::TENANCY;

// ── Command runner ────────────────────────────────────────────────────────────

/// Returns the next canned output for every call and records the arguments.
///
/// Clones share the same queue and call log, so a test can hand one clone to
/// the adapter under test and inspect the other.
#[derive(Clone)]
pub struct RecordingRunner {
    responses: Arc<Mutex<Vec<Result<Output>>>>,
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl RecordingRunner {
    pub fn new(responses: Vec<Result<Output>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().rev().collect())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of all recorded `(program, args)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("mutex poisoned").clone()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.calls.lock().expect("mutex poisoned").push((
            program.to_string(),
            args.iter().map(ToString::to_string).collect(),
        ));
        self.responses
            .lock()
            .expect("mutex poisoned")
            .pop()
            .unwrap_or_else(|| anyhow::bail!("unexpected call to {program}"))
    }
}

// ── Credential sources ────────────────────────────────────────────────────────

pub struct FixedCredentials;

impl CredentialSource for FixedCredentials {
    fn resolve_compartment_id(&self) -> Result<CompartmentId, CredentialError> {
        CompartmentId::parse(TENANCY)
    }
}

pub struct MissingTenancy;

impl CredentialSource for MissingTenancy {
    fn resolve_compartment_id(&self) -> Result<CompartmentId, CredentialError> {
        Err(CredentialError::MissingTenancy {
            path: "/home/user/.oci/config".into(),
            profile: "DEFAULT".into(),
        })
    }
}

// ── Provider ──────────────────────────────────────────────────────────────────

type ReportResult = Result<CapacityReport, ProviderError>;

/// Provider with canned domain list and per (domain, shape) reports.
/// Records every capacity report request as `(domain, shape)`.
pub struct ScriptedProvider {
    domains: Result<Vec<AvailabilityDomain>, ProviderError>,
    reports: HashMap<(String, String), ReportResult>,
    pub report_calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedProvider {
    pub fn with_domains(names: &[&str]) -> Self {
        Self {
            domains: Ok(names
                .iter()
                .map(|n| AvailabilityDomain((*n).to_string()))
                .collect()),
            reports: HashMap::new(),
            report_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_domains(err: ProviderError) -> Self {
        Self {
            domains: Err(err),
            reports: HashMap::new(),
            report_calls: Mutex::new(Vec::new()),
        }
    }

    /// Report `status` for `shape` when probing `domain`.
    #[must_use]
    pub fn status(mut self, domain: &str, shape: &str, status: &str) -> Self {
        self.reports.insert(
            (domain.to_string(), shape.to_string()),
            Ok(CapacityReport {
                entries: vec![ShapeAvailability {
                    shape: shape.to_string(),
                    status: status.into(),
                }],
            }),
        );
        self
    }

    /// Fail the report for `shape` in `domain`.
    #[must_use]
    pub fn failure(mut self, domain: &str, shape: &str, err: ProviderError) -> Self {
        self.reports
            .insert((domain.to_string(), shape.to_string()), Err(err));
        self
    }

    pub fn report_calls(&self) -> Vec<(String, String)> {
        self.report_calls.lock().expect("mutex poisoned").clone()
    }
}

impl CapacityProvider for ScriptedProvider {
    async fn list_availability_domains(
        &self,
        _compartment: &CompartmentId,
    ) -> Result<Vec<AvailabilityDomain>, ProviderError> {
        self.domains.clone()
    }

    async fn capacity_report(
        &self,
        _compartment: &CompartmentId,
        domain: &AvailabilityDomain,
        probes: &[ShapeProbe],
    ) -> Result<CapacityReport, ProviderError> {
        let shape = probes.first().map(|p| p.shape.clone()).unwrap_or_default();
        let key = (domain.0.clone(), shape);
        self.report_calls.lock().expect("mutex poisoned").push(key.clone());
        self.reports
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(CapacityReport::default()))
    }
}

// ── Progress reporter ─────────────────────────────────────────────────────────

/// Captures every emitted line with its level.
#[derive(Default)]
pub struct RecordingReporter {
    pub lines: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        self.lines.lock().expect("mutex poisoned").clone()
    }

    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }

    fn push(&self, level: &'static str, message: &str) {
        self.lines
            .lock()
            .expect("mutex poisoned")
            .push((level, message.to_string()));
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push("step", message);
    }
    fn info(&self, message: &str) {
        self.push("info", message);
    }
    fn success(&self, message: &str) {
        self.push("success", message);
    }
    fn warn(&self, message: &str) {
        self.push("warn", message);
    }
}
