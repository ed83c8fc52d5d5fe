//! Human-readable terminal renderer.

use freetier_common::ShapeClass;
use owo_colors::OwoColorize as _;

use crate::domain::config::FreetierConfig;
use crate::domain::{AvailabilityDomain, CheckError, RunSummary};
use crate::output::OutputContext;

const RULE_WIDTH: usize = 60;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the opening banner of a check run.
    pub fn render_banner(&self) {
        let rule = "=".repeat(RULE_WIDTH);
        self.ctx.log(&rule);
        self.ctx.log("OCI Free Tier Availability Checker");
        self.ctx.log(&rule);
    }

    /// Render the final summary block. Printed even when `quiet`.
    pub fn render_summary(&self, summary: &RunSummary) {
        let rule = "=".repeat(RULE_WIDTH);
        self.ctx.log_always(&rule);
        self.ctx.header("SUMMARY");
        self.ctx.log_always(&rule);

        for target in &summary.targets {
            let available = summary.is_available(target.class);
            let line = availability_line(target.class, available);
            let styled = if available {
                line.style(self.ctx.styles.success).to_string()
            } else {
                line.style(self.ctx.styles.error).to_string()
            };
            self.ctx.log_always(&styled);
        }

        let failed = summary.failed_probes();
        if failed > 0 {
            self.ctx.log_always(
                &failed_probes_warning(failed)
                    .style(self.ctx.styles.warning)
                    .to_string(),
            );
        }
    }

    /// Render a fatal setup failure with its remediation hint.
    pub fn render_check_error(&self, err: &CheckError) {
        self.ctx.error(&format!("ERROR: {err}"));
        self.ctx.error(err.hint());
    }

    /// Render the list of availability domains.
    pub fn render_domains(&self, domains: &[AvailabilityDomain]) {
        for domain in domains {
            println!("  {domain}");
        }
    }

    /// Render the effective freetier configuration.
    pub fn render_config(&self, config: &FreetierConfig, path: &std::path::Path) {
        let unset = "(not set)";
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<22} {}", "oci.cli:", config.oci.cli);
        println!("  {:<22} {}", "oci.profile:", config.oci.profile);
        println!(
            "  {:<22} {}",
            "oci.config_file:",
            config.oci.config_file.as_deref().unwrap_or(unset)
        );
        println!(
            "  {:<22} {}",
            "oci.compartment_id:",
            config.oci.compartment_id.as_deref().unwrap_or(unset)
        );
        println!("  {:<22} {}", "oci.timeout_secs:", config.oci.timeout_secs);
        println!("  {:<22} {}", "ampere.ocpus:", config.ampere.ocpus);
        println!("  {:<22} {}", "ampere.memory_gbs:", config.ampere.memory_gbs);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [
            "FREETIER_CONFIG",
            "FREETIER_COMPARTMENT_ID",
            "FREETIER_OCI_CLI",
            "OCI_CLI_CONFIG_FILE",
            "OCI_CLI_PROFILE",
            "NO_COLOR",
        ] {
            println!(
                "    {:<24} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| unset.to_string())
            );
        }
        println!();
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        println!("freetier {version}");
    }
}

// ── Display helpers (used by tests and output layer) ─────────────────────────

#[must_use]
pub fn availability_line(class: ShapeClass, available: bool) -> String {
    if available {
        format!("{}: AVAILABLE ✓", class.label())
    } else {
        format!("{}: NOT AVAILABLE ✗", class.label())
    }
}

#[must_use]
pub fn failed_probes_warning(count: usize) -> String {
    let noun = if count == 1 { "probe" } else { "probes" };
    format!("{count} capacity {noun} failed; results may under-report availability")
}
