//! `freetier check`: probe free-tier shape capacity in every availability domain.
//!
//! Exit code 0 when at least one targeted shape is launchable somewhere,
//! 1 when none is or when setup fails.

use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use freetier_common::ShapeClass;

use crate::app::AppContext;
use crate::application::services::availability_check::run_check;
use crate::commands::{OciArgs, fail_setup};
use crate::domain::{CheckError, select_targets};
use crate::output::{TerminalReporter, json};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub oci: OciArgs,

    /// Only check this shape class (repeatable; default: all)
    #[arg(long = "shape", value_enum)]
    pub shapes: Vec<ShapeClass>,
}

/// Run the check command.
pub async fn run(app: &AppContext, args: &CheckArgs) -> Result<ExitCode> {
    let settings = app.oci_settings(&args.oci);
    let targets = select_targets(
        &args.shapes,
        app.config.ampere.ocpus,
        app.config.ampere.memory_gbs,
    );

    if !app.is_json() {
        app.renderer().render_banner();
    }

    let credentials = match settings.credential_source() {
        Ok(source) => source,
        Err(e) => return fail_setup(app, &CheckError::from(e)),
    };
    let provider = settings.provider();

    let result = if app.is_json() {
        let reporter = TerminalReporter::stderr(&app.output);
        run_check(&credentials, &provider, targets, &reporter).await
    } else {
        let reporter = TerminalReporter::new(&app.output);
        run_check(&credentials, &provider, targets, &reporter).await
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => return fail_setup(app, &e),
    };

    if app.is_json() {
        println!("{}", json::format_report(&summary.to_report(Utc::now()))?);
    } else {
        app.renderer().render_summary(&summary);
    }
    Ok(ExitCode::from(summary.exit_code()))
}
