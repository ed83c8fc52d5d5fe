//! Command implementations

pub mod check;
pub mod config;
pub mod domains;
pub mod version;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::CheckError;
use crate::output::json;

/// OCI connection options shared by commands that talk to the provider.
#[derive(Args, Debug, Clone)]
pub struct OciArgs {
    /// Compartment or tenancy OCID (skips reading the OCI config file)
    #[arg(long, env = "FREETIER_COMPARTMENT_ID")]
    pub compartment_id: Option<String>,

    /// OCI config profile to use
    #[arg(long, env = "OCI_CLI_PROFILE")]
    pub profile: Option<String>,

    /// Path to the OCI config file
    #[arg(long, env = "OCI_CLI_CONFIG_FILE")]
    pub oci_config: Option<PathBuf>,

    /// OCI CLI program to invoke
    #[arg(long, env = "FREETIER_OCI_CLI")]
    pub oci_cli: Option<String>,

    /// Timeout per OCI CLI call, in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Report a fatal setup failure in the active output mode and return exit 1.
pub(crate) fn fail_setup(app: &AppContext, err: &CheckError) -> Result<ExitCode> {
    if app.is_json() {
        println!("{}", json::format_error(&err.to_string(), err.code())?);
    } else {
        app.renderer().render_check_error(err);
    }
    Ok(ExitCode::FAILURE)
}
