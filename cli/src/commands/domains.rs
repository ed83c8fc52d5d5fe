//! `freetier domains`: list the availability domains of the compartment.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::CredentialSource;
use crate::application::services::availability_check::list_domains;
use crate::commands::{OciArgs, fail_setup};
use crate::domain::CheckError;
use crate::output::TerminalReporter;

/// Run the domains command.
pub async fn run(app: &AppContext, args: &OciArgs) -> Result<ExitCode> {
    let settings = app.oci_settings(args);
    let compartment_id = match settings
        .credential_source()
        .and_then(|source| source.resolve_compartment_id())
    {
        Ok(id) => id,
        Err(e) => return fail_setup(app, &CheckError::from(e)),
    };

    let provider = settings.provider();
    let reporter = TerminalReporter::stderr(&app.output);
    let domains = match list_domains(&provider, &compartment_id, &reporter).await {
        Ok(domains) => domains,
        Err(e) => return fail_setup(app, &e),
    };

    if app.is_json() {
        let names: Vec<&str> = domains.iter().map(|d| d.as_str()).collect();
        let obj = serde_json::json!({
            "compartment_id": compartment_id.as_str(),
            "domains": names,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        app.renderer().render_domains(&domains);
    }
    Ok(ExitCode::SUCCESS)
}
