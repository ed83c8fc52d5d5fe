//! Application context: unified state passed to every command handler.
//!
//! `AppContext` bundles the output context, output mode and loaded settings.
//! `OciSettings` merges command-line/environment overrides with the settings
//! file and builds the credential source and provider for a command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::commands::OciArgs;
use crate::domain::config::{FreetierConfig, OciConfig};
use crate::domain::CredentialError;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::credentials::{
    CompartmentSource, OciConfigFile, StaticCompartment, default_oci_config_path, expand_home,
};
use crate::infra::oci_cli::OciCli;
use crate::output::{HumanRenderer, OutputContext};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable timestamped terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress progress output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Settings file store.
    pub config_store: YamlConfigStore,
    /// Settings loaded at startup.
    pub config: FreetierConfig,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        let config_store = YamlConfigStore;
        let config = config_store.load()?;

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            config_store,
            config,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Human renderer over this context's output.
    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    /// Effective OCI settings for a command.
    #[must_use]
    pub fn oci_settings(&self, args: &OciArgs) -> OciSettings {
        OciSettings::resolve(args, &self.config.oci)
    }
}

/// OCI settings after applying flag/env overrides on top of the settings file.
#[derive(Debug, Clone, PartialEq)]
pub struct OciSettings {
    pub cli: String,
    pub profile: String,
    /// Explicit OCI config file; `None` means the OCI CLI default.
    pub config_file: Option<PathBuf>,
    pub compartment_id: Option<String>,
    pub timeout: Duration,
}

impl OciSettings {
    /// Precedence: flag or env var, then settings file, then built-in default.
    #[must_use]
    pub fn resolve(args: &OciArgs, config: &OciConfig) -> Self {
        Self {
            cli: args.oci_cli.clone().unwrap_or_else(|| config.cli.clone()),
            profile: args
                .profile
                .clone()
                .unwrap_or_else(|| config.profile.clone()),
            config_file: args
                .oci_config
                .clone()
                .or_else(|| config.config_file.as_deref().map(expand_home)),
            compartment_id: args
                .compartment_id
                .clone()
                .or_else(|| config.compartment_id.clone()),
            timeout: Duration::from_secs(args.timeout.unwrap_or(config.timeout_secs)),
        }
    }

    /// Credential source: the explicit compartment id if one was given,
    /// otherwise the selected profile of the OCI config file.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::NoHomeDir` if the default config path is
    /// needed but the home directory is unknown.
    pub fn credential_source(&self) -> Result<CompartmentSource, CredentialError> {
        if let Some(id) = &self.compartment_id {
            return Ok(CompartmentSource::Static(StaticCompartment(id.clone())));
        }
        let path = match &self.config_file {
            Some(path) => path.clone(),
            None => default_oci_config_path()?,
        };
        Ok(CompartmentSource::File(OciConfigFile::new(
            path,
            self.profile.clone(),
        )))
    }

    /// OCI CLI provider using the same profile and config file as the
    /// credential source.
    #[must_use]
    pub fn provider(&self) -> OciCli<TokioCommandRunner> {
        let provider = OciCli::new(TokioCommandRunner::new(self.timeout), self.cli.clone())
            .with_profile(&self.profile);
        match &self.config_file {
            Some(path) => provider.with_config_file(&path.to_string_lossy()),
            None => provider,
        }
    }
}
