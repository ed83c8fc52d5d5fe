//! Infrastructure implementations of the `CredentialSource` port.

use std::path::{Path, PathBuf};

use crate::application::ports::CredentialSource;
use crate::domain::credentials::find_tenancy;
use crate::domain::{CompartmentId, CredentialError};

/// Location the OCI CLI reads by default (`~/.oci/config`).
///
/// # Errors
///
/// Returns `CredentialError::NoHomeDir` if the home directory is unknown.
pub fn default_oci_config_path() -> Result<PathBuf, CredentialError> {
    let home = dirs::home_dir().ok_or(CredentialError::NoHomeDir)?;
    Ok(home.join(".oci").join("config"))
}

/// Expand a leading `~/` the way the OCI CLI does for its own paths.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Reads the tenancy OCID from one profile of an OCI CLI config file.
#[derive(Debug, Clone)]
pub struct OciConfigFile {
    path: PathBuf,
    profile: String,
}

impl OciConfigFile {
    pub fn new(path: impl Into<PathBuf>, profile: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            profile: profile.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialSource for OciConfigFile {
    fn resolve_compartment_id(&self) -> Result<CompartmentId, CredentialError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CredentialError::ConfigNotFound {
                    path: self.path.clone(),
                }
            } else {
                CredentialError::Unreadable {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        let tenancy =
            find_tenancy(&contents, &self.profile).ok_or_else(|| CredentialError::MissingTenancy {
                path: self.path.clone(),
                profile: self.profile.clone(),
            })?;
        CompartmentId::parse(&tenancy)
    }
}

/// A compartment id given explicitly (flag, env var or settings file).
#[derive(Debug, Clone)]
pub struct StaticCompartment(pub String);

impl CredentialSource for StaticCompartment {
    fn resolve_compartment_id(&self) -> Result<CompartmentId, CredentialError> {
        CompartmentId::parse(&self.0)
    }
}

/// The credential source selected for this invocation.
#[derive(Debug, Clone)]
pub enum CompartmentSource {
    Static(StaticCompartment),
    File(OciConfigFile),
}

impl CredentialSource for CompartmentSource {
    fn resolve_compartment_id(&self) -> Result<CompartmentId, CredentialError> {
        match self {
            CompartmentSource::Static(s) => s.resolve_compartment_id(),
            CompartmentSource::File(f) => f.resolve_compartment_id(),
        }
    }
}
