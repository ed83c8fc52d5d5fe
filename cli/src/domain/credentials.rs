//! Parsing of the OCI CLI configuration file format.
//!
//! Pure functions only. The file is read by `infra::credentials`.

/// Profile the OCI CLI uses when none is selected.
pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// Find the `tenancy` value for `profile` in OCI config file contents.
///
/// The format is INI-like: `[PROFILE]` headers followed by unquoted
/// `key=value` lines. Lines before the first header count as `DEFAULT`.
/// A named profile inherits keys it does not set from `[DEFAULT]`, as the
/// OCI CLI does. Returns `None` if the profile section does not exist or
/// neither it nor `[DEFAULT]` has a non-empty `tenancy` entry.
#[must_use]
pub fn find_tenancy(contents: &str, profile: &str) -> Option<String> {
    let mut section = DEFAULT_PROFILE;
    let mut profile_seen = profile == DEFAULT_PROFILE;
    let mut own: Option<&str> = None;
    let mut inherited: Option<&str> = None;

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = name.trim();
            profile_seen |= section == profile;
            continue;
        }
        let Some(value) = tenancy_value(line) else {
            continue;
        };
        if section == profile {
            own.get_or_insert(value);
        } else if section == DEFAULT_PROFILE {
            inherited.get_or_insert(value);
        }
    }

    if !profile_seen {
        return None;
    }
    own.or(inherited).map(str::to_string)
}

/// Non-empty value of a `tenancy = ...` line.
fn tenancy_value(line: &str) -> Option<&str> {
    let (key, value) = line.split_once('=')?;
    let value = value.trim();
    (key.trim() == "tenancy" && !value.is_empty()).then_some(value)
}
