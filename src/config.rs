use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CFinderError, Result};

/// Environment variable pointing at the CFinder executable or its directory.
pub const CFINDER_ENV: &str = "CFINDER";
/// Optional environment variable overriding the licence file location.
pub const LICENCE_ENV: &str = "CFINDER_LICENCE";
/// Executable looked up when [`CFINDER_ENV`] names a directory.
pub const DEFAULT_EXECUTABLE: &str = "CFinder_commandline";
pub const DEFAULT_LICENCE: &str = "licence.txt";

/// Where the CFinder tool and its licence live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub executable: PathBuf,
    pub licence: PathBuf,
}

impl ToolConfig {
    /// Uses `licence.txt` next to the executable unless `licence` is given.
    pub fn new(executable: impl Into<PathBuf>, licence: Option<PathBuf>) -> Self {
        let executable = executable.into();
        let licence = licence.unwrap_or_else(|| tool_dir(&executable).join(DEFAULT_LICENCE));
        ToolConfig {
            executable,
            licence,
        }
    }

    /// Builds the configuration from `CFINDER` and `CFINDER_LICENCE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var_os(name))
    }

    /// Like [`ToolConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let location = lookup(CFINDER_ENV).ok_or_else(|| {
            CFinderError::Configuration(format!(
                "{CFINDER_ENV} is not set; point it at the CFinder executable or its installation directory"
            ))
        })?;
        let licence = lookup(LICENCE_ENV).map(PathBuf::from);
        Ok(Self::from_location(PathBuf::from(location), licence))
    }

    /// Accepts either the executable itself or the directory containing it.
    pub fn from_location(location: PathBuf, licence: Option<PathBuf>) -> Self {
        let executable = if location.is_dir() {
            location.join(DEFAULT_EXECUTABLE)
        } else {
            location
        };
        Self::new(executable, licence)
    }

    /// Directory holding the executable.
    pub fn tool_dir(&self) -> PathBuf {
        tool_dir(&self.executable)
    }

    /// Output directory used when the caller does not name one.
    pub fn default_output(&self) -> PathBuf {
        self.tool_dir().join("output")
    }
}

fn tool_dir(executable: &Path) -> PathBuf {
    match executable.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn licence_defaults_next_to_executable() {
        let config = ToolConfig::new("/opt/cfinder/CFinder_commandline64", None);
        assert_eq!(config.licence, PathBuf::from("/opt/cfinder/licence.txt"));
        assert_eq!(config.default_output(), PathBuf::from("/opt/cfinder/output"));
    }

    #[test]
    fn explicit_licence_wins() {
        let config = ToolConfig::new("/opt/cfinder/cf", Some(PathBuf::from("/etc/cf.lic")));
        assert_eq!(config.licence, PathBuf::from("/etc/cf.lic"));
    }

    #[test]
    fn directory_location_resolves_default_executable() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig::from_location(dir.path().to_path_buf(), None);
        assert_eq!(config.executable, dir.path().join(DEFAULT_EXECUTABLE));
        assert_eq!(config.licence, dir.path().join(DEFAULT_LICENCE));
    }

    #[test]
    fn missing_cfinder_variable_is_a_configuration_error() {
        let err = ToolConfig::from_lookup(|_| None).unwrap_err();
        match err {
            CFinderError::Configuration(msg) => assert!(msg.contains(CFINDER_ENV)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn licence_variable_overrides_default() {
        let config = ToolConfig::from_lookup(|name| match name {
            CFINDER_ENV => Some(OsString::from("/opt/cfinder/CFinder_commandline")),
            LICENCE_ENV => Some(OsString::from("/etc/cfinder/licence.txt")),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.executable, PathBuf::from("/opt/cfinder/CFinder_commandline"));
        assert_eq!(config.licence, PathBuf::from("/etc/cfinder/licence.txt"));
    }

    #[test]
    fn bare_executable_name_uses_current_dir() {
        let config = ToolConfig::new("CFinder", None);
        assert_eq!(config.tool_dir(), PathBuf::from("."));
    }
}
