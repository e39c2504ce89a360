//! Runtime Settings
//!
//! Collects everything both tools read from the process environment into a
//! single [`Settings`] value, built once at startup.
//!
//! # Helper Script Resolution
//!
//! The annotation deletion script is resolved in the following order:
//! 1. `APOLLO_HELPER_DIR`, when set
//! 2. Next to the running executable
//! 3. System PATH: the bare script name is handed to the OS

use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::error::{ApolloError, Result};

/// Root of all species installations. Required.
pub const DATA_DIR_VAR: &str = "APOLLO_DATA_DIR";

/// Base URL of the WebApollo server used for annotation cleanup.
pub const APOLLO_URL_VAR: &str = "APOLLO_URL";

/// Directory holding the groovy helper scripts.
pub const HELPER_DIR_VAR: &str = "APOLLO_HELPER_DIR";

/// Server the deletion script talks to when `APOLLO_URL` is unset.
pub const DEFAULT_APOLLO_URL: &str = "http://localhost:8888";

/// Script that removes all annotations of an organism from a WebApollo server.
pub const DELETE_ANNOTATIONS_SCRIPT: &str = "delete_annotations_from_organism.groovy";

/// Configuration shared by the installation and track managers.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory containing one subdirectory per species
    pub data_dir: PathBuf,

    /// Base URL of the WebApollo server, without trailing slash
    pub apollo_url: String,

    /// Resolved location of the annotation deletion script
    pub delete_script: PathBuf,

    /// Informational only
    pub home: Option<String>,

    /// Informational only
    pub user: Option<String>,
}

impl Settings {
    /// Creates settings for a data root with default server and script.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            apollo_url: DEFAULT_APOLLO_URL.to_string(),
            delete_script: PathBuf::from(DELETE_ANNOTATIONS_SCRIPT),
            home: None,
            user: None,
        }
    }

    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = get(DATA_DIR_VAR).ok_or(ApolloError::MissingEnvironment(DATA_DIR_VAR))?;

        let mut settings = Self::new(data_dir);
        if let Some(url) = get(APOLLO_URL_VAR) {
            settings = settings.with_apollo_url(url);
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        settings.delete_script =
            resolve_helper_script(get(HELPER_DIR_VAR).map(PathBuf::from), exe_dir);

        settings.home = get("HOME");
        settings.user = get("USER");

        debug!("Data directory: {}", settings.data_dir.display());
        debug!("WebApollo server: {}", settings.apollo_url);
        debug!("Deletion script: {}", settings.delete_script.display());

        Ok(settings)
    }

    /// Sets the WebApollo server base URL.
    pub fn with_apollo_url(mut self, url: impl Into<String>) -> Self {
        self.apollo_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the deletion script location.
    pub fn with_delete_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.delete_script = script.into();
        self
    }

    /// Directory holding the installation for a species.
    pub fn species_dir(&self, species: &str) -> PathBuf {
        self.data_dir.join(species)
    }

    /// URL of a named WebApollo installation on the configured server.
    pub fn destination_url(&self, installation: &str) -> String {
        format!("{}/{}", self.apollo_url, installation)
    }
}

/// Checks that `value` names exactly one entry directly below a directory.
///
/// Empty values count as missing; `.`, `..`, absolute paths and anything
/// containing a separator are rejected.
pub fn directory_name<'v>(what: &'static str, value: &'v str) -> Result<&'v str> {
    if value.trim().is_empty() {
        return Err(ApolloError::MissingArgument(what));
    }

    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == value => Ok(value),
        _ => Err(ApolloError::InvalidName {
            what,
            value: value.to_string(),
        }),
    }
}

/// Picks the deletion script from the helper dir, the executable dir, or PATH.
fn resolve_helper_script(helper_dir: Option<PathBuf>, exe_dir: Option<PathBuf>) -> PathBuf {
    // Priority 1: explicit override, trusted even if the file is absent
    if let Some(dir) = helper_dir {
        return dir.join(DELETE_ANNOTATIONS_SCRIPT);
    }

    // Priority 2: shipped alongside the binaries
    if let Some(dir) = exe_dir {
        let candidate = dir.join(DELETE_ANNOTATIONS_SCRIPT);
        if candidate.exists() {
            return candidate;
        }
    }

    // Priority 3: system PATH
    PathBuf::from(DELETE_ANNOTATIONS_SCRIPT)
}
