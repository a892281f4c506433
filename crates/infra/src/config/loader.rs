//! Configuration loader
//!
//! Produces an immutable [`ClientConfig`] from the process environment
//! with an optional TOML file underneath.
//!
//! ## Loading Strategy
//! 1. Start from the built-in service defaults
//! 2. Apply values from a TOML file when one is found
//! 3. Apply `PERMID_*` environment variables on top
//!
//! ## Environment Variables
//! - `PERMID_ACCESS_TOKEN`: credential token (empty = unauthenticated)
//! - `PERMID_LOOKUP_URL` / `PERMID_SEARCH_URL` / `PERMID_MATCH_URL` /
//!   `PERMID_MATCH_FILE_URL` / `PERMID_TAG_URL`: endpoint overrides
//! - `PERMID_TIMEOUT_SECS`: request timeout in seconds
//!
//! ## File Locations
//! When no path is given, `./permid.toml` and `./config.toml` are probed
//! in that order.

use std::path::{Path, PathBuf};

use permid_domain::{ClientConfig, PermIdError, Result};
use serde::Deserialize;

/// TOML file shape; every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct FileConfig {
    lookup_url: Option<String>,
    search_url: Option<String>,
    match_url: Option<String>,
    match_file_url: Option<String>,
    tag_url: Option<String>,
    access_token: Option<String>,
    timeout_seconds: Option<u64>,
}

/// Load configuration: defaults, then file (if found), then environment.
///
/// # Errors
/// Returns `PermIdError::Config` if a present file cannot be parsed or a
/// present environment variable has an invalid value.
pub fn load() -> Result<ClientConfig> {
    let mut config = match probe_config_path() {
        Some(path) => load_from_file(&path)?,
        None => ClientConfig::default(),
    };
    apply_env(&mut config)?;
    validate_endpoints(&config)?;
    Ok(config)
}

/// Load configuration from environment variables over the defaults.
///
/// # Errors
/// Returns `PermIdError::Config` for invalid values (e.g. a non-numeric
/// timeout).
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::default();
    apply_env(&mut config)?;
    validate_endpoints(&config)?;
    Ok(config)
}

/// Load configuration from a TOML file over the defaults.
///
/// # Errors
/// Returns `PermIdError::Config` if the file is missing, unreadable, or
/// not valid TOML.
pub fn load_from_file(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        return Err(PermIdError::Config(format!("config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "loading configuration from file");
    let contents = std::fs::read_to_string(path)
        .map_err(|err| PermIdError::Config(format!("failed to read config file: {err}")))?;
    let file: FileConfig = toml::from_str(&contents)
        .map_err(|err| PermIdError::Config(format!("invalid config file: {err}")))?;

    let mut builder = ClientConfig::builder();
    if let Some(url) = file.lookup_url {
        builder = builder.lookup_url(url);
    }
    if let Some(url) = file.search_url {
        builder = builder.search_url(url);
    }
    if let Some(url) = file.match_url {
        builder = builder.match_url(url);
    }
    if let Some(url) = file.match_file_url {
        builder = builder.match_file_url(url);
    }
    if let Some(url) = file.tag_url {
        builder = builder.tag_url(url);
    }
    if let Some(token) = file.access_token {
        builder = builder.access_token(token);
    }
    if let Some(seconds) = file.timeout_seconds {
        builder = builder.timeout_seconds(seconds);
    }
    let config = builder.build()?;
    validate_endpoints(&config)?;
    Ok(config)
}

fn validate_endpoints(config: &ClientConfig) -> Result<()> {
    for (name, value) in [
        ("lookup", &config.lookup_url),
        ("search", &config.search_url),
        ("match", &config.match_url),
        ("match-file", &config.match_file_url),
        ("tag", &config.tag_url),
    ] {
        url::Url::parse(value).map_err(|err| {
            PermIdError::Config(format!("invalid {name} URL '{value}': {err}"))
        })?;
    }
    Ok(())
}

fn apply_env(config: &mut ClientConfig) -> Result<()> {
    if let Some(token) = env_var("PERMID_ACCESS_TOKEN") {
        config.access_token = if token.is_empty() { None } else { Some(token) };
    }
    if let Some(url) = env_var("PERMID_LOOKUP_URL") {
        config.lookup_url = url;
    }
    if let Some(url) = env_var("PERMID_SEARCH_URL") {
        config.search_url = url;
    }
    if let Some(url) = env_var("PERMID_MATCH_URL") {
        config.match_url = url;
    }
    if let Some(url) = env_var("PERMID_MATCH_FILE_URL") {
        config.match_file_url = url;
    }
    if let Some(url) = env_var("PERMID_TAG_URL") {
        config.tag_url = url;
    }
    if let Some(seconds) = env_var("PERMID_TIMEOUT_SECS") {
        config.timeout_seconds = seconds
            .parse::<u64>()
            .map_err(|err| PermIdError::Config(format!("invalid PERMID_TIMEOUT_SECS: {err}")))?;
    }
    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn probe_config_path() -> Option<PathBuf> {
    ["permid.toml", "config.toml"]
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permid.toml");
        std::fs::write(
            &path,
            r#"
access-token = "file-token"
timeout-seconds = 10
search-url = "https://staging.example.test/search"
"#,
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.access_token.as_deref(), Some("file-token"));
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.search_url, "https://staging.example.test/search");
        // Untouched fields keep the service defaults.
        assert_eq!(config.lookup_url, permid_domain::constants::DEFAULT_LOOKUP_URL);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permid.toml");
        std::fs::write(&path, "acess-token = \"typo\"\n").unwrap();

        assert!(load_from_file(&path).is_err());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_from_file(Path::new("/nonexistent/permid.toml")).unwrap_err();
        assert!(matches!(err, PermIdError::Config(_)));
    }
}
