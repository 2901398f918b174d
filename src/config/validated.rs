//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::relay::WebhookEndpoints;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Address to bind
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// HTML page served at `/`
    pub index_file: PathBuf,

    /// Directory for temporary upload data
    pub upload_dir: PathBuf,

    /// Webhook URLs for the two relay flows
    pub endpoints: WebhookEndpoints,

    /// Timeout for each webhook call
    pub timeout: Duration,

    /// Maximum upload size in bytes
    pub max_file_size: usize,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    // Webhook URLs are left out: they may embed credentials.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ bind: {}, index_file: {}, upload_dir: {}, message_webhook: {}, \
             file_webhook: {}, timeout: {}s, max_file_size: {} }}",
            self.socket_addr(),
            self.index_file.display(),
            self.upload_dir.display(),
            configured(self.endpoints.message_configured()),
            configured(self.endpoints.file_configured()),
            self.timeout.as_secs(),
            self.max_file_size,
        )
    }
}

const fn configured(flag: bool) -> &'static str {
    if flag { "configured" } else { "not configured" }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (including their environment variables) take precedence
    /// over TOML config values, which take precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The host is not an IP address
    /// - A webhook URL is invalid or not http(s)
    /// - The timeout or maximum file size is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let server = toml.map(|t| &t.server);
        let webhook = toml.map(|t| &t.webhook);

        let host = Self::resolve_host(cli, toml)?;

        let port = cli
            .port
            .or_else(|| server.and_then(|s| s.port))
            .unwrap_or(defaults::PORT);

        let index_file = cli.index_file.clone().unwrap_or_else(|| {
            PathBuf::from(
                server
                    .and_then(|s| s.index_file.as_deref())
                    .unwrap_or(defaults::INDEX_FILE),
            )
        });

        let upload_dir = cli.upload_dir.clone().unwrap_or_else(|| {
            PathBuf::from(
                server
                    .and_then(|s| s.upload_dir.as_deref())
                    .unwrap_or(defaults::UPLOAD_DIR),
            )
        });

        let message = resolve_url(
            field::MESSAGE_URL,
            cli.message_url.as_deref(),
            webhook.and_then(|w| w.message_url.as_deref()),
            defaults::MESSAGE_URL,
        )?;
        let file = resolve_url(
            field::FILE_URL,
            cli.file_url.as_deref(),
            webhook.and_then(|w| w.file_url.as_deref()),
            defaults::FILE_URL,
        )?;

        let timeout = Self::resolve_timeout(cli, toml)?;
        let max_file_size = Self::resolve_max_file_size(cli, toml)?;

        Ok(Self {
            host,
            port,
            index_file,
            upload_dir,
            endpoints: WebhookEndpoints { message, file },
            timeout,
            max_file_size,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns the socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    fn resolve_host(cli: &Cli, toml: Option<&TomlConfig>) -> Result<IpAddr, ConfigError> {
        let host = cli
            .host
            .as_deref()
            .or_else(|| toml.and_then(|t| t.server.host.as_deref()))
            .unwrap_or(defaults::HOST);

        host.parse::<IpAddr>().map_err(|e| ConfigError::InvalidHost {
            value: host.to_string(),
            reason: e.to_string(),
        })
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.webhook.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_max_file_size(cli: &Cli, toml: Option<&TomlConfig>) -> Result<usize, ConfigError> {
        let bytes = cli
            .max_file_size
            .or_else(|| toml.and_then(|t| t.upload.max_file_size))
            .unwrap_or(defaults::MAX_FILE_SIZE);

        if bytes == 0 {
            return Err(ConfigError::InvalidSize {
                field: field::MAX_FILE_SIZE,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(bytes)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_url(
    field: &'static str,
    cli: Option<&str>,
    toml: Option<&str>,
    default: &str,
) -> Result<Url, ConfigError> {
    let raw = cli.or(toml).unwrap_or(default);
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        )));
    }

    Ok(url)
}
