//! Client configuration

use std::time::Duration;

use chrono::FixedOffset;

use crate::source::DataSource;
use crate::{ClientError, ClientResult};

/// Published CSV export URLs, one per sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExports {
    pub devices: String,
    pub users: String,
    pub history: String,
}

/// Client configuration for the remote sheet service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Script endpoint (e.g., "https://script.google.com/macros/s/.../exec").
    /// Serves `GET_DATA` reads and receives every write.
    pub endpoint_url: Option<String>,

    /// CSV exports; when set, reads go through these instead of `GET_DATA`
    pub csv_exports: Option<CsvExports>,

    /// Shared password gating ADMIN identification
    pub admin_password: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Wait between a write and the refetch that picks it up
    pub settle_delay: Duration,

    /// Offset history timestamps are rendered in
    pub display_offset: FixedOffset,
}

impl ClientConfig {
    /// Create a configuration pointing at a script endpoint
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            ..Self::default()
        }
    }

    /// Load from `ASSET_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unparsable values fall back to defaults
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let csv_exports = match (
            var("ASSET_DEVICES_CSV_URL"),
            var("ASSET_USERS_CSV_URL"),
            var("ASSET_HISTORY_CSV_URL"),
        ) {
            (Some(devices), Some(users), Some(history)) => Some(CsvExports {
                devices,
                users,
                history,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!("Incomplete ASSET_*_CSV_URL set, ignoring CSV exports");
                None
            }
        };

        let defaults = Self::default();
        let display_offset = var("ASSET_DISPLAY_UTC_OFFSET_HOURS")
            .and_then(|v| v.trim().parse::<i32>().ok())
            .and_then(|h| h.checked_mul(3600))
            .and_then(FixedOffset::east_opt)
            .unwrap_or(defaults.display_offset);

        Self {
            endpoint_url: var("ASSET_ENDPOINT_URL"),
            csv_exports,
            admin_password: var("ASSET_ADMIN_PASSWORD"),
            timeout: var("ASSET_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            settle_delay: var("ASSET_SETTLE_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle_delay),
            display_offset,
        }
    }

    /// Set the script endpoint
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Read through CSV exports instead of `GET_DATA`
    pub fn with_csv_exports(
        mut self,
        devices: impl Into<String>,
        users: impl Into<String>,
        history: impl Into<String>,
    ) -> Self {
        self.csv_exports = Some(CsvExports {
            devices: devices.into(),
            users: users.into(),
            history: history.into(),
        });
        self
    }

    /// Set the admin password
    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = Some(password.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the post-write settle delay
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    /// Which read path to use. CSV exports win over the JSON endpoint.
    pub fn data_source(&self) -> ClientResult<DataSource> {
        if let Some(csv) = &self.csv_exports {
            return Ok(DataSource::Csv(csv.clone()));
        }
        self.endpoint_url
            .clone()
            .map(DataSource::Json)
            .ok_or_else(|| {
                ClientError::Config(
                    "either ASSET_ENDPOINT_URL or all three ASSET_*_CSV_URL must be set".into(),
                )
            })
    }

    /// Endpoint writes are posted to
    pub fn write_endpoint(&self) -> ClientResult<&str> {
        self.endpoint_url
            .as_deref()
            .ok_or_else(|| ClientError::Config("ASSET_ENDPOINT_URL is required for writes".into()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            csv_exports: None,
            admin_password: None,
            timeout: 30,
            settle_delay: Duration::from_millis(2000),
            display_offset: shared::normalize::default_offset(),
        }
    }
}
