//! Runtime configuration read from `CATALOG_*` environment variables.

use std::net::SocketAddr;

use thiserror::Error;

use catalog_core::SiteId;
use catalog_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CURRENCIES: &str = "EUR,USD";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub bind_addr: SocketAddr,
    /// Site used by requests without an `X-Site-Id` header.
    pub default_site: SiteId,
    /// Currency codes seeded as enabled.
    pub currencies: Vec<String>,
    /// Ordered names of the price sub-clients to run.
    pub price_subparts: Vec<String>,
    pub log_format: LogFormat,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            default_site: SiteId::from_uuid(uuid::Uuid::nil()),
            currencies: split_list(DEFAULT_CURRENCIES),
            price_subparts: Vec::new(),
            log_format: LogFormat::default(),
        }
    }
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match var("CATALOG_BIND_ADDR") {
            Some(v) => v.trim().parse().map_err(|e| ConfigError {
                var: "CATALOG_BIND_ADDR",
                message: format!("{e}"),
            })?,
            None => defaults.bind_addr,
        };

        let default_site = match var("CATALOG_DEFAULT_SITE") {
            Some(v) => v.parse().map_err(|e| ConfigError {
                var: "CATALOG_DEFAULT_SITE",
                message: format!("{e}"),
            })?,
            None => defaults.default_site,
        };

        let currencies = var("CATALOG_CURRENCIES")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.currencies);

        let price_subparts = var("CATALOG_PRICE_SUBPARTS")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.price_subparts);

        let log_format = match var("CATALOG_LOG_FORMAT") {
            Some(v) => v.parse().map_err(|e| ConfigError {
                var: "CATALOG_LOG_FORMAT",
                message: format!("{e}"),
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            bind_addr,
            default_site,
            currencies,
            price_subparts,
            log_format,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
