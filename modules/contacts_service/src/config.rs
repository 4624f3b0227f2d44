//! Configuration for contacts service module

use anyhow::Context;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

/// Environment prefix; nested keys are separated by `__`
/// (e.g. `CONTACTS__CRM__BASE_URL`)
pub const ENV_PREFIX: &str = "CONTACTS__";

/// Contacts service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Address the REST server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// What to do when the CRM returns a record without a revision
    #[serde(default)]
    pub missing_revision: MissingRevisionPolicy,

    /// CRM provider settings
    #[serde(default)]
    pub crm: CrmConfig,

    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            missing_revision: MissingRevisionPolicy::default(),
            crm: CrmConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an optional YAML file and the environment.
    /// Environment values win over the file. `WIX_API_KEY` is accepted as
    /// an alias for `crm.api_key`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment = figment
            .merge(
                Env::raw()
                    .only(&["WIX_API_KEY"])
                    .map(|_| "crm.api_key".into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .context("failed to load contacts service configuration")
    }
}

/// Policy for records that come back from the CRM without a revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRevisionPolicy {
    /// Send revision 0 and let the CRM decide
    #[default]
    Zero,
    /// Fail the mutation without calling the CRM
    Reject,
}

/// Which CRM provider backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrmProviderKind {
    /// Vendor REST API over HTTP
    #[default]
    Http,
    /// Process-local store, for development
    Memory,
}

/// CRM provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrmConfig {
    #[serde(default)]
    pub provider: CrmProviderKind,

    /// Base URL of the vendor contacts API
    #[serde(default = "default_crm_base_url")]
    pub base_url: String,

    /// API key sent in the `Authorization` header
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            provider: CrmProviderKind::default(),
            base_url: default_crm_base_url(),
            api_key: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Emit JSON log lines instead of human-readable text
    #[serde(default)]
    pub json: bool,

    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: default_log_filter(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_string()
}

fn default_crm_base_url() -> String {
    "https://www.wixapis.com/contacts/v4".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}
