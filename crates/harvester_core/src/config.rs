use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub type HarvesterId = i64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid remote url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("unknown harvester type {0:?}")]
    UnknownHarvesterType(String),
    #[error("invalid {harvester_type} options: {message}")]
    InvalidOptions {
        harvester_type: HarvesterType,
        message: String,
    },
    #[error("record is for a {found} harvester, expected {expected}")]
    MismatchedHarvesterType {
        expected: HarvesterType,
        found: HarvesterType,
    },
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Protocol implemented by a harvester worker. The string form is what gets
/// persisted alongside the harvester record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarvesterType {
    OgcWms,
}

impl HarvesterType {
    pub const ALL: &'static [HarvesterType] = &[HarvesterType::OgcWms];

    pub fn as_str(self) -> &'static str {
        match self {
            HarvesterType::OgcWms => "ogc_wms",
        }
    }
}

impl fmt::Display for HarvesterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarvesterType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HarvesterType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownHarvesterType(s.to_string()))
    }
}

/// Harvester configuration as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedHarvester {
    pub id: HarvesterId,
    pub remote_url: String,
    pub harvester_type: String,
    #[serde(default)]
    pub harvester_type_specific_configuration: serde_json::Value,
}

impl PersistedHarvester {
    pub fn harvester_type(&self) -> Result<HarvesterType, ConfigError> {
        self.harvester_type.parse()
    }

    /// Protocol-specific options as an object; a missing/null value counts as empty.
    pub fn specific_configuration(&self) -> serde_json::Value {
        match &self.harvester_type_specific_configuration {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other.clone(),
        }
    }
}

/// Validated, protocol-independent part of a harvester's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvesterConfig {
    id: HarvesterId,
    remote_url: Url,
    harvester_type: HarvesterType,
}

impl HarvesterConfig {
    pub fn new(
        remote_url: &str,
        id: HarvesterId,
        harvester_type: HarvesterType,
    ) -> Result<Self, ConfigError> {
        let remote_url = parse_remote_url(remote_url)?;
        Ok(Self {
            id,
            remote_url,
            harvester_type,
        })
    }

    pub fn from_persisted(record: &PersistedHarvester) -> Result<Self, ConfigError> {
        Self::new(&record.remote_url, record.id, record.harvester_type()?)
    }

    pub fn id(&self) -> HarvesterId {
        self.id
    }

    pub fn remote_url(&self) -> &Url {
        &self.remote_url
    }

    pub fn harvester_type(&self) -> HarvesterType {
        self.harvester_type
    }
}

fn parse_remote_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidUrl {
        url: raw.to_string(),
        message: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme {other}"),
        }),
    }
}
