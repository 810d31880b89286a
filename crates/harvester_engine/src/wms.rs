//! OGC Web Map Service worker.
//!
//! Every call issues a fresh GetCapabilities request; the parsed document is
//! dropped when the call returns.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};

use engine_logging::{engine_debug, engine_info};
use harvester_core::{
    BriefRemoteResource, ConfigError, ContractOperation, HarvestableResource,
    HarvestedResourceInfo, HarvesterConfig, HarvesterId, HarvesterType, HarvestingSessionId,
    PersistedHarvester, RecordDescription, RecordDistribution, RecordIdentification,
    RemoteResourceType, SessionRecorder, SessionUpdate, WorkerCapabilities,
};

use crate::capabilities::{discover_layers, DiscoveredLayer, Discovery, TitleFilter};
use crate::fetch::{FetchSettings, HttpSession};
use crate::worker::{HarvestError, HarvesterWorker};
use crate::{decode_xml, CapabilitiesError};

/// Fixed wire contract; merged into the endpoint URL per request.
const GET_CAPABILITIES_PARAMS: [(&str, &str); 3] = [
    ("service", "WMS"),
    ("version", "1.3.0"),
    ("request", "GetCapabilities"),
];

/// Number of resources returned by one `list_resources` call.
pub const PAGE_SIZE: usize = 10;

const SCHEMA_ID: &str = "https://geonode.org/harvesting/ogc-wms-harvester.schema.json";

/// Protocol-specific options. Deserialization rejects anything the published
/// schema rejects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WmsOptions {
    #[serde(default)]
    pub dataset_title_filter: Option<String>,
}

impl WmsOptions {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|err| ConfigError::InvalidOptions {
            harvester_type: HarvesterType::OgcWms,
            message: err.to_string(),
        })
    }

    /// JSON schema (draft 2020-12) describing the accepted options.
    pub fn config_schema() -> serde_json::Value {
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "$id": SCHEMA_ID,
            "title": "OGC WMS harvester config",
            "description": "A jsonschema for validating configuration option for the remote OGC WMS harvester",
            "type": "object",
            "properties": {
                "dataset_title_filter": {
                    "type": "string"
                }
            },
            "additionalProperties": false
        })
    }
}

pub struct OgcWmsHarvester {
    config: HarvesterConfig,
    title_filter: Option<TitleFilter>,
    http: HttpSession,
    sessions: Arc<dyn SessionRecorder>,
}

impl OgcWmsHarvester {
    /// Builds the worker without touching the network.
    pub fn new(
        remote_url: &str,
        id: HarvesterId,
        options: WmsOptions,
        sessions: Arc<dyn SessionRecorder>,
    ) -> Result<Self, ConfigError> {
        Self::with_settings(remote_url, id, options, FetchSettings::default(), sessions)
    }

    pub fn with_settings(
        remote_url: &str,
        id: HarvesterId,
        options: WmsOptions,
        settings: FetchSettings,
        sessions: Arc<dyn SessionRecorder>,
    ) -> Result<Self, ConfigError> {
        let config = HarvesterConfig::new(remote_url, id, HarvesterType::OgcWms)?;
        let http = HttpSession::new(settings).map_err(|err| ConfigError::HttpClient(err.message))?;
        let title_filter = options.dataset_title_filter.as_deref().map(TitleFilter::new);
        Ok(Self {
            config,
            title_filter,
            http,
            sessions,
        })
    }

    pub fn from_persisted(
        record: &PersistedHarvester,
        settings: FetchSettings,
        sessions: Arc<dyn SessionRecorder>,
    ) -> Result<Self, ConfigError> {
        let found = record.harvester_type()?;
        if found != HarvesterType::OgcWms {
            return Err(ConfigError::MismatchedHarvesterType {
                expected: HarvesterType::OgcWms,
                found,
            });
        }
        let options = WmsOptions::from_value(record.specific_configuration())?;
        Self::with_settings(&record.remote_url, record.id, options, settings, sessions)
    }

    /// Fetches the capabilities document and runs leaf-layer discovery with
    /// the configured title filter.
    pub async fn discover(&self) -> Result<Discovery, HarvestError> {
        let output = self
            .http
            .get(self.config.remote_url(), &GET_CAPABILITIES_PARAMS)
            .await?;
        engine_debug!(
            "Fetched {} bytes of capabilities from {}",
            output.metadata.byte_len,
            output.metadata.final_url
        );
        let decoded = decode_xml(&output.bytes, output.metadata.content_type.as_deref())
            .map_err(CapabilitiesError::from)?;
        engine_debug!("Capabilities decoded as {}", decoded.encoding_label);
        let discovery = discover_layers(&decoded.text, self.title_filter.as_ref())?;
        engine_info!(
            "Harvester {} found {} layers ({} skipped)",
            self.config.id(),
            discovery.layers.len(),
            discovery.skipped
        );
        Ok(discovery)
    }

    fn describe(&self, layer: &DiscoveredLayer) -> RecordDescription {
        let remote_url = self.config.remote_url().as_str();
        RecordDescription {
            uuid: record_uuid(remote_url, layer.identifier()),
            resource_type: RemoteResourceType::Dataset,
            identification: RecordIdentification {
                name: layer.identifier().to_string(),
                title: layer.title.clone(),
                abstract_text: layer.abstract_text.clone(),
                keywords: layer.keywords.clone(),
                spatial_extent: layer.geographic_bbox,
            },
            distribution: RecordDistribution {
                wms_url: remote_url.to_string(),
                layer_name: layer.name.clone(),
                queryable: layer.queryable,
            },
            reference_systems: layer.crs.clone(),
        }
    }

    fn unsupported(&self, operation: ContractOperation) -> HarvestError {
        HarvestError::Unsupported {
            harvester_type: HarvesterType::OgcWms,
            operation,
        }
    }
}

#[async_trait::async_trait]
impl HarvesterWorker for OgcWmsHarvester {
    fn config(&self) -> &HarvesterConfig {
        &self.config
    }

    /// WMS only serves rendered maps, so there is no source data to copy.
    fn capabilities(&self) -> WorkerCapabilities {
        WorkerCapabilities {
            supports_listing: true,
            supports_counting: true,
            supports_resource_update: false,
            allows_copying_resources: false,
        }
    }

    async fn check_availability(&self, timeout: Duration) -> bool {
        match self.http.probe(self.config.remote_url(), timeout).await {
            Ok(()) => true,
            Err(err) => {
                engine_info!(
                    "Harvester {} remote {} is not available: {}",
                    self.config.id(),
                    self.config.remote_url(),
                    err.kind
                );
                false
            }
        }
    }

    async fn get_num_available_resources(&self) -> Result<usize, HarvestError> {
        Ok(self.discover().await?.layers.len())
    }

    async fn list_resources(
        &self,
        offset: usize,
    ) -> Result<Vec<BriefRemoteResource>, HarvestError> {
        let discovery = self.discover().await?;
        Ok(discovery
            .layers
            .iter()
            .skip(offset)
            .take(PAGE_SIZE)
            .map(|layer| BriefRemoteResource {
                unique_identifier: layer.identifier().to_string(),
                title: layer.title.clone(),
                resource_type: RemoteResourceType::Dataset,
            })
            .collect())
    }

    async fn get_resource(
        &self,
        resource_id: &str,
        resource_type: RemoteResourceType,
        harvesting_session_id: Option<HarvestingSessionId>,
    ) -> Result<Option<RecordDescription>, HarvestError> {
        let discovery = self.discover().await?;

        if let Some(session_id) = harvesting_session_id {
            // The finish is attempted even when the update was rejected.
            let updated = self.sessions.update_harvesting_session(
                session_id,
                SessionUpdate::total_records_found(discovery.layers.len()),
            );
            let finished = self.sessions.finish_harvesting_session(session_id);
            updated.and(finished)?;
        }

        if resource_type != RemoteResourceType::Dataset {
            engine_debug!("WMS has no {} resources", resource_type.as_str());
            return Ok(None);
        }
        let record = discovery
            .layers
            .iter()
            .find(|layer| layer.identifier() == resource_id)
            .map(|layer| self.describe(layer));
        if record.is_none() {
            engine_info!("Layer {resource_id:?} not found on {}", self.config.remote_url());
        }
        Ok(record)
    }

    async fn update_geonode_resource(
        &self,
        _harvested_info: &HarvestedResourceInfo,
        _harvestable_resource: &HarvestableResource,
        _harvesting_session_id: HarvestingSessionId,
    ) -> Result<(), HarvestError> {
        Err(self.unsupported(ContractOperation::UpdateResource))
    }
}

/// Deterministic UUID-shaped id for a layer on a given service.
pub fn record_uuid(remote_url: &str, identifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(remote_url.as_bytes());
    hasher.update([0u8]);
    hasher.update(identifier.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(36);
    for (i, byte) in digest.iter().take(16).enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            hex.push('-');
        }
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
