use std::time::Duration;

use harvester_core::{
    BriefRemoteResource, ConfigError, ContractOperation, HarvestableResource,
    HarvestedResourceInfo, HarvesterConfig, HarvestingSessionId, RecordDescription,
    RemoteResourceType, SessionError, WorkerCapabilities,
};
use thiserror::Error;

use crate::{CapabilitiesError, FetchError};

pub const DEFAULT_AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarvestError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] CapabilitiesError),
    /// The protocol does not implement this contract operation. This is a
    /// capability gap, not a transient failure.
    #[error("{harvester_type} harvester does not support {operation}")]
    Unsupported {
        harvester_type: harvester_core::HarvesterType,
        operation: ContractOperation,
    },
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl HarvestError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, HarvestError::Unsupported { .. })
    }
}

/// Contract every remote-service protocol worker implements.
///
/// Workers are bound to one configuration for one harvesting run. Calls on a
/// single worker must not overlap.
#[async_trait::async_trait]
pub trait HarvesterWorker: Send + Sync {
    fn config(&self) -> &HarvesterConfig;

    /// Which optional operations this worker implements.
    fn capabilities(&self) -> WorkerCapabilities;

    fn allows_copying_resources(&self) -> bool {
        self.capabilities().allows_copying_resources
    }

    /// Reachability probe. Never fails: every error maps to `false`.
    async fn check_availability(&self, timeout: Duration) -> bool;

    async fn get_num_available_resources(&self) -> Result<usize, HarvestError>;

    async fn list_resources(&self, offset: usize)
        -> Result<Vec<BriefRemoteResource>, HarvestError>;

    /// Fetches and converts one resource. When a session is given, the worker
    /// records the discovered total on it and finishes it.
    async fn get_resource(
        &self,
        resource_id: &str,
        resource_type: RemoteResourceType,
        harvesting_session_id: Option<HarvestingSessionId>,
    ) -> Result<Option<RecordDescription>, HarvestError>;

    async fn update_geonode_resource(
        &self,
        harvested_info: &HarvestedResourceInfo,
        harvestable_resource: &HarvestableResource,
        harvesting_session_id: HarvestingSessionId,
    ) -> Result<(), HarvestError>;
}
