//! Harvester core: configuration, session bookkeeping and resource descriptors.
mod capability;
mod config;
mod resource;
mod session;

pub use capability::{ContractOperation, WorkerCapabilities};
pub use config::{ConfigError, HarvesterConfig, HarvesterId, HarvesterType, PersistedHarvester};
pub use resource::{
    BriefRemoteResource, GeographicBoundingBox, HarvestableResource, HarvestedResourceInfo,
    RecordDescription, RecordDistribution, RecordIdentification, RemoteResourceType,
};
pub use session::{
    HarvestingSession, HarvestingSessionId, InMemorySessionStore, SessionError, SessionRecorder,
    SessionStatus, SessionUpdate,
};
