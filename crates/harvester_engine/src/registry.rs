use std::sync::Arc;

use harvester_core::{ConfigError, HarvesterType, PersistedHarvester, SessionRecorder};

use crate::fetch::FetchSettings;
use crate::wms::{OgcWmsHarvester, WmsOptions};
use crate::worker::HarvesterWorker;

/// Schema for the protocol-specific options of `harvester_type`, used to
/// validate configuration before any worker is built.
pub fn config_schema_for(harvester_type: HarvesterType) -> Option<serde_json::Value> {
    match harvester_type {
        HarvesterType::OgcWms => Some(WmsOptions::config_schema()),
    }
}

/// Builds the worker named by the record's `harvester_type`.
pub fn build_worker(
    record: &PersistedHarvester,
    settings: FetchSettings,
    sessions: Arc<dyn SessionRecorder>,
) -> Result<Box<dyn HarvesterWorker>, ConfigError> {
    match record.harvester_type()? {
        HarvesterType::OgcWms => Ok(Box::new(OgcWmsHarvester::from_persisted(
            record, settings, sessions,
        )?)),
    }
}
