//! Harvester engine: remote-service workers and the IO they need.
mod capabilities;
mod decode;
mod fetch;
mod registry;
mod types;
mod wms;
mod worker;
pub mod xml;

pub use capabilities::{discover_layers, CapabilitiesError, DiscoveredLayer, Discovery, TitleFilter};
pub use decode::{decode_xml, DecodeError, DecodedXml};
pub use fetch::{merge_query, FetchSettings, HttpSession};
pub use registry::{build_worker, config_schema_for};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
pub use wms::{record_uuid, OgcWmsHarvester, WmsOptions, PAGE_SIZE};
pub use worker::{HarvestError, HarvesterWorker, DEFAULT_AVAILABILITY_TIMEOUT};
