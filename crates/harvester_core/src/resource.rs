use serde::{Deserialize, Serialize};

/// Kind of remote resource a worker can enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteResourceType {
    Dataset,
}

impl RemoteResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteResourceType::Dataset => "dataset",
        }
    }
}

/// Summary returned by enumeration, before any full fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefRemoteResource {
    pub unique_identifier: String,
    pub title: String,
    pub resource_type: RemoteResourceType,
}

/// WGS84 extent as west/south/east/north degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicBoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordIdentification {
    pub name: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub keywords: Vec<String>,
    pub spatial_extent: Option<GeographicBoundingBox>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDistribution {
    /// Service endpoint that serves the resource.
    pub wms_url: String,
    /// Layer name to pass to GetMap, when the layer is requestable.
    pub layer_name: Option<String>,
    /// Whether the service answers GetFeatureInfo for this layer.
    pub queryable: bool,
}

/// Normalized descriptor produced for a single remote resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDescription {
    pub uuid: String,
    pub resource_type: RemoteResourceType,
    pub identification: RecordIdentification,
    pub distribution: RecordDistribution,
    pub reference_systems: Vec<String>,
}

/// Result of a harvest that the target catalog reconciles with its own record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestedResourceInfo {
    pub resource_descriptor: RecordDescription,
    pub additional_information: Option<serde_json::Value>,
}

/// Target-catalog view of a resource that is tracked for harvesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestableResource {
    pub unique_identifier: String,
    pub title: String,
    pub remote_resource_type: RemoteResourceType,
    pub geonode_resource_id: Option<i64>,
}
