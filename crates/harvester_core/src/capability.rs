/// Static declaration of which contract operations a worker actually supports.
///
/// Orchestration code branches on these flags instead of invoking an
/// operation and catching the unsupported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerCapabilities {
    pub supports_listing: bool,
    pub supports_counting: bool,
    pub supports_resource_update: bool,
    /// Whether raw resource payloads may be copied verbatim into the target.
    pub allows_copying_resources: bool,
}

impl WorkerCapabilities {
    pub fn supports(&self, operation: ContractOperation) -> bool {
        match operation {
            ContractOperation::ListResources => self.supports_listing,
            ContractOperation::CountResources => self.supports_counting,
            ContractOperation::UpdateResource => self.supports_resource_update,
            ContractOperation::CheckAvailability | ContractOperation::GetResource => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractOperation {
    CheckAvailability,
    CountResources,
    ListResources,
    GetResource,
    UpdateResource,
}

impl ContractOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractOperation::CheckAvailability => "check_availability",
            ContractOperation::CountResources => "get_num_available_resources",
            ContractOperation::ListResources => "list_resources",
            ContractOperation::GetResource => "get_resource",
            ContractOperation::UpdateResource => "update_geonode_resource",
        }
    }
}

impl std::fmt::Display for ContractOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
