//! Collection schema descriptors

use serde::{Deserialize, Serialize};

use crate::name::Name;
use crate::resource::ResourceSchema;

/// Metadata describing one collection of configuration resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique name of the collection (e.g., "istio/networking/v1alpha3/gateways")
    name: Name,
    /// Disabled collections are known but not served
    #[serde(default)]
    disabled: bool,
    /// The resource type stored in this collection
    resource: ResourceSchema,
}

impl Schema {
    /// Create a new, enabled schema
    pub fn new(name: Name, resource: ResourceSchema) -> Self {
        Self {
            name,
            disabled: false,
            resource,
        }
    }

    /// Set the disabled flag
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Collection name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Resource metadata for this collection
    pub fn resource(&self) -> &ResourceSchema {
        &self.resource
    }

    /// Whether the collection is disabled
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}
