//! Resource descriptors
//!
//! A [`ResourceSchema`] describes one Kubernetes-style resource type: its API
//! group, version, kind, plural form and backing proto message.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, ValidationErrors};

const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

static DNS1123_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([-a-zA-Z0-9]*[a-zA-Z0-9])?$").expect("label pattern is valid")
});

static DNS1123_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("subdomain pattern is valid")
});

static PROTO_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("proto pattern is valid")
});

/// Group, version and kind of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = if self.group.is_empty() { "core" } else { &self.group };
        write!(f, "{}/{}/{}", group, self.version, self.kind)
    }
}

/// Metadata for a single resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// API group; empty for the Kubernetes core group
    #[serde(default)]
    group: String,
    version: String,
    kind: String,
    plural: String,
    /// Fully qualified proto message name
    proto: String,
    #[serde(default)]
    cluster_scoped: bool,
}

impl ResourceSchema {
    /// Create a namespaced resource schema.
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
        plural: impl Into<String>,
        proto: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
            plural: plural.into(),
            proto: proto.into(),
            cluster_scoped: false,
        }
    }

    /// Mark the resource as cluster-scoped.
    pub fn cluster_scoped(mut self) -> Self {
        self.cluster_scoped = true;
        self
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn proto(&self) -> &str {
        &self.proto
    }

    pub fn is_cluster_scoped(&self) -> bool {
        self.cluster_scoped
    }

    pub fn group_version_kind(&self) -> GroupVersionKind {
        GroupVersionKind {
            group: self.group.clone(),
            version: self.version.clone(),
            kind: self.kind.clone(),
        }
    }

    /// `group/version`, or just `version` for the core group.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Check the descriptor's fields, reporting every problem found.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !is_dns1123_label(&self.kind) {
            errors.push(self.invalid(format!("invalid kind: {:?}", self.kind)));
        }
        if !is_dns1123_label(&self.plural) {
            errors.push(self.invalid(format!(
                "invalid plural for kind {}: {:?}",
                self.kind, self.plural
            )));
        }
        if self.version.is_empty() {
            errors.push(self.invalid("version must not be empty".to_string()));
        }
        if !self.group.is_empty() && !is_dns1123_subdomain(&self.group) {
            errors.push(self.invalid(format!("invalid group: {:?}", self.group)));
        }
        if !PROTO_MESSAGE.is_match(&self.proto) {
            errors.push(self.invalid(format!("invalid proto message name: {:?}", self.proto)));
        }

        errors.into_result()
    }

    fn invalid(&self, reason: String) -> SchemaError {
        SchemaError::InvalidResource {
            resource: self.group_version_kind().to_string(),
            reason,
        }
    }
}

fn is_dns1123_label(value: &str) -> bool {
    value.len() <= DNS1123_LABEL_MAX_LENGTH && DNS1123_LABEL.is_match(value)
}

fn is_dns1123_subdomain(value: &str) -> bool {
    value.len() <= DNS1123_SUBDOMAIN_MAX_LENGTH && DNS1123_SUBDOMAIN.is_match(value)
}
