//! Compiled-in schemas for the well-known Istio and Kubernetes collections.
//!
//! Built once on first use. Entries are static, so any duplicate or malformed
//! name here is a programming error and panics.

use std::sync::LazyLock;

use crate::name::Name;
use crate::registry::{Schemas, SchemasBuilder};
use crate::resource::ResourceSchema;
use crate::schema::Schema;

pub const DESTINATION_RULES: &str = "istio/networking/v1alpha3/destinationrules";
pub const ENVOY_FILTERS: &str = "istio/networking/v1alpha3/envoyfilters";
pub const GATEWAYS: &str = "istio/networking/v1alpha3/gateways";
pub const SERVICE_ENTRIES: &str = "istio/networking/v1alpha3/serviceentries";
pub const SIDECARS: &str = "istio/networking/v1alpha3/sidecars";
pub const VIRTUAL_SERVICES: &str = "istio/networking/v1alpha3/virtualservices";
pub const WORKLOAD_ENTRIES: &str = "istio/networking/v1alpha3/workloadentries";
pub const AUTHORIZATION_POLICIES: &str = "istio/security/v1beta1/authorizationpolicies";
pub const PEER_AUTHENTICATIONS: &str = "istio/security/v1beta1/peerauthentications";
pub const REQUEST_AUTHENTICATIONS: &str = "istio/security/v1beta1/requestauthentications";

pub const CUSTOM_RESOURCE_DEFINITIONS: &str =
    "k8s/apiextensions.k8s.io/v1/customresourcedefinitions";
pub const DEPLOYMENTS: &str = "k8s/apps/v1/deployments";
pub const ENDPOINTS: &str = "k8s/core/v1/endpoints";
pub const NAMESPACES: &str = "k8s/core/v1/namespaces";
pub const NODES: &str = "k8s/core/v1/nodes";
pub const PODS: &str = "k8s/core/v1/pods";
pub const SERVICES: &str = "k8s/core/v1/services";
pub const INGRESSES: &str = "k8s/extensions/v1beta1/ingresses";

const NETWORKING_GROUP: &str = "networking.istio.io";
const SECURITY_GROUP: &str = "security.istio.io";

static ALL: LazyLock<Schemas> = LazyLock::new(|| {
    let networking = |kind: &str, plural: &str| {
        ResourceSchema::new(
            NETWORKING_GROUP,
            "v1alpha3",
            kind,
            plural,
            format!("istio.networking.v1alpha3.{kind}"),
        )
    };
    let security = |kind: &str, plural: &str| {
        ResourceSchema::new(
            SECURITY_GROUP,
            "v1beta1",
            kind,
            plural,
            format!("istio.security.v1beta1.{kind}"),
        )
    };

    let mut builder = SchemasBuilder::new();
    builder
        .must_add(collection(DESTINATION_RULES, networking("DestinationRule", "destinationrules")))
        .must_add(collection(ENVOY_FILTERS, networking("EnvoyFilter", "envoyfilters")))
        .must_add(collection(GATEWAYS, networking("Gateway", "gateways")))
        .must_add(collection(SERVICE_ENTRIES, networking("ServiceEntry", "serviceentries")))
        .must_add(collection(SIDECARS, networking("Sidecar", "sidecars")))
        .must_add(collection(VIRTUAL_SERVICES, networking("VirtualService", "virtualservices")))
        .must_add(collection(WORKLOAD_ENTRIES, networking("WorkloadEntry", "workloadentries")))
        .must_add(collection(
            AUTHORIZATION_POLICIES,
            security("AuthorizationPolicy", "authorizationpolicies"),
        ))
        .must_add(collection(
            PEER_AUTHENTICATIONS,
            security("PeerAuthentication", "peerauthentications"),
        ))
        .must_add(collection(
            REQUEST_AUTHENTICATIONS,
            security("RequestAuthentication", "requestauthentications"),
        ))
        .must_add(collection(
            CUSTOM_RESOURCE_DEFINITIONS,
            ResourceSchema::new(
                "apiextensions.k8s.io",
                "v1",
                "CustomResourceDefinition",
                "customresourcedefinitions",
                "k8s.io.apiextensions_apiserver.pkg.apis.apiextensions.v1.CustomResourceDefinition",
            )
            .cluster_scoped(),
        ))
        .must_add(collection(
            DEPLOYMENTS,
            ResourceSchema::new(
                "apps",
                "v1",
                "Deployment",
                "deployments",
                "k8s.io.api.apps.v1.DeploymentSpec",
            ),
        ))
        .must_add(collection(
            ENDPOINTS,
            ResourceSchema::new("", "v1", "Endpoints", "endpoints", "k8s.io.api.core.v1.Endpoints"),
        ))
        .must_add(collection(
            NAMESPACES,
            ResourceSchema::new(
                "",
                "v1",
                "Namespace",
                "namespaces",
                "k8s.io.api.core.v1.NamespaceSpec",
            )
            .cluster_scoped(),
        ))
        .must_add(collection(
            NODES,
            ResourceSchema::new("", "v1", "Node", "nodes", "k8s.io.api.core.v1.NodeSpec")
                .cluster_scoped(),
        ))
        .must_add(collection(
            PODS,
            ResourceSchema::new("", "v1", "Pod", "pods", "k8s.io.api.core.v1.Pod"),
        ))
        .must_add(collection(
            SERVICES,
            ResourceSchema::new("", "v1", "Service", "services", "k8s.io.api.core.v1.ServiceSpec"),
        ))
        .must_add(
            collection(
                INGRESSES,
                ResourceSchema::new(
                    "extensions",
                    "v1beta1",
                    "Ingress",
                    "ingresses",
                    "k8s.io.api.extensions.v1beta1.IngressSpec",
                ),
            )
            .with_disabled(true),
        );
    builder.build()
});

static ISTIO: LazyLock<Schemas> = LazyLock::new(|| {
    let kube: Vec<&Schema> = all()
        .iter()
        .filter(|s| !s.resource().group().ends_with("istio.io"))
        .collect();
    all().remove(kube)
});

/// Every compiled-in collection.
pub fn all() -> &'static Schemas {
    &ALL
}

/// Only the Istio collections.
pub fn istio() -> &'static Schemas {
    &ISTIO
}

fn collection(name: &str, resource: ResourceSchema) -> Schema {
    match Name::new(name) {
        Ok(name) => Schema::new(name, resource),
        Err(e) => panic!("builtin collection: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schemas_validate() {
        if let Err(errors) = all().validate() {
            panic!("builtin schemas are invalid: {errors}");
        }
    }

    #[test]
    fn test_istio_subset() {
        let istio = istio();
        assert_eq!(istio.len(), 10);
        assert!(istio.find(VIRTUAL_SERVICES).is_some());
        assert!(istio.find(PODS).is_none());
        assert!(all().find(PODS).is_some());
    }

    #[test]
    fn test_disabled_ingress() {
        assert_eq!(all().disabled_collection_names().to_string(), INGRESSES);
    }

    #[test]
    fn test_lookup_by_kind() {
        assert_eq!(all().must_find_by_kind("virtualservice").name().as_str(), VIRTUAL_SERVICES);
        assert_eq!(all().must_find_by_group_and_kind("", "pod").name().as_str(), PODS);
        assert!(all().find_by_group_and_kind("apps", "Pod").is_none());
    }
}
