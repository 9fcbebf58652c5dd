//! Resource Schemas
//!
//! An immutable, indexed registry of configuration resource schemas. Each
//! schema names a collection (e.g. `istio/networking/v1alpha3/gateways`) and
//! describes the resource stored in it: API group, version, kind, plural and
//! proto message.
//!
//! ## Features
//!
//! - **Builder-then-freeze**: [`SchemasBuilder`] rejects duplicate names and
//!   hands over an immutable [`Schemas`] value
//! - **Lookups**: by collection name, by kind, or by group and kind
//! - **Deterministic listings**: insertion order for iteration, sorted output
//!   for names and kinds
//! - **Aggregated validation**: every invalid resource is reported at once
//! - **Builtin set**: the well-known Istio and Kubernetes collections
//!
//! ## Example
//!
//! ```text
//! let mut builder = SchemasBuilder::new();
//! builder.add(schema)?;
//! let schemas = builder.build();
//!
//! let gateway = schemas.find_by_group_and_kind("networking.istio.io", "gateway");
//! schemas.validate()?;
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod name;
pub mod registry;
pub mod resource;
pub mod schema;

pub use config::SchemaConfig;
pub use error::{Result, SchemaError, ValidationErrors};
pub use name::{Name, Names};
pub use registry::{Schemas, SchemasBuilder};
pub use resource::{GroupVersionKind, ResourceSchema};
pub use schema::Schema;
