//! Configuration for dynamically assembled schema sets
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schemas.toml)
//! - Environment variables (SCHEMAS__*)
//!
//! ## Example config file (schemas.toml):
//! ```toml
//! [registry]
//! include_builtin = true
//! exclude_disabled = false
//! validate_on_load = true
//!
//! [[schemas]]
//! name = "example/widgets/v1/widgets"
//! disabled = false
//!
//! [schemas.resource]
//! group = "widgets.example.io"
//! version = "v1"
//! kind = "Widget"
//! plural = "widgets"
//! proto = "example.widgets.v1.Widget"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::builtin;
use crate::error::Result;
use crate::registry::{Schemas, SchemasBuilder};
use crate::schema::Schema;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Registry assembly settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Additional schemas, appended after the builtin set
    #[serde(default)]
    pub schemas: Vec<Schema>,
}

/// How the registry is assembled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Start from the compiled-in collections
    #[serde(default = "default_true")]
    pub include_builtin: bool,

    /// Drop disabled collections from the result
    #[serde(default)]
    pub exclude_disabled: bool,

    /// Validate every resource after assembly
    #[serde(default = "default_true")]
    pub validate_on_load: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            exclude_disabled: false,
            validate_on_load: true,
        }
    }
}

impl SchemaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["schemas.toml", ".schemas.toml", "config/schemas.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        let project_dirs = directories::ProjectDirs::from("dev", "resource-schemas", "schemas");
        if let Some(config_dir) = project_dirs {
            let xdg_config = config_dir.config_dir().join("schemas.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SCHEMAS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Assemble the configured registry.
    ///
    /// Duplicate names and, when `validate_on_load` is set, invalid resources
    /// are reported as errors.
    pub fn build_schemas(&self) -> Result<Schemas> {
        let mut builder = SchemasBuilder::new();

        if self.registry.include_builtin {
            for schema in builtin::all().iter() {
                builder.add(schema.clone())?;
            }
        }
        for schema in &self.schemas {
            builder.add(schema.clone())?;
        }

        let mut schemas = builder.build();

        if self.registry.exclude_disabled {
            let disabled: Vec<Schema> = schemas
                .iter()
                .filter(|s| s.is_disabled())
                .cloned()
                .collect();
            debug!(count = disabled.len(), "excluding disabled collections");
            schemas = schemas.remove(&disabled);
        }

        if self.registry.validate_on_load {
            schemas.validate()?;
        }

        info!(collections = schemas.len(), "schema registry assembled");
        Ok(schemas)
    }
}
