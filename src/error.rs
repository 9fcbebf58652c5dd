//! Error types for the schema registry

use std::fmt;

use thiserror::Error;

use crate::name::Name;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema registry errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("collection already exists: {0}")]
    DuplicateName(Name),

    #[error("invalid collection name: {0:?}")]
    InvalidName(String),

    #[error("invalid resource {resource}: {reason}")]
    InvalidResource { resource: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Accumulates every failure of a multi-step validation.
///
/// Appending another `ValidationErrors` flattens it, so nested validations
/// produce a single list in the order the failures were found.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<SchemaError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure.
    pub fn push(&mut self, error: SchemaError) {
        match error {
            SchemaError::Validation(nested) => self.errors.extend(nested.errors),
            other => self.errors.push(other),
        }
    }

    /// Merge the outcome of another validation, if it failed.
    pub fn append(&mut self, result: std::result::Result<(), ValidationErrors>) {
        if let Err(nested) = result {
            self.errors.extend(nested.errors);
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 { "error" } else { "errors" };
        write!(f, "{} {} occurred:", self.errors.len(), noun)?;
        for error in &self.errors {
            write!(f, "\n\t* {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
