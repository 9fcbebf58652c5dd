//! Schema Registry
//!
//! [`Schemas`] is an immutable, indexed set of collection schemas. It is put
//! together once with a [`SchemasBuilder`] and then only queried; registries
//! with schemas added or removed are derived as new values.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{Result, SchemaError, ValidationErrors};
use crate::name::{Name, Names};
use crate::schema::Schema;

/// Metadata about configuration resources.
///
/// Name lookups are O(1); iteration follows insertion order. Equality is
/// order-sensitive: two registries holding the same schemas added in a
/// different order are not equal.
#[derive(Debug, Clone, Default)]
pub struct Schemas {
    /// Keyed by collection name, ordered by insertion.
    by_collection: IndexMap<Name, Arc<Schema>>,
}

/// Accumulates schemas for a [`Schemas`] value.
#[derive(Debug, Default)]
pub struct SchemasBuilder {
    schemas: Schemas,
}

impl SchemasBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema. Fails if a schema with the same name was already added.
    pub fn add(&mut self, schema: Schema) -> Result<()> {
        self.add_shared(Arc::new(schema))
    }

    /// Calls [`add`](Self::add) and panics if it fails.
    pub fn must_add(&mut self, schema: Schema) -> &mut Self {
        self.must_add_shared(Arc::new(schema))
    }

    fn add_shared(&mut self, schema: Arc<Schema>) -> Result<()> {
        match self.schemas.by_collection.entry(schema.name().clone()) {
            Entry::Occupied(existing) => {
                warn!(collection = %existing.key(), "rejecting duplicate collection");
                Err(SchemaError::DuplicateName(existing.key().clone()))
            }
            Entry::Vacant(slot) => {
                slot.insert(schema);
                Ok(())
            }
        }
    }

    fn must_add_shared(&mut self, schema: Arc<Schema>) -> &mut Self {
        if let Err(e) = self.add_shared(schema) {
            panic!("SchemasBuilder::must_add: {e}");
        }
        self
    }

    /// Number of schemas added so far.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether nothing has been added since the last build.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Hand over the accumulated schemas, leaving the builder empty.
    pub fn build(&mut self) -> Schemas {
        let schemas = std::mem::take(&mut self.schemas);
        debug!(collections = schemas.len(), "built schemas");
        schemas
    }
}

impl Schemas {
    /// Shortcut for building from a known-good list. Panics on duplicate names.
    pub fn from_schemas(schemas: impl IntoIterator<Item = Schema>) -> Self {
        let mut builder = SchemasBuilder::new();
        for schema in schemas {
            builder.must_add(schema);
        }
        builder.build()
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.by_collection.len()
    }

    /// Whether the registry holds no collections.
    pub fn is_empty(&self) -> bool {
        self.by_collection.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Schema> + '_ {
        self.by_collection.values().map(Arc::as_ref)
    }

    /// Visit each schema in insertion order until `visit` returns true.
    pub fn for_each(&self, mut visit: impl FnMut(&Schema) -> bool) {
        for schema in self.iter() {
            if visit(schema) {
                return;
            }
        }
    }

    /// Look up a schema by its collection name.
    pub fn find(&self, collection: &str) -> Option<&Schema> {
        self.by_collection.get(collection).map(Arc::as_ref)
    }

    /// Calls [`find`](Self::find) and panics if not found.
    pub fn must_find(&self, collection: &str) -> &Schema {
        match self.find(collection) {
            Some(schema) => schema,
            None => panic!(
                "Schemas::must_find: matching entry not found for collection: {collection:?}"
            ),
        }
    }

    /// First schema, in insertion order, whose kind matches ignoring case.
    pub fn find_by_kind(&self, kind: &str) -> Option<&Schema> {
        self.iter().find(|s| kind_matches(s.resource().kind(), kind))
    }

    /// Calls [`find_by_kind`](Self::find_by_kind) and panics if not found.
    pub fn must_find_by_kind(&self, kind: &str) -> &Schema {
        match self.find_by_kind(kind) {
            Some(schema) => schema,
            None => panic!("Schemas::must_find_by_kind: unable to find {kind}"),
        }
    }

    /// First schema, in insertion order, with exactly this group and a kind
    /// matching ignoring case.
    pub fn find_by_group_and_kind(&self, group: &str, kind: &str) -> Option<&Schema> {
        self.iter().find(|s| {
            s.resource().group() == group && kind_matches(s.resource().kind(), kind)
        })
    }

    /// Calls [`find_by_group_and_kind`](Self::find_by_group_and_kind) and
    /// panics if not found.
    pub fn must_find_by_group_and_kind(&self, group: &str, kind: &str) -> &Schema {
        match self.find_by_group_and_kind(group, kind) {
            Some(schema) => schema,
            None => panic!("Schemas::must_find_by_group_and_kind: unable to find {group}/{kind}"),
        }
    }

    /// All schemas in insertion order. The returned vector is a fresh copy.
    pub fn all(&self) -> Vec<Arc<Schema>> {
        self.by_collection.values().cloned().collect()
    }

    /// A copy of this registry with the given schemas appended.
    ///
    /// Panics if any name is already present.
    pub fn add(&self, to_add: impl IntoIterator<Item = Schema>) -> Schemas {
        let mut builder = SchemasBuilder::new();
        for schema in self.by_collection.values() {
            builder.must_add_shared(Arc::clone(schema));
        }
        for schema in to_add {
            builder.must_add(schema);
        }
        builder.build()
    }

    /// A copy of this registry without schemas sharing a name with any of
    /// `to_remove`.
    pub fn remove<'a>(&self, to_remove: impl IntoIterator<Item = &'a Schema>) -> Schemas {
        let removed: HashSet<&Name> = to_remove.into_iter().map(Schema::name).collect();

        let mut builder = SchemasBuilder::new();
        for schema in self.by_collection.values() {
            if !removed.contains(schema.name()) {
                builder.must_add_shared(Arc::clone(schema));
            }
        }
        builder.build()
    }

    /// All collection names, sorted.
    pub fn collection_names(&self) -> Names {
        let mut names: Names = self.by_collection.keys().cloned().collect();
        names.sort();
        names
    }

    /// Distinct resource kinds, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let kinds: BTreeSet<&str> = self.iter().map(|s| s.resource().kind()).collect();
        kinds.into_iter().map(String::from).collect()
    }

    /// Names of disabled collections, in insertion order.
    pub fn disabled_collection_names(&self) -> Names {
        self.iter()
            .filter(|s| s.is_disabled())
            .map(|s| s.name().clone())
            .collect()
    }

    /// Validate every resource, collecting all failures.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for schema in self.iter() {
            let result = schema.resource().validate();
            if let Err(e) = &result {
                debug!(collection = %schema.name(), errors = e.len(), "schema failed validation");
            }
            errors.append(result);
        }
        errors.into_result()
    }

    /// Collection names that fuzzily match `query` by name or kind, best first.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<Name> {
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &Name)> = self
            .iter()
            .filter_map(|s| {
                let by_name = matcher.fuzzy_match(s.name().as_str(), query);
                let by_kind = matcher.fuzzy_match(s.resource().kind(), query);
                by_name.max(by_kind).map(|score| (score, s.name()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.clone())
            .collect()
    }
}

/// Case-insensitive kind comparison using Unicode lowercase folding.
fn kind_matches(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl PartialEq for Schemas {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Schemas {}

impl<'a> IntoIterator for &'a Schemas {
    type Item = &'a Schema;
    type IntoIter = std::iter::Map<
        indexmap::map::Values<'a, Name, Arc<Schema>>,
        fn(&'a Arc<Schema>) -> &'a Schema,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.by_collection
            .values()
            .map(Arc::as_ref as fn(&'a Arc<Schema>) -> &'a Schema)
    }
}
