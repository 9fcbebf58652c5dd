//! Registry behaviour tests
//!
//! Covers construction, lookups, derived registries, listings, validation
//! and equality of `Schemas`.

use std::sync::Arc;
use std::thread;

use resource_schemas::{Name, ResourceSchema, Schema, SchemaError, Schemas, SchemasBuilder};

fn schema(name: &str, group: &str, kind: &str) -> Schema {
    let plural = format!("{}s", kind.to_lowercase());
    Schema::new(
        Name::new(name).unwrap(),
        ResourceSchema::new(group, "v1", kind, plural, format!("test.v1.{kind}")),
    )
}

fn abc() -> [Schema; 3] {
    [
        schema("A", "a.test.io", "Alpha"),
        schema("B", "b.test.io", "Beta"),
        schema("C", "c.test.io", "Gamma"),
    ]
}

fn visited(schemas: &Schemas) -> Vec<String> {
    let mut names = Vec::new();
    schemas.for_each(|s| {
        names.push(s.name().to_string());
        false
    });
    names
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_duplicate_keeps_first() {
    let first = schema("dup", "first.test.io", "First");
    let second = schema("dup", "second.test.io", "Second");

    let mut builder = SchemasBuilder::new();
    builder.add(first.clone()).unwrap();
    assert!(matches!(builder.add(second), Err(SchemaError::DuplicateName(_))));

    let schemas = builder.build();
    assert_eq!(schemas.all(), vec![Arc::new(first)]);
}

#[test]
fn test_all_preserves_insertion_order() {
    let input = [
        schema("z", "z.test.io", "Zed"),
        schema("m", "m.test.io", "Em"),
        schema("a", "a.test.io", "Ay"),
    ];
    let schemas = Schemas::from_schemas(input.clone());

    let all: Vec<Schema> = schemas.all().iter().map(|s| (**s).clone()).collect();
    assert_eq!(all, input.to_vec());
}

#[test]
fn test_all_returns_fresh_copy() {
    let schemas = Schemas::from_schemas(abc());

    let mut first = schemas.all();
    first.clear();
    first.push(Arc::new(schema("X", "x.test.io", "Ex")));

    assert_eq!(schemas.all().len(), 3);
    assert!(schemas.find("X").is_none());
}

#[test]
#[should_panic(expected = "collection already exists: A")]
fn test_from_schemas_panics_on_duplicate() {
    Schemas::from_schemas([schema("A", "a.test.io", "Alpha"), schema("A", "a.test.io", "Alpha")]);
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn test_find_by_name() {
    let schemas = Schemas::from_schemas(abc());

    assert_eq!(schemas.find("B").map(|s| s.resource().kind()), Some("Beta"));
    assert!(schemas.find("b").is_none());
    assert!(schemas.find("D").is_none());
    assert_eq!(schemas.must_find("C").resource().kind(), "Gamma");
}

#[test]
#[should_panic(expected = "matching entry not found for collection: \"D\"")]
fn test_must_find_panics() {
    Schemas::from_schemas(abc()).must_find("D");
}

#[test]
fn test_find_by_kind_ignores_case() {
    let schemas = Schemas::from_schemas(abc());

    assert_eq!(schemas.find_by_kind("beta").map(|s| s.name().as_str()), Some("B"));
    assert_eq!(schemas.find_by_kind("GAMMA").map(|s| s.name().as_str()), Some("C"));
    assert!(schemas.find_by_kind("Delta").is_none());
}

#[test]
fn test_find_by_kind_first_inserted_wins() {
    let schemas = Schemas::from_schemas([
        schema("second", "two.test.io", "Shared"),
        schema("first", "one.test.io", "shared"),
    ]);

    assert_eq!(schemas.must_find_by_kind("SHARED").name().as_str(), "second");
}

#[test]
fn test_find_by_kind_folds_unicode_case() {
    // Kinds are not validated on add, so non-ASCII kinds can be registered.
    let schemas = Schemas::from_schemas([
        schema("school", "edu.test.io", "École"),
        schema("street", "map.test.io", "Straße"),
    ]);

    assert_eq!(schemas.find_by_kind("éCOLE").map(|s| s.name().as_str()), Some("school"));
    assert_eq!(
        schemas.find_by_group_and_kind("edu.test.io", "ÉCOLE").map(|s| s.name().as_str()),
        Some("school")
    );
    assert_eq!(schemas.find_by_kind("STRAßE").map(|s| s.name().as_str()), Some("street"));
    assert!(schemas.find_by_group_and_kind("map.test.io", "école").is_none());
}

#[test]
#[should_panic(expected = "unable to find Delta")]
fn test_must_find_by_kind_panics() {
    Schemas::from_schemas(abc()).must_find_by_kind("Delta");
}

#[test]
fn test_find_by_group_and_kind() {
    let schemas = Schemas::from_schemas([
        schema("one", "one.test.io", "Shared"),
        schema("two", "two.test.io", "Shared"),
    ]);

    assert_eq!(
        schemas.find_by_group_and_kind("two.test.io", "shared").map(|s| s.name().as_str()),
        Some("two")
    );
    // Group comparison is exact.
    assert!(schemas.find_by_group_and_kind("TWO.test.io", "Shared").is_none());
    assert!(schemas.find_by_group_and_kind("three.test.io", "Shared").is_none());
}

#[test]
#[should_panic(expected = "unable to find nope.test.io/Alpha")]
fn test_must_find_by_group_and_kind_panics() {
    Schemas::from_schemas(abc()).must_find_by_group_and_kind("nope.test.io", "Alpha");
}

// =============================================================================
// Iteration and listings
// =============================================================================

#[test]
fn test_for_each_insertion_order_vs_sorted_names() {
    let ordered = Schemas::from_schemas(abc());
    assert_eq!(visited(&ordered), vec!["A", "B", "C"]);
    assert_eq!(ordered.collection_names().to_string(), "A, B, C");

    let [a, b, c] = abc();
    let shuffled = Schemas::from_schemas([c, a, b]);
    assert_eq!(visited(&shuffled), vec!["C", "A", "B"]);
    assert_eq!(shuffled.collection_names().to_string(), "A, B, C");
}

#[test]
fn test_for_each_stops_early() {
    let schemas = Schemas::from_schemas(abc());

    let mut seen = Vec::new();
    schemas.for_each(|s| {
        seen.push(s.name().to_string());
        s.name().as_str() == "B"
    });
    assert_eq!(seen, vec!["A", "B"]);

    // Each call starts over.
    assert_eq!(visited(&schemas), vec!["A", "B", "C"]);
}

#[test]
fn test_kinds_sorted_and_deduplicated() {
    let schemas = Schemas::from_schemas([
        schema("x", "x.test.io", "Zeta"),
        schema("y", "y.test.io", "Alpha"),
        schema("z", "z.test.io", "Zeta"),
    ]);

    assert_eq!(schemas.kinds(), vec!["Alpha", "Zeta"]);
}

#[test]
fn test_disabled_collection_names_in_insertion_order() {
    let schemas = Schemas::from_schemas([
        schema("z", "z.test.io", "Zed").with_disabled(true),
        schema("m", "m.test.io", "Em"),
        schema("a", "a.test.io", "Ay").with_disabled(true),
    ]);

    assert_eq!(schemas.disabled_collection_names().to_string(), "z, a");
}

// =============================================================================
// Derived registries
// =============================================================================

#[test]
fn test_add_leaves_receiver_unchanged() {
    let original = Schemas::from_schemas(abc());
    let extended = original.add([schema("D", "d.test.io", "Delta")]);

    assert_eq!(original.len(), 3);
    assert_eq!(extended.len(), 4);
    assert_eq!(visited(&extended), vec!["A", "B", "C", "D"]);
}

#[test]
#[should_panic(expected = "collection already exists: B")]
fn test_add_existing_name_panics() {
    Schemas::from_schemas(abc()).add([schema("B", "other.test.io", "Other")]);
}

#[test]
fn test_remove_matches_by_name_only() {
    let original = Schemas::from_schemas(abc());
    // Same name as "B", different resource.
    let lookalike = schema("B", "elsewhere.test.io", "Unrelated");

    let removed = original.remove([&lookalike]);
    assert_eq!(visited(&removed), vec!["A", "C"]);
    assert_eq!(original.len(), 3);
}

#[test]
fn test_remove_unknown_is_noop() {
    let original = Schemas::from_schemas(abc());
    let missing = schema("Q", "q.test.io", "Queue");
    assert_eq!(original.remove([&missing]), original);
}

#[test]
fn test_add_then_remove_round_trip() {
    let original = Schemas::from_schemas(abc());
    let extra = schema("D", "d.test.io", "Delta");

    let round_trip = original.add([extra.clone()]).remove([&extra]);
    assert_eq!(round_trip, original);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_validate_ok() {
    assert!(Schemas::from_schemas(abc()).validate().is_ok());
}

#[test]
fn test_validate_reports_every_failure() {
    let bad_kind = Schema::new(
        Name::new("bad/kind").unwrap(),
        ResourceSchema::new("", "v1", "Not A Kind", "things", "test.Thing"),
    );
    let bad_plural = Schema::new(
        Name::new("bad/plural").unwrap(),
        ResourceSchema::new("", "v1", "Thing", "no plural", "test.Thing"),
    );

    let [a, b, c] = abc();
    let schemas = Schemas::from_schemas([a, bad_kind, b, bad_plural, c]);

    let errors = schemas.validate().unwrap_err();
    assert_eq!(errors.len(), 2);

    let message = errors.to_string();
    assert!(message.contains("invalid kind: \"Not A Kind\""), "{message}");
    assert!(message.contains("invalid plural for kind Thing"), "{message}");
    assert!(message.find("invalid kind").unwrap() < message.find("invalid plural").unwrap());
}

// =============================================================================
// Equality
// =============================================================================

#[test]
fn test_equality_is_order_sensitive() {
    let [a, b, c] = abc();

    let forward = Schemas::from_schemas([a.clone(), b.clone(), c.clone()]);
    let backward = Schemas::from_schemas([c.clone(), b.clone(), a.clone()]);
    let rebuilt = Schemas::from_schemas([a, b, c]);

    assert_ne!(forward, backward);
    assert_eq!(forward, rebuilt);
}

#[test]
fn test_equality_compares_descriptors() {
    let original = Schemas::from_schemas(abc());
    let [a, b, _] = abc();
    let disabled_c = schema("C", "c.test.io", "Gamma").with_disabled(true);
    let changed = Schemas::from_schemas([a, b, disabled_c]);

    assert_ne!(original, changed);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_readers() {
    let schemas = Arc::new(Schemas::from_schemas(abc()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let schemas = Arc::clone(&schemas);
            thread::spawn(move || {
                (0..100).all(|_| {
                    schemas.find("A").is_some()
                        && schemas.find_by_kind("gamma").is_some()
                        && schemas.collection_names().len() == 3
                })
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
