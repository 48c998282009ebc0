use std::collections::HashSet;
use lumendex::{Config, Database, DocId, Document, ErrorKind, Error, FieldType, InsertConfig, ValueKind};
use serde_json::json;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn movies() -> Database {
    init_logging();
    Database::create_from_json(&json!({"title": "string", "year": "number"}), Config::default())
        .unwrap()
}

#[test]
fn generated_id_is_searchable_by_title() {
    let mut db = movies();
    let result = db
        .insert_json(json!({"title": "X", "year": 2020}), &InsertConfig::default())
        .unwrap();

    assert!(!result.id.as_str().is_empty());
    assert_eq!(db.lookup("title", "X").unwrap(), vec![result.id.clone()]);
    assert!(db.postings("title", "x").unwrap().contains(&result.id));
}

#[test]
fn string_year_is_a_type_mismatch() {
    let mut db = movies();
    let err = db
        .insert_json(json!({"title": "X", "year": "2020"}), &InsertConfig::default())
        .unwrap_err();

    match err {
        Error::TypeMismatch { field, expected, actual } => {
            assert_eq!(field, "year");
            assert_eq!(expected, FieldType::Number);
            assert_eq!(actual, ValueKind::String);
        }
        other => panic!("expected a type mismatch, got {other}"),
    }
    assert_eq!(db.count(), 0);
}

#[test]
fn reused_document_id_is_a_duplicate() {
    let mut db = movies();
    db.insert_json(json!({"id": "abc", "title": "A"}), &InsertConfig::default()).unwrap();
    let err = db
        .insert_json(json!({"id": "abc", "title": "B"}), &InsertConfig::default())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateId);
    assert!(db.lookup("title", "B").unwrap().is_empty());
    assert_eq!(db.get(&DocId::from("abc")).unwrap().get_text("title"), Some("A"));
}

#[test]
fn derived_id_from_title() {
    let mut db = movies();
    let config = InsertConfig::derive_id(|doc| doc.get_text("title").map(str::to_lowercase));
    let result = db.insert_json(json!({"title": "Hello"}), &config).unwrap();
    assert_eq!(result.id, DocId::from("hello"));

    let err = db.insert_json(json!({"title": "HELLO"}), &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateId);
}

#[test]
fn fixed_id_from_insert_config() {
    let mut db = movies();
    let result = db
        .insert_json(json!({"id": "ignored", "title": "T"}), &InsertConfig::with_id("chosen"))
        .unwrap();
    assert_eq!(result.id, DocId::from("chosen"));
    assert!(!db.contains(&DocId::from("ignored")));
}

#[test]
fn returned_ids_are_pairwise_distinct() {
    let mut db = movies();
    let mut seen = HashSet::new();
    for i in 0..500 {
        let doc = Document::new().with_field("title", format!("movie {i}"));
        let id = db.insert(doc, &InsertConfig::default()).unwrap().id;
        assert!(seen.insert(id));
    }
    assert_eq!(db.count(), 500);
}

#[test]
fn unknown_fields_are_stored_but_never_indexed() {
    let mut db = movies();
    let id = db
        .insert_json(
            json!({"title": "Visible", "notes": "secret", "tags": ["secret"], "year": 1}),
            &InsertConfig::default(),
        )
        .unwrap()
        .id;

    for field in db.index().indexed_fields() {
        assert!(db.postings(field, "secret").is_none(), "field {field} indexed 'secret'");
    }
    assert!(db.lookup("notes", "secret").unwrap().is_empty());

    let stored = db.get(&id).unwrap();
    assert_eq!(stored.get_text("notes"), Some("secret"));
    assert_eq!(stored.get_field("tags"), Some(&json!(["secret"])));
}

#[test]
fn accepted_documents_match_declared_types() {
    let mut db = Database::create_from_json(
        &json!({"title": "string", "year": "number", "draft": "boolean"}),
        Config::default(),
    )
    .unwrap();

    let candidates = vec![
        json!({"title": "ok", "year": 1, "draft": false}),
        json!({"title": 1}),
        json!({"draft": "no"}),
        json!({"year": null}),
        json!({"other": true}),
        json!({"year": 2.5, "draft": true}),
    ];

    for candidate in candidates {
        let Ok(result) = db.insert_json(candidate, &InsertConfig::default()) else {
            continue;
        };
        let stored = db.get(&result.id).unwrap();
        for (field, declared) in db.schema().fields() {
            if let Some(value) = stored.classify(field) {
                assert!(declared.accepts(value.kind()), "{field} stored as {}", value.kind());
            }
        }
    }
    assert_eq!(db.count(), 3);
}

#[test]
fn empty_schema_stores_without_indexing() {
    init_logging();
    let mut db = Database::create_from_json(&json!({}), Config::default()).unwrap();
    let id = db
        .insert_json(json!({"title": "anything", "n": 1}), &InsertConfig::default())
        .unwrap()
        .id;

    assert!(db.get(&id).is_some());
    assert_eq!(db.stats().indexed_fields, 0);
    assert_eq!(db.stats().total_postings, 0);
}

#[test]
fn invalid_schema_fails_create() {
    let err = Database::create_from_json(&json!({"when": "date"}), Config::default())
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Schema);
}
