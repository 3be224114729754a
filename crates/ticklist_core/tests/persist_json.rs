use chrono::{NaiveDate, NaiveDateTime};
use ticklist_core::{JsonFileStore, PersistError, Persistence, Todo, UserProfile};

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn instant(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn sample_todo() -> Todo {
    Todo {
        id: 42,
        text: "water the plants".to_string(),
        completed: false,
        due_date: Some(date("2025-08-05")),
        reminder: Some(instant("2025-08-04T10:00:00")),
        photo: Some("data:image/png;base64,AAAA".to_string()),
        created_at: instant("2025-08-01T00:00:00"),
    }
}

#[test]
fn missing_documents_load_as_empty_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    assert_eq!(store.load_todos().unwrap(), Vec::new());
    assert_eq!(store.load_profile().unwrap(), UserProfile::default());
}

#[test]
fn todos_roundtrip_through_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    let todos = vec![sample_todo()];
    store.save_todos(&todos).unwrap();

    let loaded = store.load_todos().unwrap();
    assert_eq!(loaded, todos);
}

#[test]
fn todo_document_uses_camel_case_wire_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    store.save_todos(&[sample_todo()]).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("todos.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value[0];

    assert_eq!(entry["id"], 42);
    assert_eq!(entry["text"], "water the plants");
    assert_eq!(entry["completed"], false);
    assert_eq!(entry["dueDate"], "2025-08-05");
    assert!(entry["reminder"].as_str().unwrap().starts_with("2025-08-04T10:00"));
    assert!(entry["createdAt"].as_str().unwrap().starts_with("2025-08-01T00:00"));
    assert!(entry["photo"].as_str().unwrap().starts_with("data:image/png"));
}

#[test]
fn documents_written_by_earlier_versions_still_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("todos.json"),
        r#"[{
            "id": 1754000000000,
            "text": "Learn Node.js",
            "completed": false,
            "dueDate": null,
            "reminder": null,
            "photo": null,
            "createdAt": "2025-08-01T00:00:00"
        }]"#,
    )
    .unwrap();

    let store = JsonFileStore::new(dir.path());
    let loaded = store.load_todos().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 1_754_000_000_000);
    assert_eq!(loaded[0].due_date, None);
}

#[test]
fn profile_roundtrips_independently_of_todos() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    let profile = UserProfile {
        username: "sam".to_string(),
        avatar: Some("data:image/png;base64,BBBB".to_string()),
    };
    store.save_profile(&profile).unwrap();
    store.save_todos(&[sample_todo()]).unwrap();

    assert_eq!(store.load_profile().unwrap(), profile);
    assert!(dir.path().join("profile.json").exists());
    assert!(dir.path().join("todos.json").exists());
}

#[test]
fn malformed_document_is_a_codec_error_not_silent_data_loss() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("todos.json"), "{ not json").unwrap();

    let store = JsonFileStore::new(dir.path());
    let err = store.load_todos().unwrap_err();
    assert!(matches!(err, PersistError::Codec { .. }));
    assert!(err.to_string().contains("todos.json"));
}

#[test]
fn save_overwrites_the_whole_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();

    store.save_todos(&[sample_todo()]).unwrap();
    store.save_todos(&[]).unwrap();

    assert_eq!(store.load_todos().unwrap(), Vec::new());
}
