use planboard_core::db::migrations::latest_version;
use planboard_core::db::{open_db, open_db_in_memory};
use planboard_core::{
    Project, ProjectStatus, RepoError, SlotRepository, SqliteSlotRepository, User,
};
use rusqlite::Connection;

#[test]
fn missing_slots_load_as_documented_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert!(repo.load_projects().unwrap().is_empty());
    assert!(repo.load_users().unwrap().is_empty());
    assert!(repo.load_session().unwrap().is_none());
}

#[test]
fn projects_roundtrip_preserves_order_and_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    let mut alpha = Project::draft(1);
    alpha.title = "Alpha".to_string();
    alpha.agent = "rivera".to_string();
    alpha.status = ProjectStatus::InProgress;
    alpha.deadline = "2026-09-30".to_string();
    let mut beta = Project::draft(2);
    beta.title = "Beta".to_string();

    repo.save_projects(&[alpha.clone(), beta.clone()]).unwrap();
    let loaded = repo.load_projects().unwrap();

    assert_eq!(loaded, vec![alpha, beta]);
}

#[test]
fn undecodable_projects_payload_falls_back_to_empty() {
    let conn = open_db_in_memory().unwrap();
    seed_slot(&conn, "projects-collection", "{{{ not json");
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert!(repo.load_projects().unwrap().is_empty());
}

#[test]
fn wrong_shape_projects_payload_falls_back_to_empty() {
    let conn = open_db_in_memory().unwrap();
    seed_slot(&conn, "projects-collection", r#"{"id": 1}"#);
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert!(repo.load_projects().unwrap().is_empty());
}

#[test]
fn unknown_status_value_falls_back_to_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    seed_slot(
        &conn,
        "projects-collection",
        r#"[{"id": 1, "title": "x", "status": "paused"}]"#,
    );
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert!(repo.load_projects().unwrap().is_empty());
}

#[test]
fn record_missing_id_falls_back_to_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    seed_slot(
        &conn,
        "projects-collection",
        r#"[{"title": "no identity"}]"#,
    );
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert!(repo.load_projects().unwrap().is_empty());
}

#[test]
fn record_level_fields_decode_leniently() {
    let conn = open_db_in_memory().unwrap();
    seed_slot(&conn, "projects-collection", r#"[{"id": 7}]"#);
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    let loaded = repo.load_projects().unwrap();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 7);
    assert!(loaded[0].title.is_empty());
    assert!(loaded[0].agent.is_empty());
    assert!(loaded[0].tasks.is_empty());
    assert_eq!(loaded[0].status, ProjectStatus::Upcoming);
    assert!(loaded[0].deadline.is_empty());
}

#[test]
fn partially_shaped_task_rows_decode_to_field_defaults() {
    let conn = open_db_in_memory().unwrap();
    seed_slot(
        &conn,
        "projects-collection",
        r#"[{"id": 7, "tasks": [{"label": "draft plan"}, {"done": true}, {}]}]"#,
    );
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    let loaded = repo.load_projects().unwrap();

    assert_eq!(loaded.len(), 1);
    let tasks = &loaded[0].tasks;
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].label, "draft plan");
    assert!(!tasks[0].done);
    assert!(tasks[1].label.is_empty());
    assert!(tasks[1].done);
    assert!(tasks[2].label.is_empty());
    assert!(!tasks[2].done);
}

#[test]
fn malformed_deadline_is_reset_on_load() {
    let conn = open_db_in_memory().unwrap();
    seed_slot(
        &conn,
        "projects-collection",
        r#"[{"id": 1, "title": "x", "deadline": "sometime in fall"}]"#,
    );
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    let loaded = repo.load_projects().unwrap();

    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].deadline.is_empty());
}

#[test]
fn duplicate_ids_collapse_to_last_value_at_first_position() {
    let conn = open_db_in_memory().unwrap();
    seed_slot(
        &conn,
        "projects-collection",
        r#"[
            {"id": 1, "title": "first"},
            {"id": 2, "title": "other"},
            {"id": 1, "title": "winner"}
        ]"#,
    );
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    let loaded = repo.load_projects().unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, 1);
    assert_eq!(loaded[0].title, "winner");
    assert_eq!(loaded[1].id, 2);
}

#[test]
fn corrupt_projects_slot_leaves_other_slots_readable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    repo.save_users(&[User::new("Ada", "ada@example.com", "pw")])
        .unwrap();
    seed_slot(&conn, "projects-collection", "garbage");

    assert!(repo.load_projects().unwrap().is_empty());
    let users = repo.load_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].identity(), "ada@example.com");
}

#[test]
fn session_roundtrip_and_signed_out_marker() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let ada = User::new("Ada", "ada@example.com", "pw");

    repo.save_session(Some(&ada)).unwrap();
    assert_eq!(repo.load_session().unwrap(), Some(ada));

    repo.save_session(None).unwrap();
    assert!(repo.load_session().unwrap().is_none());
    assert_eq!(slot_payload(&conn, "current-session").as_deref(), Some("null"));
}

#[test]
fn project_wire_shape_uses_snake_case_status() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    let mut project = Project::draft(42);
    project.title = "Wire".to_string();
    project.status = ProjectStatus::InProgress;
    repo.save_projects(&[project]).unwrap();

    let payload = slot_payload(&conn, "projects-collection").unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    assert_eq!(value[0]["id"], 42);
    assert_eq!(value[0]["title"], "Wire");
    assert_eq!(value[0]["status"], "in_progress");
    assert!(value[0]["tasks"].is_array());
    assert!(value[0]["deadline"].is_string());
}

#[test]
fn slots_survive_reopen_of_file_backed_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planboard.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSlotRepository::try_new(&conn).unwrap();
        let mut project = Project::draft(1);
        project.title = "durable".to_string();
        repo.save_projects(&[project]).unwrap();
        repo.save_session(Some(&User::new("Ada", "ada@example.com", "pw")))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    let projects = repo.load_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, "durable");
    assert!(repo.load_session().unwrap().is_some());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteSlotRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_slots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSlotRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("slots"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_slots_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE slots (
            key TEXT PRIMARY KEY NOT NULL,
            payload TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSlotRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "slots",
            column: "updated_at"
        })
    ));
}

fn seed_slot(conn: &Connection, key: &str, payload: &str) {
    conn.execute(
        "INSERT INTO slots (key, payload)
         VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET payload = excluded.payload;",
        [key, payload],
    )
    .unwrap();
}

fn slot_payload(conn: &Connection, key: &str) -> Option<String> {
    conn.query_row(
        "SELECT payload FROM slots WHERE key = ?1;",
        [key],
        |row| row.get(0),
    )
    .ok()
}
