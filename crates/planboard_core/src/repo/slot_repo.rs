//! Slot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the three named storage slots as serialized JSON payloads.
//! - Apply fail-closed decoding so corrupt payloads degrade to defaults.
//!
//! # Invariants
//! - Each slot holds exactly one payload; writes replace it wholesale.
//! - A missing or undecodable collection slot reads as the empty collection,
//!   a missing or undecodable session slot reads as no session.
//! - Decoded project collections are normalized before they reach callers.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::project::{normalize_projects, Project};
use crate::model::user::User;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Named storage slot addressed by a stable text key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The full projects collection.
    Projects,
    /// The full registered-users collection.
    Users,
    /// The current session, `null` when signed out.
    Session,
}

impl Slot {
    /// Stable key under which this slot is stored.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Projects => "projects-collection",
            Self::Users => "users-collection",
            Self::Session => "current-session",
        }
    }
}

/// Errors from slot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// A value could not be serialized for persistence.
    Encode(serde_json::Error),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode slot payload: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "slot repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "slot repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "slot repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Repository interface for the three application slots.
pub trait SlotRepository {
    /// Loads the projects collection, normalized, defaulting to empty.
    fn load_projects(&self) -> RepoResult<Vec<Project>>;
    /// Replaces the persisted projects collection.
    fn save_projects(&self, projects: &[Project]) -> RepoResult<()>;
    /// Loads the registered users, defaulting to empty.
    fn load_users(&self) -> RepoResult<Vec<User>>;
    /// Replaces the persisted users collection.
    fn save_users(&self, users: &[User]) -> RepoResult<()>;
    /// Loads the current session, defaulting to signed out.
    fn load_session(&self) -> RepoResult<Option<User>>;
    /// Replaces the persisted session; `None` persists a signed-out marker.
    fn save_session(&self, session: Option<&User>) -> RepoResult<()>;
}

/// SQLite-backed slot repository.
#[derive(Clone, Copy)]
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_slot_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn read_payload(&self, slot: Slot) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE key = ?1;",
                [slot.storage_key()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_payload(&self, slot: Slot, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, payload, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![slot.storage_key(), payload],
        )?;
        Ok(())
    }

    fn load_or_default<T>(&self, slot: Slot) -> RepoResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(payload) = self.read_payload(slot)? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&payload) {
            Ok(value) => Ok(value),
            Err(err) => {
                log::warn!(
                    "event=slot_load module=repo status=fallback slot={} reason=decode_failed error={}",
                    slot.storage_key(),
                    err
                );
                Ok(T::default())
            }
        }
    }

    fn save_value<T: Serialize>(&self, slot: Slot, value: &T) -> RepoResult<()> {
        let payload = serde_json::to_string(value)?;
        self.write_payload(slot, &payload)
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn load_projects(&self) -> RepoResult<Vec<Project>> {
        let raw: Vec<Project> = self.load_or_default(Slot::Projects)?;
        let (projects, stats) = normalize_projects(raw);
        if stats.changed() {
            log::warn!(
                "event=slot_load module=repo status=normalized slot={} deadlines_reset={} duplicates_collapsed={}",
                Slot::Projects.storage_key(),
                stats.deadlines_reset,
                stats.duplicates_collapsed
            );
        }
        Ok(projects)
    }

    fn save_projects(&self, projects: &[Project]) -> RepoResult<()> {
        self.save_value(Slot::Projects, &projects)
    }

    fn load_users(&self) -> RepoResult<Vec<User>> {
        self.load_or_default(Slot::Users)
    }

    fn save_users(&self, users: &[User]) -> RepoResult<()> {
        self.save_value(Slot::Users, &users)
    }

    fn load_session(&self) -> RepoResult<Option<User>> {
        self.load_or_default(Slot::Session)
    }

    fn save_session(&self, session: Option<&User>) -> RepoResult<()> {
        self.save_value(Slot::Session, &session)
    }
}

fn ensure_slot_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "slots")? {
        return Err(RepoError::MissingRequiredTable("slots"));
    }

    for column in ["key", "payload", "updated_at"] {
        if !table_has_column(conn, "slots", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "slots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
