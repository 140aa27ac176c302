//! Study Store - SQLite-backed persistence for every MindMentor entity
//!
//! One database file (`mindmentor.db`) under the data directory holds users,
//! study sessions, notes, PDF metadata, curated resources and study plans.
//! Uploaded PDF bytes live next to it in `pdfs/{id}.pdf`.
//!
//! Structured fields (note blocks, resource links, plan weeks) are stored as
//! JSON text columns. Timestamps are RFC 3339 strings with millisecond
//! precision so that lexical order matches chronological order.
//!
//! The connection is guarded by a mutex; every method takes `&self` and holds
//! the lock only for the duration of its statements.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{
    CuratedResource, Note, NoteBlock, PdfDocument, PlanWeek, ResourceLink, StudyPlan,
    StudySession, User,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS study_sessions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        duration INTEGER NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        mode TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_sessions_user_start
        ON study_sessions(user_id, start_time);

    CREATE TABLE IF NOT EXISTS notes (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        parent_id TEXT,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_notes_user ON notes(user_id);

    CREATE TABLE IF NOT EXISTS pdf_documents (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        title TEXT NOT NULL,
        page_count INTEGER NOT NULL,
        size_bytes INTEGER NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_pdf_user ON pdf_documents(user_id);

    CREATE TABLE IF NOT EXISTS curated_resources (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        topic TEXT NOT NULL,
        topic_key TEXT NOT NULL,
        resources TEXT NOT NULL,
        created_at TEXT NOT NULL,
        UNIQUE (user_id, topic_key)
    );

    CREATE TABLE IF NOT EXISTS study_plans (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        subject TEXT NOT NULL,
        goal TEXT,
        hours_per_week INTEGER NOT NULL,
        weeks TEXT NOT NULL,
        active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_plans_user ON study_plans(user_id, active);
";

/// Row counts, reported by the health endpoint
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    pub users: u64,
    pub sessions: u64,
    pub notes: u64,
    pub documents: u64,
    pub resources: u64,
    pub plans: u64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} users, {} sessions, {} notes, {} documents, {} resource sets, {} plans",
            self.users, self.sessions, self.notes, self.documents, self.resources, self.plans
        )
    }
}

/// SQLite-backed store for all study data
pub struct Store {
    conn: Mutex<Connection>,
    data_dir: PathBuf,
}

impl Store {
    /// Create or open the store in `data_dir`
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        std::fs::create_dir_all(data_dir.join("pdfs"))?;

        let path = data_dir.join("mindmentor.db");
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            ",
        )?;
        conn.execute_batch(SCHEMA)?;

        tracing::debug!(path = ?path, "Opened study store");

        Ok(Self {
            conn: Mutex::new(conn),
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Root data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path where a PDF's bytes are stored
    pub fn pdf_path(&self, id: &str) -> PathBuf {
        self.data_dir.join("pdfs").join(format!("{}.pdf", id))
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }

    // ============================================
    // USERS
    // ============================================

    /// Fetch a user by id
    pub fn get_user(&self, id: &str) -> StorageResult<Option<User>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, name, email, created_at FROM users WHERE id = ?",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, name, email, created_at)| {
            Ok(User {
                id,
                name,
                email,
                created_at: parse_ts(&created_at)?,
            })
        })
        .transpose()
    }

    /// Insert or update a user's name and email
    pub fn upsert_user(&self, user: &User) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (id, name, email, created_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, email = excluded.email",
            params![user.id, user.name, user.email, ts(&user.created_at)],
        )?;
        Ok(())
    }

    // ============================================
    // STUDY SESSIONS
    // ============================================

    /// Record a completed study session
    pub fn insert_session(&self, user_id: &str, session: &StudySession) -> StorageResult<()> {
        let duration = i64::try_from(session.duration).map_err(|_| {
            StorageError::OutOfRange(format!("session duration {}", session.duration))
        })?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO study_sessions (user_id, duration, start_time, end_time, mode)
             VALUES (?, ?, ?, ?, ?)",
            params![
                user_id,
                duration,
                ts(&session.start_time),
                ts(&session.end_time),
                session.mode
            ],
        )?;
        Ok(())
    }

    /// All sessions for a user, oldest first
    pub fn sessions_for_user(&self, user_id: &str) -> StorageResult<Vec<StudySession>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT duration, start_time, end_time, mode FROM study_sessions
             WHERE user_id = ?
             ORDER BY start_time, id",
        )?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(duration, start, end, mode)| {
                Ok(StudySession {
                    duration: u64::try_from(duration).map_err(|_| {
                        StorageError::Corruption(format!("negative session duration {}", duration))
                    })?,
                    start_time: parse_ts(&start)?,
                    end_time: parse_ts(&end)?,
                    mode,
                })
            })
            .collect()
    }

    // ============================================
    // NOTES
    // ============================================

    /// Notes for a user, most recently updated first
    pub fn list_notes(&self, user_id: &str) -> StorageResult<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, title, content, parent_id, updated_at FROM notes
             WHERE user_id = ?
             ORDER BY updated_at DESC, id DESC",
        )?;

        let rows = stmt
            .query_map(params![user_id], note_columns)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(note_from_columns).collect()
    }

    /// Fetch one note owned by a user
    pub fn get_note(&self, user_id: &str, id: &str) -> StorageResult<Option<Note>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, title, content, parent_id, updated_at FROM notes
                 WHERE user_id = ? AND id = ?",
                params![user_id, id],
                note_columns,
            )
            .optional()?;

        row.map(note_from_columns).transpose()
    }

    pub fn insert_note(&self, user_id: &str, note: &Note) -> StorageResult<()> {
        let content = serde_json::to_string(&note.content)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO notes (id, user_id, title, content, parent_id, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                note.id,
                user_id,
                note.title,
                content,
                note.parent_id,
                ts(&note.updated_at)
            ],
        )?;
        Ok(())
    }

    /// Overwrite title, content and timestamp. Returns false if no such note.
    pub fn update_note(&self, user_id: &str, note: &Note) -> StorageResult<bool> {
        let content = serde_json::to_string(&note.content)?;
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE notes SET title = ?, content = ?, parent_id = ?, updated_at = ?
             WHERE user_id = ? AND id = ?",
            params![
                note.title,
                content,
                note.parent_id,
                ts(&note.updated_at),
                user_id,
                note.id
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_note(&self, user_id: &str, id: &str) -> StorageResult<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM notes WHERE user_id = ? AND id = ?",
            params![user_id, id],
        )?;
        Ok(changed > 0)
    }

    // ============================================
    // PDF DOCUMENTS
    // ============================================

    /// Documents for a user, oldest first (uploads append to the list)
    pub fn list_pdfs(&self, user_id: &str) -> StorageResult<Vec<PdfDocument>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, title, page_count, size_bytes, created_at FROM pdf_documents
             WHERE user_id = ?
             ORDER BY created_at, id",
        )?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, title, page_count, size_bytes, created_at)| {
                Ok(PdfDocument {
                    id,
                    title,
                    page_count: page_count.max(0) as u32,
                    size_bytes: size_bytes.max(0) as u64,
                    created_at: parse_ts(&created_at)?,
                })
            })
            .collect()
    }

    /// Write the PDF bytes to disk, then record its metadata
    pub fn save_pdf(&self, user_id: &str, doc: &PdfDocument, bytes: &[u8]) -> StorageResult<()> {
        let path = self.pdf_path(&doc.id);
        std::fs::write(&path, bytes)?;

        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO pdf_documents (id, user_id, title, page_count, size_bytes, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                doc.id,
                user_id,
                doc.title,
                doc.page_count,
                doc.size_bytes as i64,
                ts(&doc.created_at)
            ],
        );

        if let Err(e) = inserted {
            // Don't leave an orphaned file behind
            let _ = std::fs::remove_file(&path);
            return Err(e.into());
        }

        Ok(())
    }

    /// Remove a document's metadata and file. Returns false if no such document.
    pub fn delete_pdf(&self, user_id: &str, id: &str) -> StorageResult<bool> {
        let changed = {
            let conn = self.conn()?;
            conn.execute(
                "DELETE FROM pdf_documents WHERE user_id = ? AND id = ?",
                params![user_id, id],
            )?
        };

        if changed == 0 {
            return Ok(false);
        }

        match std::fs::remove_file(self.pdf_path(id)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(document_id = %id, "PDF file already missing on delete");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(true)
    }

    // ============================================
    // CURATED RESOURCES
    // ============================================

    /// Curated sets for a user, newest first
    pub fn list_resources(&self, user_id: &str) -> StorageResult<Vec<CuratedResource>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, topic, resources, created_at FROM curated_resources
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt
            .query_map(params![user_id], resource_columns)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(resource_from_columns).collect()
    }

    /// Find the set for a topic (case- and whitespace-insensitive)
    pub fn find_resource_by_topic(
        &self,
        user_id: &str,
        topic: &str,
    ) -> StorageResult<Option<CuratedResource>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, topic, resources, created_at FROM curated_resources
                 WHERE user_id = ? AND topic_key = ?",
                params![user_id, topic_key(topic)],
                resource_columns,
            )
            .optional()?;

        row.map(resource_from_columns).transpose()
    }

    pub fn insert_resource(&self, user_id: &str, resource: &CuratedResource) -> StorageResult<()> {
        let links = serde_json::to_string(&resource.resources)?;
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO curated_resources (id, user_id, topic, topic_key, resources, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                resource.id,
                user_id,
                resource.topic,
                topic_key(&resource.topic),
                links,
                ts(&resource.created_at)
            ],
        );

        match inserted {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::Duplicate(format!(
                    "resources for topic '{}'",
                    resource.topic
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn delete_resource(&self, user_id: &str, id: &str) -> StorageResult<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM curated_resources WHERE user_id = ? AND id = ?",
            params![user_id, id],
        )?;
        Ok(changed > 0)
    }

    // ============================================
    // STUDY PLANS
    // ============================================

    /// Active plans for a user, ordered by id descending
    pub fn list_active_plans(&self, user_id: &str) -> StorageResult<Vec<StudyPlan>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, subject, goal, hours_per_week, weeks, active, created_at FROM study_plans
             WHERE user_id = ? AND active = 1
             ORDER BY id DESC",
        )?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, bool>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, subject, goal, hours_per_week, weeks, active, created_at)| {
                let weeks: Vec<PlanWeek> = serde_json::from_str(&weeks)?;
                Ok(StudyPlan {
                    id,
                    subject,
                    goal,
                    hours_per_week: hours_per_week.max(0) as u32,
                    weeks,
                    active,
                    created_at: parse_ts(&created_at)?,
                })
            })
            .collect()
    }

    pub fn insert_plan(&self, user_id: &str, plan: &StudyPlan) -> StorageResult<()> {
        let weeks = serde_json::to_string(&plan.weeks)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO study_plans (id, user_id, subject, goal, hours_per_week, weeks, active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                plan.id,
                user_id,
                plan.subject,
                plan.goal,
                plan.hours_per_week,
                weeks,
                plan.active,
                ts(&plan.created_at)
            ],
        )?;
        Ok(())
    }

    /// Soft delete. Returns false if the plan doesn't exist or is already inactive.
    pub fn deactivate_plan(&self, user_id: &str, id: &str) -> StorageResult<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE study_plans SET active = 0 WHERE user_id = ? AND id = ? AND active = 1",
            params![user_id, id],
        )?;
        Ok(changed > 0)
    }

    // ============================================
    // STATS
    // ============================================

    /// Row counts across all tables
    pub fn stats(&self) -> StorageResult<StoreStats> {
        let conn = self.conn()?;
        let count = |table: &str| -> StorageResult<u64> {
            let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
            Ok(n.max(0) as u64)
        };

        Ok(StoreStats {
            users: count("users")?,
            sessions: count("study_sessions")?,
            notes: count("notes")?,
            documents: count("pdf_documents")?,
            resources: count("curated_resources")?,
            plans: count("study_plans")?,
        })
    }
}

type NoteColumns = (String, String, String, Option<String>, String);

fn note_columns(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteColumns> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn note_from_columns((id, title, content, parent_id, updated_at): NoteColumns) -> StorageResult<Note> {
    let content: Vec<NoteBlock> = serde_json::from_str(&content)?;
    Ok(Note {
        id,
        title,
        content,
        parent_id,
        updated_at: parse_ts(&updated_at)?,
    })
}

type ResourceColumns = (String, String, String, String);

fn resource_columns(row: &rusqlite::Row<'_>) -> rusqlite::Result<ResourceColumns> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn resource_from_columns(
    (id, topic, resources, created_at): ResourceColumns,
) -> StorageResult<CuratedResource> {
    let resources: Vec<ResourceLink> = serde_json::from_str(&resources)?;
    Ok(CuratedResource {
        id,
        topic,
        resources,
        created_at: parse_ts(&created_at)?,
    })
}

/// Normalized topic used for duplicate detection
pub fn topic_key(topic: &str) -> String {
    topic
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn ts(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_ts(s: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Corruption(format!("invalid timestamp '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::{new_record_id, ResourceKind};
    use chrono::{Duration, TimeZone};
    use tempfile::tempdir;

    fn open_store() -> (Store, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        (store, dir)
    }

    fn plan(subject: &str) -> StudyPlan {
        StudyPlan {
            id: new_record_id(),
            subject: subject.to_string(),
            goal: Some("pass the exam".to_string()),
            hours_per_week: 5,
            weeks: vec![PlanWeek {
                week: 1,
                focus: "Fundamentals".to_string(),
                tasks: vec!["Read chapter 1".to_string()],
                hours: 5,
            }],
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sessions_round_trip_in_start_order() {
        let (store, _dir) = open_store();
        let day = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

        let later = StudySession::new(day + Duration::hours(5), day + Duration::hours(6), "focus");
        let earlier = StudySession::new(day, day + Duration::minutes(25), "pomodoro");

        store.insert_session("alice", &later).unwrap();
        store.insert_session("alice", &earlier).unwrap();
        store.insert_session("bob", &earlier).unwrap();

        let sessions = store.sessions_for_user("alice").unwrap();
        assert_eq!(sessions, vec![earlier, later]);
        assert!(store.sessions_for_user("carol").unwrap().is_empty());
    }

    #[test]
    fn test_session_duration_out_of_range_is_rejected() {
        let (store, _dir) = open_store();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut session = StudySession::new(start, start + Duration::minutes(25), "pomodoro");
        session.duration = u64::MAX;

        assert!(matches!(
            store.insert_session("alice", &session),
            Err(StorageError::OutOfRange(_))
        ));
        assert!(store.sessions_for_user("alice").unwrap().is_empty());
    }

    #[test]
    fn test_note_crud() {
        let (store, _dir) = open_store();
        let mut note = Note::new("Lecture 1", vec![NoteBlock::text("ownership")], None);
        store.insert_note("alice", &note).unwrap();

        // Other users can't see or delete it
        assert!(store.get_note("bob", &note.id).unwrap().is_none());
        assert!(!store.delete_note("bob", &note.id).unwrap());

        note.title = "Lecture 1 (revised)".to_string();
        note.updated_at = Utc::now();
        assert!(store.update_note("alice", &note).unwrap());

        let fetched = store.get_note("alice", &note.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Lecture 1 (revised)");
        assert_eq!(fetched.text(), "ownership");

        assert!(store.delete_note("alice", &note.id).unwrap());
        assert!(store.list_notes("alice").unwrap().is_empty());
    }

    #[test]
    fn test_notes_listed_most_recent_first() {
        let (store, _dir) = open_store();
        let mut old = Note::new("old", vec![], None);
        old.updated_at = Utc::now() - Duration::days(1);
        let new = Note::new("new", vec![], Some(old.id.clone()));

        store.insert_note("alice", &old).unwrap();
        store.insert_note("alice", &new).unwrap();

        let titles: Vec<_> = store
            .list_notes("alice")
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["new", "old"]);
    }

    #[test]
    fn test_pdf_save_and_delete_removes_file() {
        let (store, _dir) = open_store();
        let doc = PdfDocument {
            id: new_record_id(),
            title: "syllabus.pdf".to_string(),
            page_count: 2,
            size_bytes: 9,
            created_at: Utc::now(),
        };

        store.save_pdf("alice", &doc, b"%PDF-1.4\n").unwrap();
        assert!(store.pdf_path(&doc.id).exists());
        assert_eq!(store.list_pdfs("alice").unwrap(), vec![doc.clone()]);

        assert!(store.delete_pdf("alice", &doc.id).unwrap());
        assert!(!store.pdf_path(&doc.id).exists());
        assert!(!store.delete_pdf("alice", &doc.id).unwrap());
    }

    #[test]
    fn test_resource_topic_is_unique_per_user() {
        let (store, _dir) = open_store();
        let resource = CuratedResource {
            id: new_record_id(),
            topic: "Linear Algebra".to_string(),
            resources: vec![ResourceLink {
                title: "Docs".to_string(),
                url: "https://example.com".to_string(),
                kind: ResourceKind::Documentation,
                description: String::new(),
            }],
            created_at: Utc::now(),
        };
        store.insert_resource("alice", &resource).unwrap();

        let found = store
            .find_resource_by_topic("alice", "  linear   ALGEBRA ")
            .unwrap();
        assert_eq!(found.map(|r| r.id), Some(resource.id.clone()));
        assert!(store.find_resource_by_topic("bob", "linear algebra").unwrap().is_none());

        // Second insert for the same topic violates the unique key
        let duplicate = CuratedResource {
            id: new_record_id(),
            ..resource.clone()
        };
        assert!(matches!(
            store.insert_resource("alice", &duplicate),
            Err(StorageError::Duplicate(_))
        ));

        assert!(store.delete_resource("alice", &resource.id).unwrap());
        assert!(store.list_resources("alice").unwrap().is_empty());
    }

    #[test]
    fn test_plan_deactivation_hides_plan() {
        let (store, _dir) = open_store();
        let first = plan("Rust");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = plan("Go");

        store.insert_plan("alice", &first).unwrap();
        store.insert_plan("alice", &second).unwrap();

        let ids: Vec<_> = store
            .list_active_plans("alice")
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);

        assert!(store.deactivate_plan("alice", &second.id).unwrap());
        assert!(!store.deactivate_plan("alice", &second.id).unwrap());

        let remaining = store.list_active_plans("alice").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].subject, "Rust");
    }

    #[test]
    fn test_user_upsert_and_stats() {
        let (store, _dir) = open_store();
        let mut user = User {
            id: "alice".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            created_at: Utc::now(),
        };
        store.upsert_user(&user).unwrap();

        user.name = "Alice Liddell".to_string();
        store.upsert_user(&user).unwrap();

        let fetched = store.get_user("alice").unwrap().unwrap();
        assert_eq!(fetched.name, "Alice Liddell");

        let stats = store.stats().unwrap();
        assert_eq!(stats.users, 1);
        assert_eq!(stats.plans, 0);
    }

    #[test]
    fn test_store_reopens_existing_data() {
        let dir = tempdir().unwrap();
        {
            let store = Store::open(dir.path()).unwrap();
            store.insert_plan("alice", &plan("Chemistry")).unwrap();
        }

        let store = Store::open(dir.path()).unwrap();
        assert_eq!(store.list_active_plans("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_topic_key_normalizes() {
        assert_eq!(topic_key("  Machine   Learning "), "machine learning");
    }
}
