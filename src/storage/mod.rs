//! MindMentor Storage
//!
//! Persistence for everything the study pages read and write:
//!
//! - **types**: Record types (StudySession, Note, PdfDocument, CuratedResource, StudyPlan, User)
//! - **store**: SQLite-backed `Store` with per-entity CRUD
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//! data_dir/
//!   mindmentor.db      users, sessions, notes, pdf metadata, resources, plans
//!   pdfs/{id}.pdf      uploaded document bytes
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use mindmentor::storage::{Store, StudySession};
//! use chrono::{Duration, Utc};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::open(std::path::Path::new("./data"))?;
//!
//!     let end = Utc::now();
//!     let session = StudySession::new(end - Duration::minutes(25), end, "pomodoro");
//!     store.insert_session("default", &session)?;
//!
//!     let sessions = store.sessions_for_user("default")?;
//!     println!("{} sessions recorded", sessions.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use store::{topic_key, Store, StoreStats};
pub use types::{
    new_record_id, CuratedResource, Note, NoteBlock, PdfDocument, PlanWeek, ResourceKind,
    ResourceLink, StudyPlan, StudySession, User,
};
