//! # MindMentor
//!
//! Study tracking service and client library: focus sessions feed a
//! dashboard of streaks and study hours, alongside notes, PDF documents,
//! curated learning resources and generated study plans.
//!
//! ## Modules
//!
//! - [`storage`]: SQLite-backed store for every record type
//! - [`stats`]: Session aggregation, streaks, heatmap and dashboard figures
//! - [`curation`]: Resource curation and study-plan generation behind async traits
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Real-time study events
//! - [`client`]: Typed API client, toasts, list state and the event bus
//! - [`paging`], [`nav`], [`design`]: Page-level state and design tokens
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mindmentor::stats::{compute_stats, Dashboard};
//! use mindmentor::storage::{Store, StudySession};
//! use chrono::{Duration, Utc};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::open(std::path::Path::new("mindmentor_data"))?;
//!
//!     // Record a 25 minute pomodoro
//!     let end = Utc::now();
//!     store.insert_session("default", &StudySession::new(end - Duration::minutes(25), end, "pomodoro"))?;
//!
//!     // Aggregate and render the dashboard figures
//!     let sessions = store.sessions_for_user("default")?;
//!     let dashboard = Dashboard::from_response(compute_stats(&sessions, end.date_naive()));
//!
//!     println!(
//!         "{:.1} hours, streak {}",
//!         dashboard.summary.total_study_hours, dashboard.stats.current_streak
//!     );
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod curation;
pub mod design;
pub mod nav;
pub mod paging;
pub mod pdf;
pub mod stats;
pub mod storage;
pub mod websocket;

// Re-export top-level types for convenience
pub use storage::{
    CuratedResource, Note, NoteBlock, PdfDocument, PlanWeek, ResourceKind, ResourceLink,
    StorageError, StorageResult, Store, StudyPlan, StudySession, User,
};

pub use stats::{compute_stats, Dashboard, DashboardSummary, StatsResponse, StudyStats};

pub use api::{build_router, serve, ApiError, AppState};

pub use client::{ApiClient, ClientError, EventBus, StudyEvent, Toast};

pub use curation::{Curator, LinkCurator, PlanGenerator, RateLimiter, WeeklyPlanner};

pub use websocket::{
    websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage, WsEvent,
};

pub use config::{Config, ConfigError, LoggingConfig};
