//! WebSocket Message Types
//!
//! Messages exchanged between dashboard pages and the MindMentor server.

use crate::storage::StudySession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics (e.g. "sessions.*", "plans")
    Subscribe { topics: Vec<String> },
    Unsubscribe { topics: Vec<String> },
    /// Keepalive
    Ping,
}

/// What happened to a curated set or plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Deleted,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A study session was recorded; dashboards should re-fetch stats
    StudySessionCompleted {
        user_id: String,
        duration: u64,
        mode: String,
        end_time: DateTime<Utc>,
    },
    /// A curated resource set was created or deleted
    ResourcesChanged {
        user_id: String,
        change: ChangeKind,
        id: String,
    },
    /// A study plan was created or deactivated
    PlansChanged {
        user_id: String,
        change: ChangeKind,
        id: String,
    },
    /// Server notice
    System { message: String },
    Subscribed { topics: Vec<String> },
    Unsubscribed { topics: Vec<String> },
    Pong,
    Error { message: String },
    Connected { connection_id: String },
}

/// Internal event for broadcasting through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to (e.g. "sessions.alice")
    pub topic: String,
    pub message: ServerMessage,
}

impl WsEvent {
    pub fn session_completed(user_id: &str, session: &StudySession) -> Self {
        Self {
            topic: format!("sessions.{}", user_id),
            message: ServerMessage::StudySessionCompleted {
                user_id: user_id.to_string(),
                duration: session.duration,
                mode: session.mode.clone(),
                end_time: session.end_time,
            },
        }
    }

    pub fn resources_changed(user_id: &str, change: ChangeKind, id: &str) -> Self {
        Self {
            topic: "resources".to_string(),
            message: ServerMessage::ResourcesChanged {
                user_id: user_id.to_string(),
                change,
                id: id.to_string(),
            },
        }
    }

    pub fn plans_changed(user_id: &str, change: ChangeKind, id: &str) -> Self {
        Self {
            topic: "plans".to_string(),
            message: ServerMessage::PlansChanged {
                user_id: user_id.to_string(),
                change,
                id: id.to_string(),
            },
        }
    }

    pub fn system(message: &str) -> Self {
        Self {
            topic: "system".to_string(),
            message: ServerMessage::System {
                message: message.to_string(),
            },
        }
    }
}
