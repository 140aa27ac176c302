//! WebSocket Connection Hub
//!
//! Tracks live dashboard connections and their topic subscriptions, and fans
//! study events out to them. Every published event also goes onto a tokio
//! broadcast channel so in-process listeners can react without a socket.
//! Delivery is fire-and-forget: lagging or closed receivers just miss events.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, RwLock};
use uuid::Uuid;

use super::messages::{ServerMessage, WsEvent};

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Configuration for the connection hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
    /// Capacity of the in-process broadcast channel
    pub broadcast_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
            broadcast_capacity: 1024,
        }
    }
}

/// Handle for sending messages to a specific connection
struct ConnectionHandle {
    sender: mpsc::UnboundedSender<ServerMessage>,
    subscriptions: HashSet<String>,
}

#[derive(Default)]
struct Registry {
    connections: HashMap<ConnectionId, ConnectionHandle>,
    /// Topic → subscribed connection ids
    subscriptions: HashMap<String, HashSet<ConnectionId>>,
}

impl Registry {
    /// Connections subscribed to the event's topic directly or through `prefix.*`
    fn recipients(&self, topic: &str) -> HashSet<&ConnectionId> {
        let mut ids: HashSet<&ConnectionId> = HashSet::new();

        if let Some(direct) = self.subscriptions.get(topic) {
            ids.extend(direct);
        }
        if let Some((prefix, _)) = topic.split_once('.') {
            if let Some(wild) = self.subscriptions.get(&format!("{}.*", prefix)) {
                ids.extend(wild);
            }
        }

        ids
    }

    fn deliver(&self, event: &WsEvent) -> usize {
        let mut sent = 0;
        for id in self.recipients(&event.topic) {
            if let Some(handle) = self.connections.get(id) {
                if handle.sender.send(event.message.clone()).is_ok() {
                    sent += 1;
                }
            }
        }
        sent
    }
}

/// Manages all WebSocket connections and subscriptions
pub struct ConnectionHub {
    registry: Arc<RwLock<Registry>>,
    broadcast_tx: broadcast::Sender<WsEvent>,
    config: HubConfig,
}

impl ConnectionHub {
    pub fn new(config: HubConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(config.broadcast_capacity);

        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            broadcast_tx,
            config,
        }
    }

    /// Register a new WebSocket connection
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<ConnectionId, HubError> {
        let mut registry = self.registry.write().await;
        if registry.connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }

        let id = Uuid::new_v4().to_string();
        registry.connections.insert(
            id.clone(),
            ConnectionHandle {
                sender,
                subscriptions: HashSet::new(),
            },
        );

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Unregister a connection and drop its subscriptions
    pub async fn unregister(&self, id: &str) {
        let mut registry = self.registry.write().await;

        if let Some(handle) = registry.connections.remove(id) {
            for topic in handle.subscriptions {
                if let Some(subscribers) = registry.subscriptions.get_mut(&topic) {
                    subscribers.remove(id);
                    if subscribers.is_empty() {
                        registry.subscriptions.remove(&topic);
                    }
                }
            }
        }

        tracing::info!(connection_id = %id, "WebSocket disconnected");
    }

    /// Subscribe a connection to topics. Invalid topics are skipped.
    pub async fn subscribe(&self, id: &str, topics: Vec<String>) -> Result<Vec<String>, HubError> {
        let mut registry = self.registry.write().await;
        let Registry {
            connections,
            subscriptions,
        } = &mut *registry;

        let handle = connections.get_mut(id).ok_or(HubError::ConnectionNotFound)?;
        let mut subscribed = Vec::new();

        for topic in topics {
            if !is_valid_topic(&topic) {
                tracing::warn!(topic = %topic, "Invalid topic ignored");
                continue;
            }

            handle.subscriptions.insert(topic.clone());
            subscriptions
                .entry(topic.clone())
                .or_default()
                .insert(id.to_string());

            subscribed.push(topic);
        }

        tracing::debug!(connection_id = %id, topics = ?subscribed, "Subscribed to topics");

        Ok(subscribed)
    }

    pub async fn unsubscribe(&self, id: &str, topics: Vec<String>) -> Result<Vec<String>, HubError> {
        let mut registry = self.registry.write().await;
        let Registry {
            connections,
            subscriptions,
        } = &mut *registry;

        let handle = connections.get_mut(id).ok_or(HubError::ConnectionNotFound)?;
        let mut unsubscribed = Vec::new();

        for topic in topics {
            if handle.subscriptions.remove(&topic) {
                if let Some(subscribers) = subscriptions.get_mut(&topic) {
                    subscribers.remove(id);
                    if subscribers.is_empty() {
                        subscriptions.remove(&topic);
                    }
                }
                unsubscribed.push(topic);
            }
        }

        tracing::debug!(connection_id = %id, topics = ?unsubscribed, "Unsubscribed from topics");

        Ok(unsubscribed)
    }

    /// Deliver an event to every subscriber of its topic
    pub async fn broadcast(&self, event: &WsEvent) -> usize {
        let sent = self.registry.read().await.deliver(event);
        if sent > 0 {
            tracing::trace!(topic = %event.topic, subscribers = sent, "Broadcast event");
        }
        sent
    }

    /// Publish an event to in-process listeners and socket subscribers
    ///
    /// Must be called from within a tokio runtime.
    pub fn publish(&self, event: WsEvent) {
        // No receivers is fine
        let _ = self.broadcast_tx.send(event.clone());

        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            registry.read().await.deliver(&event);
        });
    }

    /// Send a message directly to one connection
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let registry = self.registry.read().await;
        let handle = registry
            .connections
            .get(id)
            .ok_or(HubError::ConnectionNotFound)?;

        handle.sender.send(message).map_err(|_| HubError::SendFailed)
    }

    /// Receiver for every published event
    pub fn subscribe_events(&self) -> broadcast::Receiver<WsEvent> {
        self.broadcast_tx.subscribe()
    }

    pub async fn connection_count(&self) -> usize {
        self.registry.read().await.connections.len()
    }

    pub async fn subscription_count(&self, topic: &str) -> usize {
        self.registry
            .read()
            .await
            .subscriptions
            .get(topic)
            .map(|s| s.len())
            .unwrap_or(0)
    }
}

/// Topics a client may subscribe to:
/// `sessions.*`, `sessions.{user_id}`, `resources`, `plans`, `system`
pub fn is_valid_topic(topic: &str) -> bool {
    match topic.strip_prefix("sessions.") {
        Some(rest) => !rest.is_empty(),
        None => matches!(topic, "resources" | "plans" | "system"),
    }
}

/// Errors that can occur in the connection hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StudySession;
    use crate::websocket::messages::ChangeKind;
    use chrono::{Duration, Utc};

    fn session() -> StudySession {
        let end = Utc::now();
        StudySession::new(end - Duration::minutes(25), end, "pomodoro")
    }

    #[test]
    fn test_valid_topics() {
        assert!(is_valid_topic("sessions.*"));
        assert!(is_valid_topic("sessions.alice"));
        assert!(is_valid_topic("resources"));
        assert!(is_valid_topic("plans"));
        assert!(is_valid_topic("system"));

        assert!(!is_valid_topic("sessions."));
        assert!(!is_valid_topic("metrics.mood"));
        assert!(!is_valid_topic(""));
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();
        assert_eq!(hub.connection_count().await, 1);

        hub.subscribe(&id, vec!["plans".to_string()]).await.unwrap();
        hub.unregister(&id).await;

        assert_eq!(hub.connection_count().await, 0);
        assert_eq!(hub.subscription_count("plans").await, 0);
    }

    #[tokio::test]
    async fn test_subscribe_skips_invalid_topics() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        let subscribed = hub
            .subscribe(&id, vec!["plans".to_string(), "bogus".to_string()])
            .await
            .unwrap();
        assert_eq!(subscribed, vec!["plans"]);

        let unsubscribed = hub
            .unsubscribe(&id, vec!["plans".to_string(), "resources".to_string()])
            .await
            .unwrap();
        assert_eq!(unsubscribed, vec!["plans"]);
        assert_eq!(hub.subscription_count("plans").await, 0);
    }

    #[tokio::test]
    async fn test_connection_limit() {
        let hub = ConnectionHub::new(HubConfig {
            max_connections: 1,
            broadcast_capacity: 16,
        });
        let (tx1, _) = mpsc::unbounded_channel();
        let (tx2, _) = mpsc::unbounded_channel();

        hub.register(tx1).await.unwrap();
        let result = hub.register(tx2).await;
        assert!(matches!(result, Err(HubError::TooManyConnections(1))));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_direct_and_wildcard_subscribers() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();

        let alice = hub.register(tx1).await.unwrap();
        let watcher = hub.register(tx2).await.unwrap();
        let other = hub.register(tx3).await.unwrap();

        hub.subscribe(&alice, vec!["sessions.alice".to_string()]).await.unwrap();
        hub.subscribe(&watcher, vec!["sessions.*".to_string()]).await.unwrap();
        hub.subscribe(&other, vec!["sessions.bob".to_string()]).await.unwrap();

        let sent = hub
            .broadcast(&WsEvent::session_completed("alice", &session()))
            .await;

        assert_eq!(sent, 2);
        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
        assert!(rx3.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_connection_subscribed_twice_receives_once() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        hub.subscribe(&id, vec!["sessions.*".to_string(), "sessions.alice".to_string()])
            .await
            .unwrap();
        hub.broadcast(&WsEvent::session_completed("alice", &session()))
            .await;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_reaches_in_process_listeners() {
        let hub = ConnectionHub::new(HubConfig::default());
        let mut events = hub.subscribe_events();

        hub.publish(WsEvent::plans_changed("alice", ChangeKind::Created, "p1"));

        let event = events.recv().await.unwrap();
        assert_eq!(event.topic, "plans");
    }
}
