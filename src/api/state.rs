//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::api::error::ApiResult;
use crate::config::Config;
use crate::curation::{
    Curator, LinkCurator, PlanGenerator, RateLimiter, TopicClaims, WeeklyPlanner,
};
use crate::storage::{StorageResult, Store};
use crate::websocket::{ConnectionHub, HubConfig};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// SQLite-backed study store
    pub store: Arc<Store>,
    /// WebSocket connections and the in-process event channel
    pub hub: Arc<ConnectionHub>,
    /// Per-user limit on curation and plan generation
    pub limiter: Arc<RateLimiter>,
    /// Topics with a curation request in flight
    pub claims: Arc<TopicClaims>,
    pub curator: Arc<dyn Curator>,
    pub planner: Arc<dyn PlanGenerator>,
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// State with the built-in curator and planner
    pub fn new(store: Arc<Store>, config: Config) -> Self {
        let hub = ConnectionHub::new(HubConfig {
            max_connections: config.websocket.max_connections,
            broadcast_capacity: config.websocket.broadcast_capacity,
        });
        let limiter = RateLimiter::new(
            config.curation.rate_limit_requests,
            config.curation.window(),
        );

        Self {
            store,
            hub: Arc::new(hub),
            limiter: Arc::new(limiter),
            claims: Arc::new(TopicClaims::new()),
            curator: Arc::new(LinkCurator::new()),
            planner: Arc::new(WeeklyPlanner::new()),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Swap in other curation backends
    pub fn with_generators(
        mut self,
        curator: Arc<dyn Curator>,
        planner: Arc<dyn PlanGenerator>,
    ) -> Self {
        self.curator = curator;
        self.planner = planner;
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Run a store operation on the blocking pool
    pub async fn db<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Store) -> StorageResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || op(&store)).await?;
        Ok(result?)
    }
}
