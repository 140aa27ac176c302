//! Dashboard loading and event-driven refresh
//!
//! A failed load is logged and leaves the zero-state dashboard in place; the
//! home page shows no toast and does not retry.
//!
//! Completed sessions re-fetch the dashboard after `REFRESH_DELAY`; generated
//! plans re-list the plans after `PLAN_REFRESH_DELAY`.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::client::events::StudyEvent;
use crate::client::{ApiClient, ClientError};
use crate::stats::{Dashboard, StatsResponse};
use crate::storage::StudyPlan;

/// Wait after a completed session before re-fetching
pub const REFRESH_DELAY: Duration = Duration::from_secs(1);

/// Wait after generating a plan before re-listing plans
pub const PLAN_REFRESH_DELAY: Duration = Duration::from_millis(500);

/// Where dashboard statistics come from
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_stats(&self) -> Result<StatsResponse, ClientError>;
}

#[async_trait]
impl StatsSource for ApiClient {
    async fn fetch_stats(&self) -> Result<StatsResponse, ClientError> {
        self.get_stats().await
    }
}

/// Where the plan list comes from
#[async_trait]
pub trait PlansSource: Send + Sync {
    async fn fetch_plans(&self) -> Result<Vec<StudyPlan>, ClientError>;
}

#[async_trait]
impl PlansSource for ApiClient {
    async fn fetch_plans(&self) -> Result<Vec<StudyPlan>, ClientError> {
        self.get_study_plans().await
    }
}

/// Fetch and transform; any failure yields the zero state
pub async fn load_dashboard<S: StatsSource + ?Sized>(source: &S) -> Dashboard {
    match source.fetch_stats().await {
        Ok(response) => Dashboard::from_response(response),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching study stats");
            Dashboard::default()
        }
    }
}

/// Wait `delay`, then re-list plans. `None` when the fetch failed.
pub async fn reload_plans<S: PlansSource + ?Sized>(
    source: &S,
    delay: Duration,
) -> Option<Vec<StudyPlan>> {
    tokio::time::sleep(delay).await;
    match source.fetch_plans().await {
        Ok(plans) => Some(plans),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching study plans");
            None
        }
    }
}

/// Re-fetch the dashboard `REFRESH_DELAY` after each completed session
///
/// The task ends when the bus is dropped. Lagged events are skipped.
pub fn spawn_refresh<S, F>(
    source: Arc<S>,
    events: broadcast::Receiver<StudyEvent>,
    on_update: F,
) -> JoinHandle<()>
where
    S: StatsSource + 'static,
    F: FnMut(Dashboard) + Send + 'static,
{
    spawn_refresh_after(source, events, REFRESH_DELAY, on_update)
}

pub fn spawn_refresh_after<S, F>(
    source: Arc<S>,
    mut events: broadcast::Receiver<StudyEvent>,
    delay: Duration,
    mut on_update: F,
) -> JoinHandle<()>
where
    S: StatsSource + 'static,
    F: FnMut(Dashboard) + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(StudyEvent::SessionCompleted(_)) => {
                    tokio::time::sleep(delay).await;
                    on_update(load_dashboard(source.as_ref()).await);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dashboard refresh fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Re-list plans `PLAN_REFRESH_DELAY` after each generated plan
///
/// `on_update` gets `None` when the re-list failed, matching
/// `ListState::load`.
pub fn spawn_plan_refresh<S, F>(
    source: Arc<S>,
    mut events: broadcast::Receiver<StudyEvent>,
    mut on_update: F,
) -> JoinHandle<()>
where
    S: PlansSource + 'static,
    F: FnMut(Option<Vec<StudyPlan>>) + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(StudyEvent::PlanGenerated { .. }) => {
                    on_update(reload_plans(source.as_ref(), PLAN_REFRESH_DELAY).await);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Plan refresh fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
