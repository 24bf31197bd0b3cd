//! Periodic backend health polling.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::ChatGateway;
use crate::core::model::{HealthState, HealthStatus};

pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

impl HealthStatus {
    pub fn unknown(at: DateTime<Local>) -> Self {
        Self {
            state: HealthState::Unknown,
            last_checked: at,
        }
    }

    /// Records one check. `last_checked` advances whatever the outcome.
    pub fn record(&mut self, healthy: bool, at: DateTime<Local>) {
        self.state = if healthy {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        };
        self.last_checked = at;
    }

    pub fn is_healthy(&self) -> bool {
        self.state == HealthState::Healthy
    }
}

/// Checks health immediately, then every `interval`, sending each observation
/// on `tx`. Stops when `cancel` fires or the receiver is dropped.
pub fn spawn_health_monitor(
    gateway: Arc<dyn ChatGateway>,
    interval: Duration,
    tx: mpsc::UnboundedSender<HealthStatus>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut status = HealthStatus::unknown(Local::now());

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let healthy = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                healthy = gateway.check_health() => healthy,
            };

            let previous = status.state;
            status.record(healthy, Local::now());
            if previous != status.state {
                if healthy {
                    info!("backend is healthy");
                } else {
                    warn!("backend is unhealthy");
                }
            }
            if tx.send(status).is_err() {
                debug!("health receiver dropped; stopping monitor");
                break;
            }
        }
    })
}
