//! Current-shot tracking with stale result suppression.
//!
//! A host calls [`ConsistencySession::select`] every time the user selects a
//! shot and then [`ConsistencySession::evaluate`] with the returned ticket.
//! Each selection bumps an epoch and cancels the evaluation still running
//! for the previous one, so a slow lookup for shot A can never overwrite the
//! result for a later selection of shot B.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::engine::{ConsistencyEngine, ConsistencyReport};

/// Handle for one selection.
#[derive(Debug, Clone)]
pub struct SelectionTicket {
    pub shot_id: String,
    pub epoch: u64,
    cancel: CancellationToken,
}

impl SelectionTicket {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

pub struct ConsistencySession {
    engine: Arc<ConsistencyEngine>,
    epoch: AtomicU64,
    in_flight: Mutex<CancellationToken>,
    latest: RwLock<Option<ConsistencyReport>>,
}

impl ConsistencySession {
    pub fn new(engine: Arc<ConsistencyEngine>) -> Self {
        Self {
            engine,
            epoch: AtomicU64::new(0),
            in_flight: Mutex::new(CancellationToken::new()),
            latest: RwLock::new(None),
        }
    }

    /// Epoch of the most recent selection.
    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Record `shot_id` as the current selection and cancel the previous
    /// evaluation.
    pub async fn select(&self, shot_id: &str) -> SelectionTicket {
        let mut in_flight = self.in_flight.lock().await;
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();
        let previous = std::mem::replace(&mut *in_flight, cancel.clone());
        previous.cancel();

        tracing::debug!(shot_id, epoch, "Shot selected");

        SelectionTicket {
            shot_id: shot_id.to_string(),
            epoch,
            cancel,
        }
    }

    /// Recompute the ticket's shot.
    ///
    /// Returns `None` when the ticket was superseded or cancelled before the
    /// report could be published.
    pub async fn evaluate(&self, ticket: &SelectionTicket) -> Option<ConsistencyReport> {
        if !self.is_current(ticket) {
            tracing::debug!(shot_id = %ticket.shot_id, epoch = ticket.epoch, "Skipping stale selection");
            return None;
        }

        let report = tokio::select! {
            biased;
            _ = ticket.cancel.cancelled() => {
                tracing::debug!(
                    shot_id = %ticket.shot_id,
                    epoch = ticket.epoch,
                    "Evaluation cancelled",
                );
                return None;
            }
            report = self.engine.recompute(&ticket.shot_id) => report,
        };

        if self.publish(ticket, report.clone()).await {
            Some(report)
        } else {
            None
        }
    }

    /// `select` followed by `evaluate`.
    pub async fn select_and_evaluate(&self, shot_id: &str) -> Option<ConsistencyReport> {
        let ticket = self.select(shot_id).await;
        self.evaluate(&ticket).await
    }

    /// Last report accepted for a current selection.
    pub async fn latest(&self) -> Option<ConsistencyReport> {
        self.latest.read().await.clone()
    }

    /// Abort the in-flight evaluation, if any.
    pub async fn cancel(&self) {
        self.in_flight.lock().await.cancel();
    }

    fn is_current(&self, ticket: &SelectionTicket) -> bool {
        !ticket.cancel.is_cancelled() && self.current_epoch() == ticket.epoch
    }

    async fn publish(&self, ticket: &SelectionTicket, report: ConsistencyReport) -> bool {
        let mut latest = self.latest.write().await;
        if !self.is_current(ticket) {
            tracing::info!(
                shot_id = %ticket.shot_id,
                epoch = ticket.epoch,
                current_epoch = self.current_epoch(),
                "Discarding stale consistency report",
            );
            return false;
        }
        *latest = Some(report);
        true
    }
}
