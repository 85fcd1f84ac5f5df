//! Stale-selection handling in `ConsistencySession`.
//!
//! The user selects shot A, whose lookup stalls, then shot B. B's report must
//! win regardless of when A's lookup finishes.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use shotline_consistency::{ConsistencyEngine, ConsistencySession};
use shotline_core::bible::{CharacterAppearanceSheet, LocationAppearanceSheet};
use shotline_core::shot::{Sequence, SequenceStyleRecord, Shot};
use shotline_core::store::{InMemoryReferenceStore, ReferenceStore, StoreError};
use tokio::sync::Notify;

use common::*;

/// Blocks `get_shot` for one shot id until the gate is opened.
struct GatedStore {
    inner: Arc<InMemoryReferenceStore>,
    gated_shot: String,
    gate: Notify,
}

#[async_trait]
impl ReferenceStore for GatedStore {
    async fn get_shot(&self, shot_id: &str) -> Result<Option<Shot>, StoreError> {
        if shot_id == self.gated_shot {
            self.gate.notified().await;
        }
        self.inner.get_shot(shot_id).await
    }

    async fn get_sequence(&self, sequence_id: &str) -> Result<Option<Sequence>, StoreError> {
        self.inner.get_sequence(sequence_id).await
    }

    async fn get_master_character_sheets(
        &self,
        project_id: &str,
    ) -> Result<Vec<CharacterAppearanceSheet>, StoreError> {
        self.inner.get_master_character_sheets(project_id).await
    }

    async fn get_master_location_sheets(
        &self,
        project_id: &str,
    ) -> Result<Vec<LocationAppearanceSheet>, StoreError> {
        self.inner.get_master_location_sheets(project_id).await
    }

    async fn get_sequence_style(
        &self,
        sequence_id: &str,
    ) -> Result<Option<SequenceStyleRecord>, StoreError> {
        self.inner.get_sequence_style(sequence_id).await
    }
}

async fn gated_session() -> (Arc<ConsistencySession>, Arc<GatedStore>) {
    let inner = store(false).await;
    inner.put_shot(shot("a", "Aria")).await;
    inner.put_shot(shot("b", "The Hangar at night")).await;

    let gated = Arc::new(GatedStore {
        inner,
        gated_shot: "a".to_string(),
        gate: Notify::new(),
    });
    let engine = ConsistencyEngine::new(gated.clone());
    (Arc::new(ConsistencySession::new(Arc::new(engine))), gated)
}

#[tokio::test]
async fn later_selection_wins_over_slow_earlier_one() {
    let (session, gated) = gated_session().await;

    let ticket_a = session.select("a").await;
    let pending_a = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.evaluate(&ticket_a).await })
    };
    tokio::task::yield_now().await;

    let report_b = session
        .select_and_evaluate("b")
        .await
        .expect("current selection publishes");
    assert_eq!(report_b.shot_id, "b");

    gated.gate.notify_one();
    let report_a = pending_a.await.expect("task completes");
    assert!(report_a.is_none(), "stale report leaked: {report_a:?}");

    let latest = session.latest().await.expect("report published");
    assert_eq!(latest.shot_id, "b");
    assert_eq!(latest.issues.len(), 1);
    assert_eq!(latest.issues[0].subject_id.as_deref(), Some("l1"));
}

#[tokio::test]
async fn reselecting_same_shot_supersedes_older_ticket() {
    let (session, _gated) = gated_session().await;

    let old = session.select("b").await;
    let new = session.select("b").await;

    assert!(session.evaluate(&old).await.is_none());
    let report = session.evaluate(&new).await.expect("current ticket publishes");
    assert_eq!(report.shot_id, "b");
    assert_eq!(session.latest().await, Some(report));
}
