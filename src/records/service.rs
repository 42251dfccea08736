use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{MapRecord, MapStatus},
    types::RecordSubmission,
};
use crate::growth::{recorder, SnapshotEvent};
use crate::players::ledger;
use crate::shared::{AppError, TrackerSettings};
use crate::store::TrackerStore;
use crate::summary::{aggregator, models::Summary};

/// What a submission did to the stored records
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// No open record existed, a new one was inserted
    Created(MapRecord),
    /// An open record for the same map and difficulty was updated in place
    Updated(MapRecord),
}

impl SubmissionOutcome {
    pub fn record(&self) -> &MapRecord {
        match self {
            SubmissionOutcome::Created(record) | SubmissionOutcome::Updated(record) => record,
        }
    }

    pub fn into_record(self) -> MapRecord {
        match self {
            SubmissionOutcome::Created(record) | SubmissionOutcome::Updated(record) => record,
        }
    }
}

/// Service for map record ingestion and queries
pub struct RecordService {
    store: Arc<dyn TrackerStore>,
    settings: TrackerSettings,
}

impl RecordService {
    pub fn new(store: Arc<dyn TrackerStore>, settings: TrackerSettings) -> Self {
        Self { store, settings }
    }

    /// Ingests a submission and reconciles all derived state.
    ///
    /// Runs in one transaction: upsert the record, credit its runners when it
    /// is completed, recompute the summary and append a growth point. Runners
    /// are only credited once the record write succeeded, and any failure
    /// rolls back the whole chain.
    #[instrument(
        skip(self, submission),
        fields(map_name = %submission.map_name, difficulty = %submission.difficulty)
    )]
    pub async fn submit(
        &self,
        submission: RecordSubmission,
    ) -> Result<SubmissionOutcome, AppError> {
        let candidate = submission.into_candidate()?;
        let now = Utc::now();

        let mut tx = self.store.begin().await?;
        tx.lock_reconciliation().await?;

        let existing = tx
            .find_record(&candidate.map_name, &candidate.difficulty, MapStatus::Completed)
            .await?;

        let outcome = match existing {
            Some(mut record) => {
                debug!(record_id = record.id, status = %record.status, "Merging into open record");
                record.merge_submission(&candidate, now);
                tx.update_record(&record).await?;
                SubmissionOutcome::Updated(record)
            }
            None => {
                let mut record = candidate;
                record.prepare_insert(now);
                let record = tx.insert_record(&record).await?;
                debug!(record_id = record.id, status = %record.status, "Inserted new record");
                SubmissionOutcome::Created(record)
            }
        };

        let record = outcome.record();
        if record.is_completed() {
            ledger::attribute_score(tx.as_mut(), &record.runner, record.score).await?;
        }

        let summary = aggregator::recompute(tx.as_mut(), self.settings.target_score, now).await?;
        let event = SnapshotEvent {
            runner: record.runner.clone(),
            map_name: record.map_name.clone(),
            map_points: record.score,
        };
        recorder::record_snapshot(
            tx.as_mut(),
            summary.current_score,
            summary.completed_maps,
            &event,
            now,
        )
        .await?;

        tx.commit().await?;

        info!(
            record_id = record.id,
            status = %record.status,
            score = record.score,
            created = matches!(outcome, SubmissionOutcome::Created(_)),
            "Submission reconciled"
        );
        Ok(outcome)
    }

    /// All records, optionally for one difficulty
    #[instrument(skip(self))]
    pub async fn list_maps(&self, difficulty: Option<&str>) -> Result<Vec<MapRecord>, AppError> {
        let difficulty = difficulty.map(str::trim).filter(|d| !d.is_empty());

        let mut tx = self.store.begin().await?;
        let records = tx.list_records(difficulty).await?;
        tx.commit().await?;
        Ok(records)
    }

    /// Maps of a difficulty that can still be submitted against
    #[instrument(skip(self))]
    pub async fn map_options(&self, difficulty: &str) -> Result<Vec<MapRecord>, AppError> {
        let difficulty = difficulty.trim();
        if difficulty.is_empty() {
            return Err(AppError::Validation(
                "difficulty query parameter is required".to_string(),
            ));
        }

        let mut tx = self.store.begin().await?;
        let records = tx.list_open_records(difficulty).await?;
        tx.commit().await?;
        Ok(records)
    }

    /// Brings the summary in line with the stored records
    #[instrument(skip(self))]
    pub async fn reconcile_summary(&self) -> Result<Summary, AppError> {
        let mut tx = self.store.begin().await?;
        tx.lock_reconciliation().await?;
        let summary =
            aggregator::recompute(tx.as_mut(), self.settings.target_score, Utc::now()).await?;
        tx.commit().await?;
        Ok(summary)
    }
}
