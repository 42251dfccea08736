use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use super::{
    models::{format_timestamp, GrowthData, SnapshotEvent},
    repository::GrowthRepository,
};
use crate::records::repository::RecordRepository;
use crate::shared::AppError;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours between `start` and `now`, never negative
pub fn elapsed_hours(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - start).num_milliseconds() as f64;
    (millis / MILLIS_PER_HOUR).max(0.0)
}

/// Appends a growth point when `(score, maps)` differs from the last one.
///
/// Elapsed hours count from the earliest completion on record, or are zero
/// while nothing has been completed. Returns the appended point, or `None`
/// when the totals did not change.
#[instrument(skip(repo, event), fields(runner = %event.runner, map_name = %event.map_name))]
pub async fn record_snapshot<R>(
    repo: &mut R,
    score: i64,
    completed_maps: i64,
    event: &SnapshotEvent,
    now: DateTime<Utc>,
) -> Result<Option<GrowthData>, AppError>
where
    R: RecordRepository + GrowthRepository + ?Sized,
{
    let start = repo.earliest_completed_finish_time().await?.unwrap_or(now);
    let hours = elapsed_hours(start, now);

    if let Some(last) = repo.latest_growth_point().await? {
        if last.points == score && last.maps == completed_maps {
            debug!(score, completed_maps, "Totals unchanged, skipping growth point");
            return Ok(None);
        }
    }

    let point = repo
        .append_growth_point(&GrowthData {
            id: 0,
            hours,
            points: score,
            maps: completed_maps,
            runner: event.runner.clone(),
            map_name: event.map_name.clone(),
            map_points: event.map_points,
            timestamp: format_timestamp(now),
        })
        .await?;

    info!(score, completed_maps, hours, "Growth point recorded");
    Ok(Some(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::models::{MapRecord, MapStatus};
    use crate::store::{InMemoryStore, TrackerStore};
    use chrono::Duration;

    fn event(map_name: &str) -> SnapshotEvent {
        SnapshotEvent {
            runner: "Alice".to_string(),
            map_name: map_name.to_string(),
            map_points: 5,
        }
    }

    #[test]
    fn elapsed_hours_is_clamped() {
        let now = Utc::now();
        assert_eq!(elapsed_hours(now, now), 0.0);
        assert_eq!(elapsed_hours(now + Duration::hours(2), now), 0.0);
        assert_eq!(elapsed_hours(now - Duration::minutes(90), now), 1.5);
    }

    #[tokio::test]
    async fn unchanged_totals_append_nothing() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let now = Utc::now();

        let first = record_snapshot(tx.as_mut(), 5, 1, &event("X"), now)
            .await
            .unwrap();
        assert!(first.is_some());

        let repeat = record_snapshot(tx.as_mut(), 5, 1, &event("Y"), now)
            .await
            .unwrap();
        assert!(repeat.is_none());

        let changed = record_snapshot(tx.as_mut(), 5, 2, &event("Z"), now)
            .await
            .unwrap();
        assert!(changed.is_some());

        let series = tx.list_growth_since("").await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].map_name, "Z");
    }

    #[tokio::test]
    async fn hours_are_zero_before_first_completion() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();

        let point = record_snapshot(tx.as_mut(), 0, 0, &event("X"), Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(point.hours, 0.0);
    }

    #[tokio::test]
    async fn hours_count_from_earliest_completion() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let now = Utc::now();

        tx.insert_record(&MapRecord {
            id: 0,
            difficulty: "Insane".to_string(),
            map_name: "X".to_string(),
            runner: "Alice".to_string(),
            score: 5,
            points: 5,
            stars: 0,
            note: String::new(),
            status: MapStatus::Completed,
            finish_time: Some(now - Duration::hours(6)),
            has_dummy: false,
        })
        .await
        .unwrap();

        let point = record_snapshot(tx.as_mut(), 5, 1, &event("X"), now)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(point.hours, 6.0);
        assert_eq!(point.timestamp, format_timestamp(now));
    }
}
