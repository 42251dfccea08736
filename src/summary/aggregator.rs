use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use super::{models::Summary, repository::SummaryRepository};
use crate::records::{models::MapStatus, repository::RecordRepository};
use crate::shared::AppError;

/// Re-derives the server-wide totals from the map records.
///
/// The current score is the sum of nominal `points` (not awarded `score`)
/// over completed maps. Totals are always recomputed from the records, never
/// adjusted incrementally, so repeated calls converge on the same values.
#[instrument(skip(repo))]
pub async fn recompute<R>(
    repo: &mut R,
    default_target: i64,
    now: DateTime<Utc>,
) -> Result<Summary, AppError>
where
    R: RecordRepository + SummaryRepository + ?Sized,
{
    let total_points = repo.sum_points(MapStatus::Completed).await?;
    let completed_maps = repo.count_records(MapStatus::Completed).await?;

    let mut summary = match repo.latest_summary().await? {
        Some(summary) => summary,
        None => Summary::new(default_target, now),
    };

    summary.current_score = total_points;
    summary.completed_maps = completed_maps;
    summary.last_update = now;

    let summary = repo.save_summary(&summary).await?;
    info!(
        current_score = summary.current_score,
        completed_maps = summary.completed_maps,
        "Summary recomputed"
    );
    Ok(summary)
}
