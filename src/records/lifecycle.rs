//! Status inference and merge rules for map records.
//!
//! Status is never trusted from the caller. Every record passes through
//! [`MapRecord::normalize`] right before it is written, which re-derives the
//! status from runner and score and backfills the completion fields.

use chrono::{DateTime, Utc};

use super::models::{MapRecord, MapStatus};

/// Runner values that mean "nobody has attempted this map"
const PLACEHOLDER_RUNNERS: [&str; 3] = ["", "-", "nan"];

pub fn is_placeholder_runner(runner: &str) -> bool {
    PLACEHOLDER_RUNNERS.contains(&runner)
}

/// Derives the status of a record.
///
/// Precedence: a placeholder runner always means Incomplete, an explicit
/// InProgress pin sticks, any positive score completes the map, and a named
/// runner without score is InProgress.
pub fn infer_status(runner: &str, score: i32, hint: MapStatus) -> MapStatus {
    if is_placeholder_runner(runner) {
        MapStatus::Incomplete
    } else if hint == MapStatus::InProgress {
        MapStatus::InProgress
    } else if score > 0 {
        MapStatus::Completed
    } else {
        MapStatus::InProgress
    }
}

impl MapRecord {
    /// Applies status inference and the completion backfills in place.
    ///
    /// A completed record always ends up with a positive score when the map
    /// has a nominal value, and always carries a finish time.
    pub fn normalize(&mut self, now: DateTime<Utc>) {
        self.status = infer_status(&self.runner, self.score, self.status);
        self.backfill_completion(now);
    }

    /// Fills score and finish time of a completed record when missing
    pub(crate) fn backfill_completion(&mut self, now: DateTime<Utc>) {
        if self.status != MapStatus::Completed {
            return;
        }
        if self.score == 0 && self.points > 0 {
            self.score = self.points;
        }
        if self.finish_time.is_none() {
            self.finish_time = Some(now);
        }
    }

    /// Prepares a brand new record for insertion
    pub fn prepare_insert(&mut self, now: DateTime<Utc>) {
        self.normalize(now);
        if self.score > 0 || self.is_completed() {
            self.finish_time = Some(now);
        }
    }

    /// Merges a submission into this open (not yet completed) record.
    ///
    /// Identity, nominal points and star rating stay with the stored record.
    /// An attempt that does not end up completed carries no score.
    pub fn merge_submission(&mut self, submission: &MapRecord, now: DateTime<Utc>) {
        self.runner = submission.runner.clone();
        self.note = submission.note.clone();
        self.has_dummy = submission.has_dummy;
        self.score = submission.score;
        self.status = submission.status;
        self.finish_time = Some(now);

        self.normalize(now);

        if !self.is_completed() {
            self.score = 0;
            self.has_dummy = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn record(runner: &str, score: i32, points: i32, status: MapStatus) -> MapRecord {
        MapRecord {
            id: 0,
            difficulty: "Insane".to_string(),
            map_name: "Ravillion".to_string(),
            runner: runner.to_string(),
            score,
            points,
            stars: 2,
            note: String::new(),
            status,
            finish_time: None,
            has_dummy: false,
        }
    }

    #[rstest]
    #[case("", 38)]
    #[case("-", 38)]
    #[case("nan", 38)]
    #[case("", 0)]
    fn placeholder_runner_is_incomplete(#[case] runner: &str, #[case] score: i32) {
        for hint in MapStatus::iter() {
            assert_eq!(infer_status(runner, score, hint), MapStatus::Incomplete);
        }
    }

    #[rstest]
    #[case("NaN")]
    #[case("Nan")]
    #[case(" - ")]
    fn near_placeholders_are_real_runners(#[case] runner: &str) {
        assert_eq!(
            infer_status(runner, 5, MapStatus::Incomplete),
            MapStatus::Completed
        );
    }

    #[rstest]
    #[case(0)]
    #[case(42)]
    fn in_progress_pin_is_sticky(#[case] score: i32) {
        assert_eq!(
            infer_status("Hardy", score, MapStatus::InProgress),
            MapStatus::InProgress
        );
    }

    #[rstest]
    #[case(MapStatus::Incomplete, 1, MapStatus::Completed)]
    #[case(MapStatus::Completed, 1, MapStatus::Completed)]
    #[case(MapStatus::Incomplete, 0, MapStatus::InProgress)]
    #[case(MapStatus::Completed, 0, MapStatus::InProgress)]
    fn score_decides_for_named_runner(
        #[case] hint: MapStatus,
        #[case] score: i32,
        #[case] expected: MapStatus,
    ) {
        assert_eq!(infer_status("Alice", score, hint), expected);
    }

    #[test]
    fn zero_score_with_completed_hint_is_in_progress() {
        let mut rec = record("Alice", 0, 38, MapStatus::Completed);
        rec.normalize(Utc::now());
        assert_eq!(rec.status, MapStatus::InProgress);
        assert_eq!(rec.score, 0);
        assert!(rec.finish_time.is_none());
    }

    #[test]
    fn completed_record_backfills_score_from_points() {
        let now = Utc::now();
        let mut rec = record("Alice", 0, 38, MapStatus::Completed);
        rec.backfill_completion(now);
        assert_eq!(rec.score, 38);
        assert_eq!(rec.finish_time, Some(now));

        let mut scored = record("Alice", 5, 38, MapStatus::Incomplete);
        scored.normalize(now);
        assert_eq!(scored.status, MapStatus::Completed);
        assert_eq!(scored.score, 5);
        assert_eq!(scored.finish_time, Some(now));
    }

    #[test]
    fn backfill_ignores_open_records() {
        let mut rec = record("Alice", 0, 38, MapStatus::InProgress);
        rec.backfill_completion(Utc::now());
        assert_eq!(rec.score, 0);
        assert!(rec.finish_time.is_none());
    }

    #[test]
    fn normalize_keeps_existing_finish_time() {
        let earlier = Utc::now() - Duration::hours(3);
        let mut rec = record("Alice", 5, 5, MapStatus::Incomplete);
        rec.finish_time = Some(earlier);
        rec.normalize(Utc::now());
        assert_eq!(rec.finish_time, Some(earlier));
    }

    #[test]
    fn prepare_insert_stamps_scored_records() {
        let now = Utc::now();

        let mut completed = record("Alice", 5, 5, MapStatus::Incomplete);
        completed.prepare_insert(now);
        assert_eq!(completed.status, MapStatus::Completed);
        assert_eq!(completed.finish_time, Some(now));

        let mut pinned = record("Alice", 5, 5, MapStatus::InProgress);
        pinned.prepare_insert(now);
        assert_eq!(pinned.status, MapStatus::InProgress);
        assert_eq!(pinned.finish_time, Some(now));

        let mut untouched = record("", 0, 38, MapStatus::Incomplete);
        untouched.prepare_insert(now);
        assert_eq!(untouched.status, MapStatus::Incomplete);
        assert!(untouched.finish_time.is_none());
    }

    #[test]
    fn merge_completing_submission_keeps_score() {
        let now = Utc::now();
        let mut stored = record("Hardy", 0, 38, MapStatus::InProgress);
        stored.id = 7;

        let mut incoming = record("Alice & Bob", 40, 0, MapStatus::Incomplete);
        incoming.has_dummy = true;
        incoming.note = "First clear".to_string();

        stored.merge_submission(&incoming, now);

        assert_eq!(stored.id, 7);
        assert_eq!(stored.points, 38);
        assert_eq!(stored.status, MapStatus::Completed);
        assert_eq!(stored.score, 40);
        assert!(stored.has_dummy);
        assert_eq!(stored.note, "First clear");
        assert_eq!(stored.finish_time, Some(now));
    }

    #[test]
    fn merge_non_completing_submission_drops_score_and_dummy() {
        let now = Utc::now();
        let mut stored = record("", 0, 38, MapStatus::Incomplete);

        let mut incoming = record("Hardy", 12, 0, MapStatus::InProgress);
        incoming.has_dummy = true;

        stored.merge_submission(&incoming, now);

        assert_eq!(stored.status, MapStatus::InProgress);
        assert_eq!(stored.score, 0);
        assert!(!stored.has_dummy);
        assert_eq!(stored.runner, "Hardy");
    }

    #[test]
    fn merge_with_placeholder_runner_reopens_map() {
        let now = Utc::now();
        let mut stored = record("Hardy", 0, 38, MapStatus::InProgress);

        let incoming = record("-", 10, 0, MapStatus::Incomplete);
        stored.merge_submission(&incoming, now);

        assert_eq!(stored.status, MapStatus::Incomplete);
        assert_eq!(stored.score, 0);
    }
}
