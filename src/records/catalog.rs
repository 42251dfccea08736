//! Bulk import of untouched maps from a `stars|name|...` catalog listing.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{MapRecord, MapStatus},
    types::{ImportReport, MAX_STARS},
};
use crate::shared::AppError;
use crate::store::TrackerStore;

/// Points a map is worth before any star: 30, plus 4 per star
const BASE_POINTS: i32 = 30;
const POINTS_PER_STAR: i32 = 4;

/// One map listed in a catalog file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub stars: i32,
    pub map_name: String,
}

impl CatalogEntry {
    pub fn points(&self) -> i32 {
        points_for_stars(self.stars)
    }
}

pub fn points_for_stars(stars: i32) -> i32 {
    BASE_POINTS + stars * POINTS_PER_STAR
}

/// Parses catalog lines of the form `<stars>|<map name>|...`.
///
/// Blank lines, box-drawing separators and lines whose first field is not a
/// star count are skipped.
pub fn parse_catalog(text: &str) -> Vec<CatalogEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains('─'))
        .filter_map(|line| {
            let mut fields = line.split('|');
            let stars = fields.next()?.trim().parse::<i32>().ok()?;
            let map_name = fields.next()?.trim();
            if map_name.is_empty() || !(0..=MAX_STARS).contains(&stars) {
                return None;
            }
            Some(CatalogEntry {
                stars,
                map_name: map_name.to_string(),
            })
        })
        .collect()
}

/// Inserts an untouched record for every catalog map not yet tracked at
/// `difficulty`, all in one transaction
#[instrument(skip(store, entries), fields(entry_count = entries.len()))]
pub async fn import_catalog(
    store: Arc<dyn TrackerStore>,
    difficulty: &str,
    entries: &[CatalogEntry],
) -> Result<ImportReport, AppError> {
    let mut tx = store.begin().await?;

    let mut known: HashSet<String> = tx
        .list_records(Some(difficulty))
        .await?
        .into_iter()
        .map(|r| r.map_name)
        .collect();

    let mut inserted = 0;
    for entry in entries {
        if !known.insert(entry.map_name.clone()) {
            debug!(map_name = %entry.map_name, "Map already tracked, skipping");
            continue;
        }

        tx.insert_record(&MapRecord {
            id: 0,
            difficulty: difficulty.to_string(),
            map_name: entry.map_name.clone(),
            runner: String::new(),
            score: 0,
            points: entry.points(),
            stars: entry.stars,
            note: String::new(),
            status: MapStatus::Incomplete,
            finish_time: None,
            has_dummy: false,
        })
        .await?;
        inserted += 1;
    }

    tx.commit().await?;

    info!(parsed = entries.len(), inserted, "Catalog imported");
    Ok(ImportReport {
        parsed: entries.len(),
        inserted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    const CATALOG: &str = "\
───────── Insane ─────────
1|Ravillion|Mapper A
5|Impossible Map|Mapper B

x|Broken line
3|
2|Just Fly
";

    #[test]
    fn parses_star_and_name_fields() {
        let entries = parse_catalog(CATALOG);
        assert_eq!(
            entries,
            vec![
                CatalogEntry {
                    stars: 1,
                    map_name: "Ravillion".to_string()
                },
                CatalogEntry {
                    stars: 5,
                    map_name: "Impossible Map".to_string()
                },
                CatalogEntry {
                    stars: 2,
                    map_name: "Just Fly".to_string()
                },
            ]
        );
    }

    #[test]
    fn star_rating_sets_nominal_points() {
        assert_eq!(points_for_stars(1), 34);
        assert_eq!(points_for_stars(5), 50);
    }

    #[tokio::test]
    async fn imports_only_untracked_maps() {
        let store = Arc::new(InMemoryStore::new());
        let mut entries = parse_catalog(CATALOG);
        entries.push(entries[0].clone());

        let report = import_catalog(store.clone(), "INSANE", &entries)
            .await
            .unwrap();
        assert_eq!(
            report,
            ImportReport {
                parsed: 4,
                inserted: 3
            }
        );

        let again = import_catalog(store.clone(), "INSANE", &entries)
            .await
            .unwrap();
        assert_eq!(again.inserted, 0);

        let other_difficulty = import_catalog(store.clone(), "BRUTAL", &entries[..1])
            .await
            .unwrap();
        assert_eq!(other_difficulty.inserted, 1);

        let tables = store.snapshot().await;
        assert_eq!(tables.records.len(), 4);
        let ravillion = tables
            .records
            .iter()
            .find(|r| r.map_name == "Ravillion" && r.difficulty == "INSANE")
            .unwrap();
        assert_eq!(ravillion.points, 34);
        assert_eq!(ravillion.status, MapStatus::Incomplete);
        assert!(tables.summaries.is_empty());
    }
}
