use std::sync::Arc;
use tracing::{debug, instrument};

use super::models::Player;
use crate::shared::AppError;
use crate::store::TrackerStore;

/// Service for read-only player queries
pub struct PlayerService {
    store: Arc<dyn TrackerStore>,
}

impl PlayerService {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    /// Players ranked by cumulative contribution
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> Result<Vec<Player>, AppError> {
        let mut tx = self.store.begin().await?;
        let players = tx.list_players().await?;
        tx.commit().await?;

        debug!(player_count = players.len(), "Leaderboard loaded");
        Ok(players)
    }

    /// Known player names for autocomplete
    #[instrument(skip(self))]
    pub async fn player_names(&self) -> Result<Vec<String>, AppError> {
        let mut tx = self.store.begin().await?;
        let names = tx.list_player_names().await?;
        tx.commit().await?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::ledger::attribute_score;
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn leaderboard_reflects_committed_attributions() {
        let store = Arc::new(InMemoryStore::new());
        let mut tx = store.begin().await.unwrap();
        attribute_score(tx.as_mut(), "Alice", 5).await.unwrap();
        attribute_score(tx.as_mut(), "Bob & Carol", 9).await.unwrap();
        tx.commit().await.unwrap();

        let service = PlayerService::new(store);
        let board = service.leaderboard().await.unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board[2].name, "Alice");

        let names = service.player_names().await.unwrap();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }
}
