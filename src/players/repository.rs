use async_trait::async_trait;
use std::cmp::Ordering;
use tracing::{debug, instrument, warn};

use super::models::Player;
use crate::shared::AppError;
use crate::store::{db_error, MemoryTx, PgTx};

/// Trait for player repository operations
#[async_trait]
pub trait PlayerRepository: Send {
    async fn find_player(&mut self, name: &str) -> Result<Option<Player>, AppError>;

    /// Inserts the player when its id is 0, otherwise updates it in place
    async fn upsert_player(&mut self, player: &Player) -> Result<Player, AppError>;

    /// All players, largest contribution first
    async fn list_players(&mut self) -> Result<Vec<Player>, AppError>;

    /// Distinct player names in ascending order
    async fn list_player_names(&mut self) -> Result<Vec<String>, AppError>;
}

#[async_trait]
impl PlayerRepository for MemoryTx {
    #[instrument(skip(self))]
    async fn find_player(&mut self, name: &str) -> Result<Option<Player>, AppError> {
        let player = self
            .working
            .players
            .iter()
            .find(|p| p.name == name)
            .cloned();
        debug!(found = player.is_some(), "Looked up player in memory");
        Ok(player)
    }

    #[instrument(skip(self, player), fields(name = %player.name))]
    async fn upsert_player(&mut self, player: &Player) -> Result<Player, AppError> {
        if player.id == 0 {
            if self.working.players.iter().any(|p| p.name == player.name) {
                warn!("Player already exists in memory");
                return Err(AppError::DatabaseError(
                    "Player already exists".to_string(),
                ));
            }
            let mut stored = player.clone();
            stored.id = self.working.next_id();
            self.working.players.push(stored.clone());
            debug!(player_id = stored.id, "Player created in memory");
            return Ok(stored);
        }

        match self.working.players.iter_mut().find(|p| p.id == player.id) {
            Some(stored) => {
                *stored = player.clone();
                debug!(player_id = player.id, "Player updated in memory");
                Ok(player.clone())
            }
            None => {
                warn!(player_id = player.id, "Player not found for update in memory");
                Err(AppError::NotFound("Player not found".to_string()))
            }
        }
    }

    async fn list_players(&mut self) -> Result<Vec<Player>, AppError> {
        let mut players = self.working.players.clone();
        players.sort_by(|a, b| {
            b.score_contribution
                .partial_cmp(&a.score_contribution)
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        Ok(players)
    }

    async fn list_player_names(&mut self) -> Result<Vec<String>, AppError> {
        let mut names: Vec<String> = self
            .working
            .players
            .iter()
            .map(|p| p.name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

#[async_trait]
impl PlayerRepository for PgTx {
    #[instrument(skip(self))]
    async fn find_player(&mut self, name: &str) -> Result<Option<Player>, AppError> {
        sqlx::query_as::<_, Player>(
            "SELECT id, name, role, score_contribution, map_count, contribution_rate \
             FROM players WHERE name = $1 FOR UPDATE",
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("find player"))
    }

    #[instrument(skip(self, player), fields(name = %player.name))]
    async fn upsert_player(&mut self, player: &Player) -> Result<Player, AppError> {
        if player.id == 0 {
            let stored = sqlx::query_as::<_, Player>(
                "INSERT INTO players (name, role, score_contribution, map_count, contribution_rate) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id, name, role, score_contribution, map_count, contribution_rate",
            )
            .bind(&player.name)
            .bind(&player.role)
            .bind(player.score_contribution)
            .bind(player.map_count)
            .bind(player.contribution_rate)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(db_error("insert player"))?;

            debug!(player_id = stored.id, "Player created in database");
            return Ok(stored);
        }

        let result = sqlx::query(
            "UPDATE players SET name = $2, role = $3, score_contribution = $4, map_count = $5, \
             contribution_rate = $6 WHERE id = $1",
        )
        .bind(player.id)
        .bind(&player.name)
        .bind(&player.role)
        .bind(player.score_contribution)
        .bind(player.map_count)
        .bind(player.contribution_rate)
        .execute(&mut *self.tx)
        .await
        .map_err(db_error("update player"))?;

        if result.rows_affected() == 0 {
            warn!(player_id = player.id, "Player not found for update");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        debug!(player_id = player.id, "Player updated in database");
        Ok(player.clone())
    }

    async fn list_players(&mut self) -> Result<Vec<Player>, AppError> {
        sqlx::query_as::<_, Player>(
            "SELECT id, name, role, score_contribution, map_count, contribution_rate \
             FROM players ORDER BY score_contribution DESC, id ASC",
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("list players"))
    }

    async fn list_player_names(&mut self) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT name FROM players ORDER BY name ASC")
            .fetch_all(&mut *self.tx)
            .await
            .map_err(db_error("list player names"))
    }
}
