use tracing::{debug, info, instrument};

use super::{models::Player, names::parse_runner_names, repository::PlayerRepository};
use crate::shared::AppError;

/// Credits `score` and one completed map to every runner named in `raw_names`.
///
/// Unknown names get a fresh player row. The first failing write aborts the
/// whole attribution and is returned to the caller; the surrounding
/// transaction then discards any players already credited.
#[instrument(skip(repo))]
pub async fn attribute_score<R>(
    repo: &mut R,
    raw_names: &str,
    score: i32,
) -> Result<usize, AppError>
where
    R: PlayerRepository + ?Sized,
{
    if raw_names.is_empty() || score <= 0 {
        debug!("Nothing to attribute");
        return Ok(0);
    }

    let names = parse_runner_names(raw_names);
    for name in &names {
        match repo.find_player(name).await? {
            Some(mut player) => {
                player.credit(score);
                repo.upsert_player(&player).await?;
                debug!(
                    player = %name,
                    total = player.score_contribution,
                    "Credited existing player"
                );
            }
            None => {
                repo.upsert_player(&Player::first_attribution(name, score))
                    .await?;
                debug!(player = %name, "Created player from attribution");
            }
        }
    }

    info!(credited = names.len(), score, "Score attributed");
    Ok(names.len())
}
