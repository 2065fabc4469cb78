// MVP ranking, league-wide and per-team.
//
// Every player with at least one season game scores
// `ppg * 1.0 + rpg * 0.8 + apg * 1.2`; the league-wide variant adds
// `0.1 * season_wins` of the player's team. Sorting is stable, so ties keep
// first-seen order.

use std::collections::HashMap;

use anyhow::Result;

use crate::db::Database;
use crate::model::{MvpCandidate, Player};

const PPG_WEIGHT: f64 = 1.0;
const RPG_WEIGHT: f64 = 0.8;
const APG_WEIGHT: f64 = 1.2;
const WIN_BONUS: f64 = 0.1;

fn base_score(player: &Player) -> f64 {
    player.season_ppg * PPG_WEIGHT
        + player.season_rpg * RPG_WEIGHT
        + player.season_apg * APG_WEIGHT
}

fn candidate(player: &Player, mvp_score: f64) -> MvpCandidate {
    MvpCandidate {
        player_id: player.player_id,
        name: player.full_name(),
        team_id: player.team_id,
        ppg: player.season_ppg,
        rpg: player.season_rpg,
        apg: player.season_apg,
        games_played: player.season_games,
        mvp_score,
    }
}

fn rank(mut candidates: Vec<MvpCandidate>) -> Vec<MvpCandidate> {
    candidates.sort_by(|a, b| {
        b.mvp_score
            .partial_cmp(&a.mvp_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// League-wide MVP ranking: all eligible players, best first, with the
/// team-wins bonus folded in. Empty when no season games have been played.
pub fn league_mvp(db: &Database) -> Result<Vec<MvpCandidate>> {
    let players = db.players_with_season_games()?;
    let team_wins: HashMap<i64, i64> = db
        .all_teams()?
        .into_iter()
        .map(|team| (team.team_id, team.season_wins))
        .collect();

    let candidates = players
        .iter()
        .map(|player| {
            let wins = team_wins.get(&player.team_id).copied().unwrap_or(0);
            candidate(player, base_score(player) + WIN_BONUS * wins as f64)
        })
        .collect();
    Ok(rank(candidates))
}

/// One team's MVP ranking. No win bonus — it would be a constant offset
/// within the team.
pub fn team_mvp(db: &Database, team_id: i64) -> Result<Vec<MvpCandidate>> {
    let candidates = db
        .players_by_team(team_id)?
        .iter()
        .filter(|player| player.season_games > 0)
        .map(|player| candidate(player, base_score(player)))
        .collect();
    Ok(rank(candidates))
}
