// Game orchestration: roster validation, minute allocation, per-player
// performance simulation, and the single atomic write of the finished game.

use std::collections::HashMap;

use chrono::Local;
use rand::Rng;
use tracing::{debug, info};

use crate::db::Database;
use crate::model::{
    BoxScore, GameRecord, GameResult, LineupRow, Player, SeasonContext, StatRow, TeamGameResult,
};
use crate::sim::minutes::allocate_minutes;
use crate::sim::performance::simulate_performance;
use crate::sim::SimError;

/// Number of starters per side.
pub const STARTERS_PER_TEAM: usize = 5;

/// Inputs for one game simulation. The first five ids on each side are the
/// starters; anything beyond is bench. Boosts are multiplicative (1.0 = none)
/// and applied per side.
#[derive(Debug, Clone)]
pub struct GameRequest {
    pub home_player_ids: Vec<i64>,
    pub away_player_ids: Vec<i64>,
    pub arena: String,
    pub resimulate_id: Option<i64>,
    pub season: Option<SeasonContext>,
    pub home_boost: f64,
    pub away_boost: f64,
}

impl GameRequest {
    pub fn new(home_player_ids: Vec<i64>, away_player_ids: Vec<i64>, arena: &str) -> Self {
        Self {
            home_player_ids,
            away_player_ids,
            arena: arena.to_string(),
            resimulate_id: None,
            season: None,
            home_boost: 1.0,
            away_boost: 1.0,
        }
    }
}

/// Orchestrates one game: validates rosters, allocates minutes, runs the
/// performance model for every player who takes the floor, and commits the
/// whole game through one `write_game` transaction.
pub struct GameSimulator<'a> {
    db: &'a Database,
    randomness_factor: f64,
}

impl<'a> GameSimulator<'a> {
    pub fn new(db: &'a Database, randomness_factor: f64) -> Self {
        Self {
            db,
            randomness_factor,
        }
    }

    /// Simulate (or resimulate) one game.
    ///
    /// Fails with `InvalidLineup` before any write when a roster id does not
    /// resolve or a side has fewer than five players, and with `GameNotFound`
    /// when a resimulation target is absent. A persistence failure rolls the
    /// game's writes back and surfaces as `Persistence`.
    pub fn simulate_game<R: Rng>(
        &self,
        request: &GameRequest,
        rng: &mut R,
    ) -> Result<GameResult, SimError> {
        let (home_starters, home_bench) = self.resolve_side(&request.home_player_ids, "home")?;
        let (away_starters, away_bench) = self.resolve_side(&request.away_player_ids, "away")?;

        if let Some(game_id) = request.resimulate_id {
            if self.db.game(game_id)?.is_none() {
                return Err(SimError::GameNotFound(game_id));
            }
        }

        let now = Local::now().naive_local();
        let mut record = GameRecord {
            resimulate_of: request.resimulate_id,
            game_date: now.date(),
            game_time: now.time(),
            arena: request.arena.clone(),
            home_team_id: home_starters[0].team_id,
            away_team_id: away_starters[0].team_id,
            is_season_game: request.season.is_some(),
            season_id: request.season.map(|s| s.season_id),
            home_score: 0,
            away_score: 0,
            lineups: Vec::new(),
            stats: Vec::new(),
        };

        let home_players = self.simulate_side(
            &home_starters,
            &home_bench,
            true,
            request.home_boost,
            &mut record,
            rng,
        );
        let away_players = self.simulate_side(
            &away_starters,
            &away_bench,
            false,
            request.away_boost,
            &mut record,
            rng,
        );

        record.home_score = home_players.values().map(|line| line.points).sum();
        record.away_score = away_players.values().map(|line| line.points).sum();

        let game_id = self.db.write_game(&record)?;
        info!(
            game_id,
            home_team = record.home_team_id,
            away_team = record.away_team_id,
            home_score = record.home_score,
            away_score = record.away_score,
            resimulated = request.resimulate_id.is_some(),
            "game simulated"
        );

        Ok(GameResult {
            game_id,
            home: TeamGameResult {
                team_id: record.home_team_id,
                score: record.home_score,
                players: home_players,
            },
            away: TeamGameResult {
                team_id: record.away_team_id,
                score: record.away_score,
                players: away_players,
            },
        })
    }

    /// Resolve one side's ids into starters and bench. Every id must resolve;
    /// the side must carry at least five players (the starters).
    fn resolve_side(
        &self,
        player_ids: &[i64],
        side: &str,
    ) -> Result<(Vec<Player>, Vec<Player>), SimError> {
        let mut players = Vec::with_capacity(player_ids.len());
        for &player_id in player_ids {
            match self.db.player(player_id)? {
                Some(player) => players.push(player),
                None => {
                    return Err(SimError::InvalidLineup(format!(
                        "{side} roster references unknown player {player_id}"
                    )))
                }
            }
        }
        if players.len() < STARTERS_PER_TEAM {
            return Err(SimError::InvalidLineup(format!(
                "{side} roster needs {STARTERS_PER_TEAM} starters, got {}",
                players.len()
            )));
        }
        let bench = players.split_off(STARTERS_PER_TEAM);
        Ok((players, bench))
    }

    /// Allocate minutes for one side and simulate everyone who plays.
    /// Players allocated zero minutes get neither a lineup entry nor a stat
    /// row.
    fn simulate_side<R: Rng>(
        &self,
        starters: &[Player],
        bench: &[Player],
        is_home: bool,
        boost: f64,
        record: &mut GameRecord,
        rng: &mut R,
    ) -> HashMap<i64, BoxScore> {
        let starter_ids: Vec<i64> = starters.iter().map(|p| p.player_id).collect();
        let bench_ids: Vec<i64> = bench.iter().map(|p| p.player_id).collect();
        let allocation = allocate_minutes(&starter_ids, &bench_ids, rng);

        let mut lines = HashMap::with_capacity(starters.len() + bench.len());
        for (slot, player) in starters.iter().chain(bench.iter()).enumerate() {
            let is_starter = slot < starters.len();
            let minutes = allocation
                .get(&player.player_id)
                .copied()
                .unwrap_or_default();
            if minutes <= 0.0 {
                debug!(player_id = player.player_id, "skipping zero-minute player");
                continue;
            }

            record.lineups.push(LineupRow {
                team_id: player.team_id,
                player_id: player.player_id,
                is_starter,
                minutes_played: minutes,
            });

            let line = simulate_performance(
                &player.averages,
                minutes,
                is_starter,
                is_home,
                self.randomness_factor,
                boost,
                rng,
            );
            record.stats.push(StatRow {
                player_id: player.player_id,
                line,
            });
            lines.insert(player.player_id, line);
        }
        lines
    }
}
