// Season progression: replays a schedule through the game simulator and
// maintains the tracked team's running aggregates.
//
// Each game's aggregate update commits before the next fixture runs, so a
// mid-season failure keeps all previously completed games' state intact.

use chrono::{Datelike, Local};
use rand::Rng;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::model::{BoxScore, Fixture, GameResult, SeasonContext};
use crate::sim::game::{GameRequest, GameSimulator, STARTERS_PER_TEAM};
use crate::sim::SimError;

/// Drives a full season for one tracked team.
pub struct SeasonRunner<'a> {
    db: &'a Database,
    roster_size: usize,
    randomness_factor: f64,
    favorite_boost: f64,
}

impl<'a> SeasonRunner<'a> {
    pub fn new(db: &'a Database, config: &Config) -> Self {
        Self {
            db,
            roster_size: config.season.roster_size,
            randomness_factor: config.sim.randomness_factor,
            favorite_boost: config.sim.favorite_boost,
        }
    }

    /// Zero the tracked team's season counters and all of its players'
    /// running season figures. Run before a new season.
    pub fn reset_season(&self, team_id: i64) -> Result<(), SimError> {
        if self.db.team(team_id)?.is_none() {
            return Err(SimError::TeamNotFound(team_id));
        }
        self.db.reset_season_stats(team_id)?;
        info!(team_id, "season counters reset");
        Ok(())
    }

    /// Replay `schedule` game by game, updating the tracked team's win/loss
    /// counters and its players' running season averages after every game.
    ///
    /// Sides are the top scorers of each team (up to `roster_size`, first
    /// five start); a fixture where either side cannot field five players is
    /// skipped with a warning. The favored-team boost applies to whichever
    /// side the tracked team occupies. A game failure aborts the loop;
    /// games already committed stand.
    pub fn run_season<R: Rng>(
        &self,
        team_id: i64,
        schedule: &[Fixture],
        rng: &mut R,
    ) -> Result<Vec<GameResult>, SimError> {
        let season_id = Local::now().year() as i64;
        let simulator = GameSimulator::new(self.db, self.randomness_factor);
        let mut results = Vec::with_capacity(schedule.len());

        for fixture in schedule {
            let home_players = self
                .db
                .top_players_by_team(fixture.home_team_id, self.roster_size)?;
            let away_players = self
                .db
                .top_players_by_team(fixture.away_team_id, self.roster_size)?;
            if home_players.len() < STARTERS_PER_TEAM || away_players.len() < STARTERS_PER_TEAM {
                warn!(
                    home_team = fixture.home_team_id,
                    away_team = fixture.away_team_id,
                    "skipping fixture: a side cannot field five players"
                );
                continue;
            }

            let arena = self
                .db
                .team(fixture.home_team_id)?
                .map(|team| team.arena)
                .unwrap_or_else(|| "Home Arena".to_string());

            let tracked_is_home = fixture.home_team_id == team_id;
            let tracked_is_away = fixture.away_team_id == team_id;
            let request = GameRequest {
                home_player_ids: home_players.iter().map(|p| p.player_id).collect(),
                away_player_ids: away_players.iter().map(|p| p.player_id).collect(),
                arena,
                resimulate_id: None,
                season: Some(SeasonContext { season_id }),
                home_boost: if tracked_is_home {
                    self.favorite_boost
                } else {
                    1.0
                },
                away_boost: if tracked_is_away {
                    self.favorite_boost
                } else {
                    1.0
                },
            };

            let result = simulator.simulate_game(&request, rng)?;

            if tracked_is_home || tracked_is_away {
                let (own, opponent) = if tracked_is_home {
                    (&result.home, &result.away)
                } else {
                    (&result.away, &result.home)
                };
                let won = own.score > opponent.score;
                let lines: Vec<(i64, BoxScore)> = own
                    .players
                    .iter()
                    .map(|(&player_id, &line)| (player_id, line))
                    .collect();
                self.db.apply_season_game(team_id, won, &lines)?;
            }

            results.push(result);
        }

        let win_rate = self.db.finalize_win_rate(team_id)?;
        info!(
            team_id,
            games = results.len(),
            win_rate,
            season_id,
            "season run complete"
        );
        Ok(results)
    }
}
