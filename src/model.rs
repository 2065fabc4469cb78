// Plain-data entity views over the persistence layer.
//
// Entities are fetched once as owned values, mutated locally, and written
// back through explicit `db` calls. Nothing here holds a connection or a
// lazily-loaded relationship.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Teams and players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
    pub city: String,
    pub conference: String,
    pub division: String,
    /// Cached `season_wins / (season_wins + season_losses)`; 0 before any
    /// completed game.
    pub win_rate: f64,
    pub avg_points: f64,
    pub season_wins: i64,
    pub season_losses: i64,
    pub arena: String,
}

impl Team {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.city, self.team_name)
    }
}

/// A player's per-game season averages, the inputs to the performance model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerAverages {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub fouls: f64,
    pub fg_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub jersey_number: i64,
    pub team_id: i64,
    pub averages: PlayerAverages,
    /// Running season means, maintained as an explicit (mean, count) pair:
    /// the three per-game figures below together with `season_games`.
    pub season_ppg: f64,
    pub season_rpg: f64,
    pub season_apg: f64,
    pub season_games: i64,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub game_time: NaiveTime,
    pub resimulated: bool,
    /// `None` until the simulation completes; afterwards the sum of that
    /// side's player points for this game.
    pub home_team_score: Option<i64>,
    pub away_team_score: Option<i64>,
    pub arena: String,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub is_season_game: bool,
    pub season_id: Option<i64>,
}

/// One roster slot for one completed game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupEntry {
    pub game_id: i64,
    pub team_id: i64,
    pub player_id: i64,
    pub is_starter: bool,
    pub minutes_played: f64,
}

/// One player's box score for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxScore {
    pub points: i64,
    pub rebounds: i64,
    pub assists: i64,
    pub steals: i64,
    pub blocks: i64,
    pub turnovers: i64,
    pub fouls: i64,
    pub fgm: i64,
    pub fga: i64,
    pub minutes_played: f64,
}

// ---------------------------------------------------------------------------
// Simulation inputs / outputs
// ---------------------------------------------------------------------------

/// Season tag attached to games produced by the season loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeasonContext {
    pub season_id: i64,
}

/// One scheduled matchup. The tracked team occupies one of the two slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub home_team_id: i64,
    pub away_team_id: i64,
}

/// Everything the orchestrator produced for one side of a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamGameResult {
    pub team_id: i64,
    pub score: i64,
    /// Box scores keyed by player id; players allocated zero minutes are
    /// absent.
    pub players: HashMap<i64, BoxScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: i64,
    pub home: TeamGameResult,
    pub away: TeamGameResult,
}

/// The complete set of rows for one game, assembled in memory and committed
/// through a single `Database::write_game` transaction.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// `Some(id)` reuses an existing game's identity, discarding its prior
    /// lineup/stat children.
    pub resimulate_of: Option<i64>,
    pub game_date: NaiveDate,
    pub game_time: NaiveTime,
    pub arena: String,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub is_season_game: bool,
    pub season_id: Option<i64>,
    pub home_score: i64,
    pub away_score: i64,
    pub lineups: Vec<LineupRow>,
    pub stats: Vec<StatRow>,
}

#[derive(Debug, Clone)]
pub struct LineupRow {
    pub team_id: i64,
    pub player_id: i64,
    pub is_starter: bool,
    pub minutes_played: f64,
}

#[derive(Debug, Clone)]
pub struct StatRow {
    pub player_id: i64,
    pub line: BoxScore,
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// One team's line in the standings table. Wins and losses are recomputed
/// from game history, while `win_rate` is the cached season counter ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team_id: i64,
    pub name: String,
    pub wins: i64,
    pub losses: i64,
    pub win_rate: f64,
    pub games_played: i64,
    pub avg_points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MvpCandidate {
    pub player_id: i64,
    pub name: String,
    pub team_id: i64,
    pub ppg: f64,
    pub rpg: f64,
    pub apg: f64,
    pub games_played: i64,
    pub mvp_score: f64,
}

/// Home/away split inside a team summary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VenueRecord {
    pub games: i64,
    pub avg_points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStatsSummary {
    pub team_name: String,
    pub games_played: i64,
    pub avg_points: f64,
    pub max_points: i64,
    pub home_record: VenueRecord,
    pub away_record: VenueRecord,
}
