// SQLite persistence layer for teams, players, games, lineups, and per-game
// player statistics.
//
// The simulation core fetches entities as plain values and writes results
// back through explicit calls here. Every game's rows are committed in one
// transaction; season aggregates are updated under the same connection lock,
// which serializes concurrent read-modify-write sequences on shared
// team/player counters.

use std::sync::{Mutex, MutexGuard};

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, Row};

use crate::model::{
    BoxScore, Game, GameRecord, LineupEntry, Player, PlayerAverages, StatRow, Team,
    TeamStatsSummary, VenueRecord,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// SQLite-backed store for the league. Pass `":memory:"` for an ephemeral
/// database (useful for tests).
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database at `path` and ensure all tables exist.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS teams (
                team_id       INTEGER PRIMARY KEY AUTOINCREMENT,
                team_name     TEXT NOT NULL,
                city          TEXT NOT NULL,
                conference    TEXT NOT NULL,
                division      TEXT NOT NULL,
                win_rate      REAL NOT NULL DEFAULT 0.0,
                avg_points    REAL NOT NULL DEFAULT 0.0,
                season_wins   INTEGER NOT NULL DEFAULT 0,
                season_losses INTEGER NOT NULL DEFAULT 0,
                arena         TEXT NOT NULL,
                UNIQUE(city, team_name)
            );

            CREATE TABLE IF NOT EXISTS players (
                player_id     INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name    TEXT NOT NULL,
                last_name     TEXT NOT NULL,
                position      TEXT NOT NULL,
                jersey_number INTEGER NOT NULL DEFAULT 0,
                team_id       INTEGER NOT NULL REFERENCES teams(team_id),
                avg_points    REAL NOT NULL DEFAULT 0.0,
                avg_rebounds  REAL NOT NULL DEFAULT 0.0,
                avg_assists   REAL NOT NULL DEFAULT 0.0,
                avg_steals    REAL NOT NULL DEFAULT 0.0,
                avg_blocks    REAL NOT NULL DEFAULT 0.0,
                avg_turnovers REAL NOT NULL DEFAULT 0.0,
                avg_fouls     REAL NOT NULL DEFAULT 0.0,
                fg_percentage REAL NOT NULL DEFAULT 0.0,
                season_ppg    REAL NOT NULL DEFAULT 0.0,
                season_rpg    REAL NOT NULL DEFAULT 0.0,
                season_apg    REAL NOT NULL DEFAULT 0.0,
                season_games  INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS games (
                game_id         INTEGER PRIMARY KEY AUTOINCREMENT,
                game_date       TEXT NOT NULL,
                game_time       TEXT NOT NULL,
                resimulated     INTEGER NOT NULL DEFAULT 0,
                home_team_score INTEGER,
                away_team_score INTEGER,
                arena           TEXT NOT NULL,
                home_team_id    INTEGER NOT NULL REFERENCES teams(team_id),
                away_team_id    INTEGER NOT NULL REFERENCES teams(team_id),
                is_season_game  INTEGER NOT NULL DEFAULT 0,
                season_id       INTEGER
            );

            CREATE TABLE IF NOT EXISTS game_lineups (
                lineup_id      INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id        INTEGER NOT NULL REFERENCES games(game_id),
                team_id        INTEGER NOT NULL REFERENCES teams(team_id),
                player_id      INTEGER NOT NULL REFERENCES players(player_id),
                is_starter     INTEGER NOT NULL,
                minutes_played REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS player_game_stats (
                stat_id        INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id        INTEGER NOT NULL REFERENCES games(game_id),
                player_id      INTEGER NOT NULL REFERENCES players(player_id),
                points         INTEGER NOT NULL,
                rebounds       INTEGER NOT NULL,
                assists        INTEGER NOT NULL,
                steals         INTEGER NOT NULL,
                blocks         INTEGER NOT NULL,
                turnovers      INTEGER NOT NULL,
                fouls          INTEGER NOT NULL,
                fgm            INTEGER NOT NULL,
                fga            INTEGER NOT NULL,
                minutes_played REAL NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);
            CREATE INDEX IF NOT EXISTS idx_games_home ON games(home_team_id);
            CREATE INDEX IF NOT EXISTS idx_games_away ON games(away_team_id);
            CREATE INDEX IF NOT EXISTS idx_lineups_game ON game_lineups(game_id);
            CREATE INDEX IF NOT EXISTS idx_stats_game ON player_game_stats(game_id);
            CREATE INDEX IF NOT EXISTS idx_stats_player ON player_game_stats(player_id);
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    // ------------------------------------------------------------------
    // Teams
    // ------------------------------------------------------------------

    /// Insert a team with zeroed season counters; returns its row id.
    pub fn insert_team(
        &self,
        team_name: &str,
        city: &str,
        conference: &str,
        division: &str,
        arena: &str,
    ) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO teams (team_name, city, conference, division, arena)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![team_name, city, conference, division, arena],
        )
        .context("failed to insert team")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn team(&self, team_id: i64) -> Result<Option<Team>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT team_id, team_name, city, conference, division, win_rate,
                        avg_points, season_wins, season_losses, arena
                 FROM teams WHERE team_id = ?1",
            )
            .context("failed to prepare team query")?;
        let team = stmt
            .query_row(params![team_id], team_from_row)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })
            .context("failed to query team")?;
        Ok(team)
    }

    pub fn all_teams(&self) -> Result<Vec<Team>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT team_id, team_name, city, conference, division, win_rate,
                        avg_points, season_wins, season_losses, arena
                 FROM teams ORDER BY team_id",
            )
            .context("failed to prepare teams query")?;
        let teams = stmt
            .query_map([], team_from_row)
            .context("failed to query teams")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map team rows")?;
        Ok(teams)
    }

    pub fn team_count(&self) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM teams", [], |row| row.get(0))
            .context("failed to count teams")?;
        Ok(count as usize)
    }

    /// Overwrite a team's derived record fields (history-scan refresh).
    pub fn update_team_record(&self, team_id: i64, win_rate: f64, avg_points: f64) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "UPDATE teams SET win_rate = ?1, avg_points = ?2 WHERE team_id = ?3",
            params![win_rate, avg_points, team_id],
        )
        .context("failed to update team record")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    /// Insert a player with zeroed season counters; returns the row id.
    pub fn insert_player(
        &self,
        team_id: i64,
        first_name: &str,
        last_name: &str,
        position: &str,
        jersey_number: i64,
        averages: &PlayerAverages,
    ) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO players
                (team_id, first_name, last_name, position, jersey_number,
                 avg_points, avg_rebounds, avg_assists, avg_steals, avg_blocks,
                 avg_turnovers, avg_fouls, fg_percentage)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                team_id,
                first_name,
                last_name,
                position,
                jersey_number,
                averages.points,
                averages.rebounds,
                averages.assists,
                averages.steals,
                averages.blocks,
                averages.turnovers,
                averages.fouls,
                averages.fg_percentage,
            ],
        )
        .context("failed to insert player")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn player(&self, player_id: i64) -> Result<Option<Player>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = ?1"
            ))
            .context("failed to prepare player query")?;
        let player = stmt
            .query_row(params![player_id], player_from_row)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })
            .context("failed to query player")?;
        Ok(player)
    }

    /// All of a team's players, best scorers first.
    pub fn players_by_team(&self, team_id: i64) -> Result<Vec<Player>> {
        self.players_by_team_query(team_id, None)
    }

    /// The top `limit` scorers on a team, used to pick an active roster.
    pub fn top_players_by_team(&self, team_id: i64, limit: usize) -> Result<Vec<Player>> {
        self.players_by_team_query(team_id, Some(limit))
    }

    fn players_by_team_query(&self, team_id: i64, limit: Option<usize>) -> Result<Vec<Player>> {
        let conn = self.conn();
        let sql = match limit {
            Some(n) => format!(
                "SELECT {PLAYER_COLUMNS} FROM players WHERE team_id = ?1
                 ORDER BY avg_points DESC LIMIT {n}"
            ),
            None => format!(
                "SELECT {PLAYER_COLUMNS} FROM players WHERE team_id = ?1
                 ORDER BY avg_points DESC"
            ),
        };
        let mut stmt = conn
            .prepare(&sql)
            .context("failed to prepare team players query")?;
        let players = stmt
            .query_map(params![team_id], player_from_row)
            .context("failed to query team players")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map player rows")?;
        Ok(players)
    }

    /// Players with at least one recorded season game (MVP eligibility).
    pub fn players_with_season_games(&self) -> Result<Vec<Player>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {PLAYER_COLUMNS} FROM players WHERE season_games > 0
                 ORDER BY player_id"
            ))
            .context("failed to prepare eligible players query")?;
        let players = stmt
            .query_map([], player_from_row)
            .context("failed to query eligible players")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map player rows")?;
        Ok(players)
    }

    // ------------------------------------------------------------------
    // Games
    // ------------------------------------------------------------------

    pub fn game(&self, game_id: i64) -> Result<Option<Game>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {GAME_COLUMNS} FROM games WHERE game_id = ?1"
            ))
            .context("failed to prepare game query")?;
        let game = stmt
            .query_row(params![game_id], game_from_row)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })
            .context("failed to query game")?;
        Ok(game)
    }

    pub fn game_count(&self) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
            .context("failed to count games")?;
        Ok(count as usize)
    }

    /// Every game a team was part of, home or away, oldest first.
    pub fn games_for_team(&self, team_id: i64) -> Result<Vec<Game>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {GAME_COLUMNS} FROM games
                 WHERE home_team_id = ?1 OR away_team_id = ?1
                 ORDER BY game_id"
            ))
            .context("failed to prepare team games query")?;
        let games = stmt
            .query_map(params![team_id], game_from_row)
            .context("failed to query team games")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map game rows")?;
        Ok(games)
    }

    /// Commit one game's full row set atomically: game upsert, lineup and
    /// stat children, final scores. On resimulation the existing game keeps
    /// its identity and all prior children are discarded. Any failure rolls
    /// the whole game back.
    pub fn write_game(&self, record: &GameRecord) -> Result<i64> {
        let mut conn = self.conn();
        let tx = conn
            .transaction()
            .context("failed to begin game transaction")?;

        let date = record.game_date.format(DATE_FORMAT).to_string();
        let time = record.game_time.format(TIME_FORMAT).to_string();

        let game_id = match record.resimulate_of {
            Some(game_id) => {
                let updated = tx
                    .execute(
                        "UPDATE games
                         SET resimulated = 1, game_date = ?1, game_time = ?2, arena = ?3
                         WHERE game_id = ?4",
                        params![date, time, record.arena, game_id],
                    )
                    .context("failed to mark game resimulated")?;
                if updated == 0 {
                    bail!("game {game_id} not found for resimulation");
                }
                tx.execute(
                    "DELETE FROM game_lineups WHERE game_id = ?1",
                    params![game_id],
                )
                .context("failed to delete prior lineups")?;
                tx.execute(
                    "DELETE FROM player_game_stats WHERE game_id = ?1",
                    params![game_id],
                )
                .context("failed to delete prior stats")?;
                game_id
            }
            None => {
                tx.execute(
                    "INSERT INTO games
                        (game_date, game_time, resimulated, arena,
                         home_team_id, away_team_id, is_season_game, season_id)
                     VALUES (?1, ?2, 0, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        date,
                        time,
                        record.arena,
                        record.home_team_id,
                        record.away_team_id,
                        record.is_season_game,
                        record.season_id,
                    ],
                )
                .context("failed to insert game")?;
                tx.last_insert_rowid()
            }
        };

        for lineup in &record.lineups {
            tx.execute(
                "INSERT INTO game_lineups
                    (game_id, team_id, player_id, is_starter, minutes_played)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    game_id,
                    lineup.team_id,
                    lineup.player_id,
                    lineup.is_starter,
                    lineup.minutes_played,
                ],
            )
            .context("failed to insert lineup entry")?;
        }

        for stat in &record.stats {
            let line = &stat.line;
            tx.execute(
                "INSERT INTO player_game_stats
                    (game_id, player_id, points, rebounds, assists, steals,
                     blocks, turnovers, fouls, fgm, fga, minutes_played)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    game_id,
                    stat.player_id,
                    line.points,
                    line.rebounds,
                    line.assists,
                    line.steals,
                    line.blocks,
                    line.turnovers,
                    line.fouls,
                    line.fgm,
                    line.fga,
                    line.minutes_played,
                ],
            )
            .context("failed to insert stat line")?;
        }

        tx.execute(
            "UPDATE games SET home_team_score = ?1, away_team_score = ?2 WHERE game_id = ?3",
            params![record.home_score, record.away_score, game_id],
        )
        .context("failed to set final score")?;

        tx.commit().context("failed to commit game")?;
        Ok(game_id)
    }

    pub fn lineups_for_game(&self, game_id: i64) -> Result<Vec<LineupEntry>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT game_id, team_id, player_id, is_starter, minutes_played
                 FROM game_lineups WHERE game_id = ?1 ORDER BY lineup_id",
            )
            .context("failed to prepare lineups query")?;
        let lineups = stmt
            .query_map(params![game_id], |row| {
                Ok(LineupEntry {
                    game_id: row.get(0)?,
                    team_id: row.get(1)?,
                    player_id: row.get(2)?,
                    is_starter: row.get(3)?,
                    minutes_played: row.get(4)?,
                })
            })
            .context("failed to query lineups")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map lineup rows")?;
        Ok(lineups)
    }

    pub fn stat_lines_for_game(&self, game_id: i64) -> Result<Vec<StatRow>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT player_id, {STAT_COLUMNS} FROM player_game_stats
                 WHERE game_id = ?1 ORDER BY stat_id"
            ))
            .context("failed to prepare game stats query")?;
        let stats = stmt
            .query_map(params![game_id], |row| {
                Ok(StatRow {
                    player_id: row.get(0)?,
                    line: box_score_from_row(row, 1)?,
                })
            })
            .context("failed to query game stats")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map stat rows")?;
        Ok(stats)
    }

    /// All of a player's recorded game lines, oldest first.
    pub fn stat_lines_for_player(&self, player_id: i64) -> Result<Vec<BoxScore>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {STAT_COLUMNS} FROM player_game_stats
                 WHERE player_id = ?1 ORDER BY stat_id"
            ))
            .context("failed to prepare player stats query")?;
        let stats = stmt
            .query_map(params![player_id], |row| box_score_from_row(row, 0))
            .context("failed to query player stats")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map stat rows")?;
        Ok(stats)
    }

    // ------------------------------------------------------------------
    // Season aggregates
    // ------------------------------------------------------------------

    /// Zero a team's season counters and every one of its players' running
    /// season figures, in one transaction.
    pub fn reset_season_stats(&self, team_id: i64) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn
            .transaction()
            .context("failed to begin season reset transaction")?;
        tx.execute(
            "UPDATE teams
             SET season_wins = 0, season_losses = 0, win_rate = 0.0, avg_points = 0.0
             WHERE team_id = ?1",
            params![team_id],
        )
        .context("failed to reset team season counters")?;
        tx.execute(
            "UPDATE players
             SET season_ppg = 0.0, season_rpg = 0.0, season_apg = 0.0, season_games = 0
             WHERE team_id = ?1",
            params![team_id],
        )
        .context("failed to reset player season counters")?;
        tx.commit().context("failed to commit season reset")?;
        Ok(())
    }

    /// Record one season game's outcome for the tracked team: bump the
    /// win/loss counter and fold each listed player's line into their running
    /// `(mean, count)` season averages. One transaction, so a mid-season
    /// failure never leaves a half-applied game.
    pub fn apply_season_game(
        &self,
        team_id: i64,
        won: bool,
        player_lines: &[(i64, BoxScore)],
    ) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn
            .transaction()
            .context("failed to begin season game transaction")?;

        let sql = if won {
            "UPDATE teams SET season_wins = season_wins + 1 WHERE team_id = ?1"
        } else {
            "UPDATE teams SET season_losses = season_losses + 1 WHERE team_id = ?1"
        };
        tx.execute(sql, params![team_id])
            .context("failed to update team season record")?;

        for &(player_id, line) in player_lines {
            let (ppg, rpg, apg, games): (f64, f64, f64, i64) = tx
                .query_row(
                    "SELECT season_ppg, season_rpg, season_apg, season_games
                     FROM players WHERE player_id = ?1",
                    params![player_id],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
                )
                .context("failed to read player season averages")?;

            let played = games + 1;
            let new_ppg = (ppg * games as f64 + line.points as f64) / played as f64;
            let new_rpg = (rpg * games as f64 + line.rebounds as f64) / played as f64;
            let new_apg = (apg * games as f64 + line.assists as f64) / played as f64;

            tx.execute(
                "UPDATE players
                 SET season_ppg = ?1, season_rpg = ?2, season_apg = ?3, season_games = ?4
                 WHERE player_id = ?5",
                params![new_ppg, new_rpg, new_apg, played, player_id],
            )
            .context("failed to update player season averages")?;
        }

        tx.commit().context("failed to commit season game")?;
        Ok(())
    }

    /// Recompute and store a team's win rate from its season counters.
    /// Returns the stored rate (0 when no games completed).
    pub fn finalize_win_rate(&self, team_id: i64) -> Result<f64> {
        let conn = self.conn();
        let (wins, losses): (i64, i64) = conn
            .query_row(
                "SELECT season_wins, season_losses FROM teams WHERE team_id = ?1",
                params![team_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .context("failed to read team season counters")?;
        let total = wins + losses;
        let win_rate = if total > 0 {
            wins as f64 / total as f64
        } else {
            0.0
        };
        conn.execute(
            "UPDATE teams SET win_rate = ?1 WHERE team_id = ?2",
            params![win_rate, team_id],
        )
        .context("failed to store win rate")?;
        Ok(win_rate)
    }

    // ------------------------------------------------------------------
    // Team summaries
    // ------------------------------------------------------------------

    /// Aggregate home/away scoring summary for one team, or `None` if the
    /// team does not exist. Only completed games (non-null scores) count.
    pub fn team_stats(&self, team_id: i64) -> Result<Option<TeamStatsSummary>> {
        let Some(team) = self.team(team_id)? else {
            return Ok(None);
        };

        let conn = self.conn();
        let home: (Option<f64>, Option<i64>, i64) = conn
            .query_row(
                "SELECT AVG(home_team_score), MAX(home_team_score), COUNT(*)
                 FROM games WHERE home_team_id = ?1 AND home_team_score IS NOT NULL",
                params![team_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .context("failed to aggregate home games")?;
        let away: (Option<f64>, Option<i64>, i64) = conn
            .query_row(
                "SELECT AVG(away_team_score), MAX(away_team_score), COUNT(*)
                 FROM games WHERE away_team_id = ?1 AND away_team_score IS NOT NULL",
                params![team_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .context("failed to aggregate away games")?;

        let (home_avg, home_max, home_games) = home;
        let (away_avg, away_max, away_games) = away;
        let total_games = home_games + away_games;
        let avg_points = if total_games > 0 {
            (home_avg.unwrap_or(0.0) * home_games as f64
                + away_avg.unwrap_or(0.0) * away_games as f64)
                / total_games as f64
        } else {
            0.0
        };

        Ok(Some(TeamStatsSummary {
            team_name: team.full_name(),
            games_played: total_games,
            avg_points: (avg_points * 10.0).round() / 10.0,
            max_points: home_max.unwrap_or(0).max(away_max.unwrap_or(0)),
            home_record: VenueRecord {
                games: home_games,
                avg_points: (home_avg.unwrap_or(0.0) * 10.0).round() / 10.0,
            },
            away_record: VenueRecord {
                games: away_games,
                avg_points: (away_avg.unwrap_or(0.0) * 10.0).round() / 10.0,
            },
        }))
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

const PLAYER_COLUMNS: &str = "player_id, first_name, last_name, position, jersey_number, \
     team_id, avg_points, avg_rebounds, avg_assists, avg_steals, avg_blocks, \
     avg_turnovers, avg_fouls, fg_percentage, season_ppg, season_rpg, season_apg, \
     season_games";

const GAME_COLUMNS: &str = "game_id, game_date, game_time, resimulated, home_team_score, \
     away_team_score, arena, home_team_id, away_team_id, is_season_game, season_id";

const STAT_COLUMNS: &str = "points, rebounds, assists, steals, blocks, turnovers, fouls, \
     fgm, fga, minutes_played";

fn team_from_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        team_id: row.get(0)?,
        team_name: row.get(1)?,
        city: row.get(2)?,
        conference: row.get(3)?,
        division: row.get(4)?,
        win_rate: row.get(5)?,
        avg_points: row.get(6)?,
        season_wins: row.get(7)?,
        season_losses: row.get(8)?,
        arena: row.get(9)?,
    })
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        player_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        position: row.get(3)?,
        jersey_number: row.get(4)?,
        team_id: row.get(5)?,
        averages: PlayerAverages {
            points: row.get(6)?,
            rebounds: row.get(7)?,
            assists: row.get(8)?,
            steals: row.get(9)?,
            blocks: row.get(10)?,
            turnovers: row.get(11)?,
            fouls: row.get(12)?,
            fg_percentage: row.get(13)?,
        },
        season_ppg: row.get(14)?,
        season_rpg: row.get(15)?,
        season_apg: row.get(16)?,
        season_games: row.get(17)?,
    })
}

fn game_from_row(row: &Row<'_>) -> rusqlite::Result<Game> {
    let date_str: String = row.get(1)?;
    let time_str: String = row.get(2)?;
    Ok(Game {
        game_id: row.get(0)?,
        game_date: parse_text(&date_str, DATE_FORMAT, 1, NaiveDate::parse_from_str)?,
        game_time: parse_text(&time_str, TIME_FORMAT, 2, NaiveTime::parse_from_str)?,
        resimulated: row.get(3)?,
        home_team_score: row.get(4)?,
        away_team_score: row.get(5)?,
        arena: row.get(6)?,
        home_team_id: row.get(7)?,
        away_team_id: row.get(8)?,
        is_season_game: row.get(9)?,
        season_id: row.get(10)?,
    })
}

fn parse_text<T>(
    value: &str,
    format: &str,
    column: usize,
    parse: impl Fn(&str, &str) -> chrono::ParseResult<T>,
) -> rusqlite::Result<T> {
    parse(value, format).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn box_score_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<BoxScore> {
    Ok(BoxScore {
        points: row.get(offset)?,
        rebounds: row.get(offset + 1)?,
        assists: row.get(offset + 2)?,
        steals: row.get(offset + 3)?,
        blocks: row.get(offset + 4)?,
        turnovers: row.get(offset + 5)?,
        fouls: row.get(offset + 6)?,
        fgm: row.get(offset + 7)?,
        fga: row.get(offset + 8)?,
        minutes_played: row.get(offset + 9)?,
    })
}
