// Standings and team-record maintenance.
//
// Display wins/losses are recomputed by scanning each team's full game
// history rather than trusting the cached season counters; ordering within
// a division still follows the cached win rate.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::debug;

use crate::db::Database;
use crate::model::{Game, StandingsRow, Team};

/// Standings grouped conference -> division -> teams (best first).
pub type Standings = BTreeMap<String, BTreeMap<String, Vec<StandingsRow>>>;

/// Wins, losses, and total points for one team across its completed games.
fn scan_history(team: &Team, games: &[Game]) -> (i64, i64, i64) {
    let mut wins = 0;
    let mut losses = 0;
    let mut total_points = 0;
    for game in games {
        let (Some(home_score), Some(away_score)) = (game.home_team_score, game.away_team_score)
        else {
            continue;
        };
        let (own, opponent) = if game.home_team_id == team.team_id {
            (home_score, away_score)
        } else {
            (away_score, home_score)
        };
        if own > opponent {
            wins += 1;
        } else {
            losses += 1;
        }
        total_points += own;
    }
    (wins, losses, total_points)
}

/// Recompute every team's cached `win_rate` and `avg_points` from its full
/// game history. Teams without completed games keep their stored values.
pub fn refresh_team_records(db: &Database) -> Result<()> {
    for team in db.all_teams()? {
        let games = db.games_for_team(team.team_id)?;
        let (wins, losses, total_points) = scan_history(&team, &games);
        let played = wins + losses;
        if played > 0 {
            let win_rate = wins as f64 / played as f64;
            let avg_points = total_points as f64 / played as f64;
            db.update_team_record(team.team_id, win_rate, avg_points)?;
        }
    }
    debug!("team records refreshed from game history");
    Ok(())
}

/// Current standings, grouped by conference then division. Each division's
/// teams are ordered by cached win rate, best first; wins and losses come
/// from a fresh scan of game history.
pub fn standings(db: &Database) -> Result<Standings> {
    let mut teams = db.all_teams()?;
    teams.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut table: Standings = BTreeMap::new();
    for team in teams {
        let games = db.games_for_team(team.team_id)?;
        let (wins, losses, _) = scan_history(&team, &games);
        table
            .entry(team.conference.clone())
            .or_default()
            .entry(team.division.clone())
            .or_default()
            .push(StandingsRow {
                team_id: team.team_id,
                name: team.full_name(),
                wins,
                losses,
                win_rate: team.win_rate,
                games_played: wins + losses,
                avg_points: team.avg_points,
            });
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::model::GameRecord;

    fn test_db() -> Database {
        Database::open(":memory:").expect("in-memory database should open")
    }

    fn seed_teams(db: &Database) -> Vec<i64> {
        [
            ("Celtics", "Eastern", "Atlantic"),
            ("Knicks", "Eastern", "Atlantic"),
            ("Bucks", "Eastern", "Central"),
            ("Lakers", "Western", "Pacific"),
        ]
        .iter()
        .map(|(name, conference, division)| {
            db.insert_team(name, "City", conference, division, "Arena")
                .unwrap()
        })
        .collect()
    }

    fn completed_game(db: &Database, home: i64, away: i64, home_score: i64, away_score: i64) {
        db.write_game(&GameRecord {
            resimulate_of: None,
            game_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            game_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            arena: "Arena".into(),
            home_team_id: home,
            away_team_id: away,
            is_season_game: true,
            season_id: Some(2026),
            home_score,
            away_score,
            lineups: vec![],
            stats: vec![],
        })
        .unwrap();
    }

    #[test]
    fn standings_group_by_conference_and_division() {
        let db = test_db();
        let teams = seed_teams(&db);
        completed_game(&db, teams[0], teams[1], 100, 90);

        let table = standings(&db).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["Eastern"]["Atlantic"].len(), 2);
        assert_eq!(table["Eastern"]["Central"].len(), 1);
        assert_eq!(table["Western"]["Pacific"].len(), 1);

        let atlantic = &table["Eastern"]["Atlantic"];
        let celtics = atlantic.iter().find(|r| r.team_id == teams[0]).unwrap();
        assert_eq!((celtics.wins, celtics.losses), (1, 0));
        let knicks = atlantic.iter().find(|r| r.team_id == teams[1]).unwrap();
        assert_eq!((knicks.wins, knicks.losses), (0, 1));
    }

    #[test]
    fn refresh_records_matches_history() {
        let db = test_db();
        let teams = seed_teams(&db);
        completed_game(&db, teams[0], teams[1], 110, 90);
        completed_game(&db, teams[1], teams[0], 95, 105);
        completed_game(&db, teams[0], teams[2], 80, 100);

        refresh_team_records(&db).unwrap();

        let celtics = db.team(teams[0]).unwrap().unwrap();
        assert!((celtics.win_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((celtics.avg_points - (110.0 + 105.0 + 80.0) / 3.0).abs() < 1e-9);

        // No completed games: record untouched.
        let lakers = db.team(teams[3]).unwrap().unwrap();
        assert_eq!(lakers.win_rate, 0.0);
    }

    #[test]
    fn divisions_order_by_cached_win_rate() {
        let db = test_db();
        let teams = seed_teams(&db);
        db.update_team_record(teams[1], 0.9, 100.0).unwrap();
        db.update_team_record(teams[0], 0.4, 95.0).unwrap();

        let table = standings(&db).unwrap();
        let atlantic = &table["Eastern"]["Atlantic"];
        assert_eq!(atlantic[0].team_id, teams[1]);
        assert_eq!(atlantic[1].team_id, teams[0]);
    }

    #[test]
    fn empty_history_yields_zero_games() {
        let db = test_db();
        let teams = seed_teams(&db);
        let table = standings(&db).unwrap();
        let celtics = table["Eastern"]["Atlantic"]
            .iter()
            .find(|r| r.team_id == teams[0])
            .unwrap();
        assert_eq!(celtics.games_played, 0);
    }
}
