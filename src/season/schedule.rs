// Season schedule generation for one tracked team.
//
// Half the games are conference matchups and half cross-conference, each
// half split between home and away by integer division; a half with an odd
// count loses its remainder game. Opponents are drawn uniformly with
// replacement, so repeats are expected. The finished list is shuffled.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::db::Database;
use crate::model::{Fixture, Team};
use crate::sim::SimError;

/// Default regular-season length.
pub const DEFAULT_GAMES_COUNT: usize = 82;

/// Build a season's fixture list for `team_id` against the rest of the
/// league.
///
/// Integer division truncates each half and sub-half, so the result can be
/// slightly shorter than requested whenever a half comes out odd — the
/// default 82 splits into two halves of 41 and yields 80 fixtures. Only a
/// `games_count` divisible by 4 is delivered in full. An empty opponent
/// pool (single-team conference, or a one-conference league) simply
/// contributes no fixtures.
pub fn generate_schedule<R: Rng>(
    db: &Database,
    team_id: i64,
    games_count: usize,
    rng: &mut R,
) -> Result<Vec<Fixture>, SimError> {
    let tracked = db.team(team_id)?.ok_or(SimError::TeamNotFound(team_id))?;

    let (conference, other): (Vec<Team>, Vec<Team>) = db
        .all_teams()?
        .into_iter()
        .filter(|team| team.team_id != team_id)
        .partition(|team| team.conference == tracked.conference);
    if conference.is_empty() || other.is_empty() {
        warn!(
            team_id,
            conference_pool = conference.len(),
            other_pool = other.len(),
            "opponent pool is empty; schedule will come up short"
        );
    }

    let conference_games = games_count / 2;
    let other_games = games_count - conference_games;

    let mut schedule = Vec::with_capacity(games_count);
    push_matchups(&mut schedule, team_id, &conference, conference_games, rng);
    push_matchups(&mut schedule, team_id, &other, other_games, rng);

    schedule.shuffle(rng);
    debug!(
        team_id,
        fixtures = schedule.len(),
        requested = games_count,
        "schedule generated"
    );
    Ok(schedule)
}

/// Append `count` fixtures against `pool`, half hosted by the tracked team
/// and half on the road.
fn push_matchups<R: Rng>(
    schedule: &mut Vec<Fixture>,
    team_id: i64,
    pool: &[Team],
    count: usize,
    rng: &mut R,
) {
    for _ in 0..count / 2 {
        if let Some(opponent) = pool.choose(rng) {
            schedule.push(Fixture {
                home_team_id: team_id,
                away_team_id: opponent.team_id,
            });
        }
    }
    for _ in 0..count / 2 {
        if let Some(opponent) = pool.choose(rng) {
            schedule.push(Fixture {
                home_team_id: opponent.team_id,
                away_team_id: team_id,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_db() -> Database {
        Database::open(":memory:").expect("in-memory database should open")
    }

    /// A small balanced league: `per_conference` teams in each of two
    /// conferences. Returns all team ids, Eastern first.
    fn seed_league(db: &Database, per_conference: usize) -> Vec<i64> {
        let mut ids = Vec::new();
        for conference in ["Eastern", "Western"] {
            for n in 0..per_conference {
                let id = db
                    .insert_team(
                        &format!("{conference} {n}"),
                        "City",
                        conference,
                        "Division",
                        "Arena",
                    )
                    .unwrap();
                ids.push(id);
            }
        }
        ids
    }

    #[test]
    fn count_divisible_by_four_is_delivered_in_full() {
        let db = test_db();
        let ids = seed_league(&db, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let schedule = generate_schedule(&db, ids[0], 84, &mut rng).unwrap();
        assert_eq!(schedule.len(), 84);
    }

    #[test]
    fn default_count_loses_the_odd_half_remainders() {
        let db = test_db();
        let ids = seed_league(&db, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // 82 -> two halves of 41, each emitting 20 home + 20 away.
        let schedule = generate_schedule(&db, ids[0], DEFAULT_GAMES_COUNT, &mut rng).unwrap();
        assert_eq!(schedule.len(), 80);
    }

    #[test]
    fn tracked_team_is_in_every_fixture_with_balanced_venues() {
        let db = test_db();
        let ids = seed_league(&db, 4);
        let tracked = ids[0];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let schedule = generate_schedule(&db, tracked, 82, &mut rng).unwrap();

        let mut home = 0;
        let mut away = 0;
        for fixture in &schedule {
            assert!(fixture.home_team_id == tracked || fixture.away_team_id == tracked);
            assert_ne!(fixture.home_team_id, fixture.away_team_id);
            if fixture.home_team_id == tracked {
                home += 1;
            } else {
                away += 1;
            }
        }
        assert_eq!(home, 40);
        assert_eq!(away, 40);
    }

    #[test]
    fn conference_split_is_half_and_half() {
        let db = test_db();
        let ids = seed_league(&db, 4);
        let tracked = ids[0];
        let east: Vec<i64> = ids[..4].to_vec();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let schedule = generate_schedule(&db, tracked, 80, &mut rng).unwrap();

        let conference_games = schedule
            .iter()
            .map(|f| {
                if f.home_team_id == tracked {
                    f.away_team_id
                } else {
                    f.home_team_id
                }
            })
            .filter(|opponent| east.contains(opponent))
            .count();
        assert_eq!(conference_games, 40);
    }

    #[test]
    fn odd_count_truncates() {
        let db = test_db();
        let ids = seed_league(&db, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        // 81 -> 40 conference (20 home + 20 away) + 41 other (20 + 20) = 80.
        let schedule = generate_schedule(&db, ids[0], 81, &mut rng).unwrap();
        assert_eq!(schedule.len(), 80);
    }

    #[test]
    fn unknown_team_is_not_found() {
        let db = test_db();
        seed_league(&db, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = generate_schedule(&db, 555, 82, &mut rng).unwrap_err();
        assert!(matches!(err, SimError::TeamNotFound(555)));
    }

    #[test]
    fn regenerating_shuffles_differently() {
        let db = test_db();
        let ids = seed_league(&db, 6);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let first = generate_schedule(&db, ids[0], 82, &mut rng).unwrap();
        let second = generate_schedule(&db, ids[0], 82, &mut rng).unwrap();
        assert_ne!(first, second);
    }
}
