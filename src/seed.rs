// League seeding: the 30-team table plus synthetic rosters.
//
// Rosters are generated from the injected RNG rather than imported from an
// external statistics provider, so a fresh database is immediately playable
// and tests stay hermetic.

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::db::Database;
use crate::model::PlayerAverages;

/// Players generated per team.
pub const ROSTER_SIZE: usize = 12;

/// (name, city, conference, division, arena)
const TEAMS: &[(&str, &str, &str, &str, &str)] = &[
    ("Hawks", "Atlanta", "Eastern", "Southeast", "State Farm Arena"),
    ("Celtics", "Boston", "Eastern", "Atlantic", "TD Garden"),
    ("Nets", "Brooklyn", "Eastern", "Atlantic", "Barclays Center"),
    ("Hornets", "Charlotte", "Eastern", "Southeast", "Spectrum Center"),
    ("Bulls", "Chicago", "Eastern", "Central", "United Center"),
    ("Cavaliers", "Cleveland", "Eastern", "Central", "Rocket Mortgage FieldHouse"),
    ("Mavericks", "Dallas", "Western", "Southwest", "American Airlines Center"),
    ("Nuggets", "Denver", "Western", "Northwest", "Ball Arena"),
    ("Pistons", "Detroit", "Eastern", "Central", "Little Caesars Arena"),
    ("Warriors", "Golden State", "Western", "Pacific", "Chase Center"),
    ("Rockets", "Houston", "Western", "Southwest", "Toyota Center"),
    ("Pacers", "Indiana", "Eastern", "Central", "Gainbridge Fieldhouse"),
    ("Clippers", "Los Angeles", "Western", "Pacific", "Crypto.com Arena"),
    ("Lakers", "Los Angeles", "Western", "Pacific", "Crypto.com Arena"),
    ("Grizzlies", "Memphis", "Western", "Southwest", "FedExForum"),
    ("Heat", "Miami", "Eastern", "Southeast", "Kaseya Center"),
    ("Bucks", "Milwaukee", "Eastern", "Central", "Fiserv Forum"),
    ("Timberwolves", "Minnesota", "Western", "Northwest", "Target Center"),
    ("Pelicans", "New Orleans", "Western", "Southwest", "Smoothie King Center"),
    ("Knicks", "New York", "Eastern", "Atlantic", "Madison Square Garden"),
    ("Thunder", "Oklahoma City", "Western", "Northwest", "Paycom Center"),
    ("Magic", "Orlando", "Eastern", "Southeast", "Amway Center"),
    ("76ers", "Philadelphia", "Eastern", "Atlantic", "Wells Fargo Center"),
    ("Suns", "Phoenix", "Western", "Pacific", "Footprint Center"),
    ("Trail Blazers", "Portland", "Western", "Northwest", "Moda Center"),
    ("Kings", "Sacramento", "Western", "Pacific", "Golden 1 Center"),
    ("Spurs", "San Antonio", "Western", "Southwest", "Frost Bank Center"),
    ("Raptors", "Toronto", "Eastern", "Atlantic", "Scotiabank Arena"),
    ("Jazz", "Utah", "Western", "Northwest", "Delta Center"),
    ("Wizards", "Washington", "Eastern", "Southeast", "Capital One Arena"),
];

const FIRST_NAMES: &[&str] = &[
    "Marcus", "Devin", "Jalen", "Tyrese", "Darius", "Malik", "Isaiah", "Trey", "Jaylen",
    "Andre", "Caleb", "Damian", "Evan", "Grant", "Jordan", "Kendall", "Luka", "Miles",
    "Nikola", "Omari", "Paolo", "Quentin", "Rashad", "Silas", "Terrence", "Victor", "Zion",
    "Cole", "Dante", "Elias",
];

const LAST_NAMES: &[&str] = &[
    "Abrams", "Barnes", "Carter", "Dawson", "Ellison", "Fletcher", "Grant", "Hayes",
    "Irving", "Jennings", "Kessler", "Lawson", "Mitchell", "Novak", "Okafor", "Porter",
    "Quinn", "Reeves", "Sanders", "Thompson", "Udoka", "Vincent", "Walker", "Xavier",
    "Young", "Zeller", "Holloway", "Brooks", "McGee", "Sloan",
];

const POSITIONS: &[&str] = &["PG", "SG", "SF", "PF", "C"];

/// Populate an empty database with the league's 30 teams and a synthetic
/// roster for each.
pub fn populate_league<R: Rng>(db: &Database, rng: &mut R) -> Result<()> {
    for &(name, city, conference, division, arena) in TEAMS {
        let team_id = db.insert_team(name, city, conference, division, arena)?;
        for slot in 0..ROSTER_SIZE {
            let averages = roster_slot_averages(slot, rng);
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Player");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Unknown");
            let position = POSITIONS[slot % POSITIONS.len()];
            let jersey = rng.gen_range(0..56);
            db.insert_player(team_id, first, last, position, jersey, &averages)?;
        }
    }
    info!(
        teams = TEAMS.len(),
        players_per_team = ROSTER_SIZE,
        "league populated"
    );
    Ok(())
}

/// Per-game averages for a roster slot: scoring declines from stars to the
/// end of the bench, with everything else loosely scaled to the scoring tier.
fn roster_slot_averages<R: Rng>(slot: usize, rng: &mut R) -> PlayerAverages {
    let tier = 1.0 - slot as f64 / ROSTER_SIZE as f64;
    let points = (6.0 + 20.0 * tier + rng.gen_range(-2.0..=2.0)).max(2.0);
    let round1 = |value: f64| (value * 10.0).round() / 10.0;
    PlayerAverages {
        points: round1(points),
        rebounds: round1((2.0 + 7.0 * tier * rng.gen_range(0.5..=1.5)).max(0.5)),
        assists: round1((1.0 + 6.0 * tier * rng.gen_range(0.3..=1.5)).max(0.3)),
        steals: round1(rng.gen_range(0.3..=1.8)),
        blocks: round1(rng.gen_range(0.1..=1.5)),
        turnovers: round1((0.8 + points * 0.08 + rng.gen_range(-0.3..=0.3)).max(0.2)),
        fouls: round1(rng.gen_range(1.2..=3.4)),
        fg_percentage: (rng.gen_range(0.40_f64..=0.56) * 100.0).round() / 100.0,
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

    #[test]
    fn seeds_thirty_teams_with_full_rosters() {
        let db = test_db();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        populate_league(&db, &mut rng).unwrap();

        let teams = db.all_teams().unwrap();
        assert_eq!(teams.len(), 30);
        for team in &teams {
            let players = db.players_by_team(team.team_id).unwrap();
            assert_eq!(players.len(), ROSTER_SIZE);
            assert_eq!(team.season_wins, 0);
        }

        let east = teams.iter().filter(|t| t.conference == "Eastern").count();
        assert_eq!(east, 15);
    }

    #[test]
    fn generated_averages_are_plausible() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for slot in 0..ROSTER_SIZE {
            for _ in 0..20 {
                let averages = roster_slot_averages(slot, &mut rng);
                assert!(averages.points >= 2.0 && averages.points <= 30.0);
                assert!(averages.fg_percentage > 0.0 && averages.fg_percentage < 1.0);
                assert!(averages.fouls >= 0.0);
            }
        }
    }

    #[test]
    fn star_slots_outscore_bench_slots() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let star: f64 = (0..50)
            .map(|_| roster_slot_averages(0, &mut rng).points)
            .sum::<f64>()
            / 50.0;
        let bench: f64 = (0..50)
            .map(|_| roster_slot_averages(ROSTER_SIZE - 1, &mut rng).points)
            .sum::<f64>()
            / 50.0;
        assert!(star > bench);
    }

    #[test]
    fn same_seed_generates_same_league() {
        let db_a = test_db();
        let db_b = test_db();
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        populate_league(&db_a, &mut rng_a).unwrap();
        populate_league(&db_b, &mut rng_b).unwrap();

        let players_a = db_a.players_by_team(1).unwrap();
        let players_b = db_b.players_by_team(1).unwrap();
        for (a, b) in players_a.iter().zip(players_b.iter()) {
            assert_eq!(a.full_name(), b.full_name());
            assert_eq!(a.averages, b.averages);
        }
    }
}
