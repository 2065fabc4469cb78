// Season simulator entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to stderr)
// 2. Load config
// 3. Open database, seed the league if empty
// 4. Build the RNG (seeded or from entropy)
// 5. Reset the tracked team's season and generate its schedule
// 6. Run the season
// 7. Refresh cached records and print standings + MVP races

use courtsim::config;
use courtsim::db;
use courtsim::season;
use courtsim::seed;

use anyhow::Context;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("season simulator starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} games, roster of {}, randomness {}",
        config.season.games_count, config.season.roster_size, config.sim.randomness_factor
    );

    // 3. Open database, seed the league if empty
    let db = db::Database::open(&config.db_path).context("failed to open database")?;
    info!("Database opened at {}", config.db_path);

    // 4. Build the RNG
    let mut rng = match config.rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    if db.team_count()? == 0 {
        info!("Empty database, seeding league");
        seed::populate_league(&db, &mut rng).context("failed to seed league")?;
    }

    // 5. Reset the tracked team's season and generate its schedule
    let team_id = match config.season.favorite_team {
        Some(id) => id,
        None => {
            let teams = db.all_teams()?;
            teams
                .first()
                .map(|team| team.team_id)
                .context("database holds no teams")?
        }
    };
    let team = db
        .team(team_id)?
        .with_context(|| format!("team {team_id} not found"))?;
    info!("Simulating a season for the {}", team.full_name());

    let runner = season::SeasonRunner::new(&db, &config);
    runner.reset_season(team_id)?;
    let schedule = season::generate_schedule(&db, team_id, config.season.games_count, &mut rng)?;
    info!("Schedule generated: {} games", schedule.len());

    // 6. Run the season
    let results = runner.run_season(team_id, &schedule, &mut rng)?;
    info!("Season complete: {} games simulated", results.len());

    // 7. Refresh cached records and print standings + MVP races
    season::refresh_team_records(&db)?;
    print_standings(&db)?;
    print_mvp_race(&db, team_id)?;

    Ok(())
}

fn print_standings(db: &db::Database) -> anyhow::Result<()> {
    println!("\n=== Standings ===");
    for (conference, divisions) in season::standings(db)? {
        println!("\n{conference} Conference");
        for (division, rows) in divisions {
            println!("  {division}");
            for row in rows {
                println!(
                    "    {:<28} {:>3}-{:<3} {:.3}  {:>5.1} ppg",
                    row.name, row.wins, row.losses, row.win_rate, row.avg_points
                );
            }
        }
    }
    Ok(())
}

fn print_mvp_race(db: &db::Database, team_id: i64) -> anyhow::Result<()> {
    println!("\n=== League MVP race ===");
    for candidate in season::league_mvp(db)?.iter().take(5) {
        println!(
            "  {:<28} {:>5.1} ppg {:>4.1} rpg {:>4.1} apg  score {:.1}",
            candidate.name, candidate.ppg, candidate.rpg, candidate.apg, candidate.mvp_score
        );
    }

    println!("\n=== Team MVP race ===");
    for candidate in season::team_mvp(db, team_id)?.iter().take(5) {
        println!(
            "  {:<28} {:>5.1} ppg {:>4.1} rpg {:>4.1} apg  score {:.1}",
            candidate.name, candidate.ppg, candidate.rpg, candidate.apg, candidate.mvp_score
        );
    }
    Ok(())
}

/// Initialize tracing to stderr so standings output on stdout stays clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("courtsim=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
