// Season-level orchestration: schedule generation, the progression loop,
// standings, and MVP ranking.

pub mod mvp;
pub mod progress;
pub mod schedule;
pub mod standings;

pub use mvp::{league_mvp, team_mvp};
pub use progress::SeasonRunner;
pub use schedule::{generate_schedule, DEFAULT_GAMES_COUNT};
pub use standings::{refresh_team_records, standings, Standings};
