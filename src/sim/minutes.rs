// Minute allocation across a roster.
//
// Partitions the fixed 240-minute team budget (48 minutes x 5 on the floor)
// between starters and reserves. Values are rounded to one decimal as they
// are assigned, and the last reserve absorbs the exact remainder, so with a
// non-empty bench the team total lands on the budget.

use std::collections::HashMap;

use rand::Rng;

/// Per-team minute budget for one game.
pub const TEAM_GAME_MINUTES: f64 = 240.0;

const BASE_STARTER_MINUTES: f64 = 30.0;
const STARTER_JITTER: f64 = 3.0;
const RESERVE_JITTER: f64 = 2.0;

/// Round to one decimal place, the resolution lineup minutes are stored at.
fn round_tenth(minutes: f64) -> f64 {
    (minutes * 10.0).round() / 10.0
}

/// Allocate game minutes to a roster.
///
/// Starters each draw `30 ± 3` minutes. The remaining budget is split evenly
/// across the bench with `± 2` jitter, capped at whatever is still unspent;
/// the last bench player receives the exact remainder. Every value is `>= 0`
/// and rounded to one decimal.
///
/// With an empty bench the starters' draws are all there is, so the total
/// may drift from 240 — an accepted approximation, not an invariant.
///
/// Callers are responsible for passing exactly five starters; this function
/// allocates whatever it is given.
pub fn allocate_minutes<R: Rng>(
    starters: &[i64],
    bench: &[i64],
    rng: &mut R,
) -> HashMap<i64, f64> {
    let mut allocation = HashMap::with_capacity(starters.len() + bench.len());
    let mut remaining = TEAM_GAME_MINUTES;

    for &player_id in starters {
        let minutes =
            round_tenth(BASE_STARTER_MINUTES + rng.gen_range(-STARTER_JITTER..=STARTER_JITTER));
        allocation.insert(player_id, minutes);
        remaining -= minutes;
    }

    if let Some((&last, rest)) = bench.split_last() {
        let base = remaining / bench.len() as f64;
        for &player_id in rest {
            let drawn = base + rng.gen_range(-RESERVE_JITTER..=RESERVE_JITTER);
            let minutes = round_tenth(drawn.min(remaining).max(0.0));
            allocation.insert(player_id, minutes);
            remaining -= minutes;
        }
        allocation.insert(last, round_tenth(remaining.max(0.0)));
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ids(range: std::ops::Range<i64>) -> Vec<i64> {
        range.collect()
    }

    #[test]
    fn five_starters_three_bench_sum_to_budget() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let allocation = allocate_minutes(&ids(1..6), &ids(6..9), &mut rng);
            let total: f64 = allocation.values().sum();
            assert!(
                (total - TEAM_GAME_MINUTES).abs() <= 0.1,
                "seed {seed}: total {total}"
            );
        }
    }

    #[test]
    fn large_bench_sums_to_budget() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let allocation = allocate_minutes(&ids(1..6), &ids(6..16), &mut rng);
            let total: f64 = allocation.values().sum();
            assert!(
                (total - TEAM_GAME_MINUTES).abs() <= 0.1,
                "seed {seed}: total {total}"
            );
        }
    }

    #[test]
    fn all_minutes_non_negative_and_tenth_rounded() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let allocation = allocate_minutes(&ids(1..6), &ids(6..14), &mut rng);
            for (&player_id, &minutes) in &allocation {
                assert!(minutes >= 0.0, "player {player_id} got {minutes}");
                let scaled = minutes * 10.0;
                assert!(
                    (scaled - scaled.round()).abs() < 1e-6,
                    "player {player_id} minutes {minutes} not rounded to 0.1"
                );
            }
        }
    }

    #[test]
    fn starters_draw_near_thirty() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let allocation = allocate_minutes(&ids(1..6), &ids(6..10), &mut rng);
        for starter in 1..6 {
            let minutes = allocation[&starter];
            assert!((27.0..=33.0).contains(&minutes), "starter got {minutes}");
        }
    }

    #[test]
    fn empty_bench_allocates_only_starters() {
        // Budget conservation is relaxed here: the starters' random draws
        // are kept as-is.
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let allocation = allocate_minutes(&ids(1..6), &[], &mut rng);
        assert_eq!(allocation.len(), 5);
        let total: f64 = allocation.values().sum();
        assert!((135.0..=165.0).contains(&total));
    }

    #[test]
    fn every_player_receives_an_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let starters = ids(1..6);
        let bench = ids(6..13);
        let allocation = allocate_minutes(&starters, &bench, &mut rng);
        for id in starters.iter().chain(bench.iter()) {
            assert!(allocation.contains_key(id));
        }
    }
}
