//! Seeded draw: shuffle the entry list before scheduling, reproducibly.

use crate::models::Team;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Return `teams` in a shuffled order determined entirely by `seed`.
pub fn draw_order(teams: &[Team], seed: u64) -> Vec<Team> {
    let mut drawn = teams.to_vec();
    drawn.shuffle(&mut StdRng::seed_from_u64(seed));
    drawn
}
