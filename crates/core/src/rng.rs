//! The single generator threaded through every pipeline stage, plus the draw
//! helpers the stages share.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub type CaveRng = ChaCha8Rng;

pub fn seeded(seed: u64) -> CaveRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform draw in `[0, 1)` with 53 bits of precision.
pub fn unit_f64(rng: &mut CaveRng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}

/// Bernoulli trial: `1.0` always succeeds, `0.0` never does.
pub fn roll(rng: &mut CaveRng, probability: f64) -> bool {
    unit_f64(rng) < probability
}

pub fn random_index(rng: &mut CaveRng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Fisher–Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rng: &mut CaveRng) {
    for upper in (1..items.len()).rev() {
        let pick = random_index(rng, upper + 1);
        items.swap(upper, pick);
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Seed for runs where the caller did not pick one.
pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_respects_certain_and_impossible_probabilities() {
        let mut rng = seeded(7);
        for _ in 0..1_000 {
            assert!(roll(&mut rng, 1.0));
            assert!(!roll(&mut rng, 0.0));
        }
    }

    #[test]
    fn unit_draws_stay_in_half_open_range() {
        let mut rng = seeded(99);
        for _ in 0..10_000 {
            let value = unit_f64(&mut rng);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = seeded(3);
        let mut items: Vec<u32> = (0..64).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<_>>());
        assert_ne!(items, sorted, "64 elements should not shuffle back into order");
    }

    #[test]
    fn same_seed_gives_same_stream() {
        let mut a = seeded(2_024);
        let mut b = seeded(2_024);
        let left: Vec<usize> = (0..32).map(|_| random_index(&mut a, 1_000)).collect();
        let right: Vec<usize> = (0..32).map(|_| random_index(&mut b, 1_000)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        assert_ne!(generate_runtime_seed(), generate_runtime_seed());
    }
}
