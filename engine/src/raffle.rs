//! Random selection of prize recipients.
//!
//! Bidder raffles draw uniformly over bid records, so a bidder who bid
//! more times has proportionally higher odds. Staker raffles go through
//! the [`FairRandomPicker`], which increasingly favors candidates that
//! have been picked fewer times.

use rand::Rng;

/// Weighted random picker converging toward uniform representation.
///
/// Maintains a pick count per candidate and weighs candidate `i` as
/// `max(counts) - counts[i] + k`, where `k` is a small positive
/// smoothing constant: candidates with lower historical counts always
/// weigh at least as much as those with higher counts, so the scheme
/// converges toward uniform representation over many draws.
#[derive(Debug, Clone)]
pub struct FairRandomPicker {
    counts: Vec<u64>,
    total_count: u64,
    smoothing: u64,
}

impl FairRandomPicker {
    /// Creates a picker over `num_candidates` candidates with smoothing
    /// constant `smoothing` (clamped to at least 1).
    pub fn new(num_candidates: usize, smoothing: u64) -> Self {
        FairRandomPicker {
            counts: vec![0; num_candidates],
            total_count: 0,
            smoothing: smoothing.max(1),
        }
    }

    /// Number of candidates.
    pub fn num_candidates(&self) -> usize {
        self.counts.len()
    }

    /// Per-candidate pick counts.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Picks the next candidate from `random_number` and records the
    /// pick. Returns `None` only when there are no candidates.
    ///
    /// The total weight equals the exact sum of all per-candidate
    /// weights, which is what makes the downward walk provably
    /// terminate in range; the arithmetic below must stay exact.
    pub fn pick(&mut self, random_number: u128) -> Option<usize> {
        if self.counts.is_empty() {
            return None;
        }
        let max_count = self.counts.iter().copied().max().unwrap_or(0);
        let num_candidates = self.counts.len() as u128;
        let total_weight = (u128::from(max_count) + u128::from(self.smoothing)) * num_candidates
            - u128::from(self.total_count);
        let mut target = (random_number % total_weight) as i128;
        let mut picked = self.counts.len();
        loop {
            picked -= 1;
            let weight = max_count - self.counts[picked] + self.smoothing;
            target -= i128::from(weight);
            if target < 0 {
                break;
            }
        }
        self.counts[picked] += 1;
        self.total_count += 1;
        Some(picked)
    }
}

/// Draws a uniform index below `total`, or `None` when `total` is zero.
pub fn uniform_index<R: Rng + ?Sized>(rng: &mut R, total: u64) -> Option<u64> {
    if total == 0 {
        None
    } else {
        Some(rng.gen::<u64>() % total)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    #[test]
    fn picks_are_always_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut picker = FairRandomPicker::new(5, 1);
        for _ in 0..1_000 {
            let picked = picker.pick(rng.gen()).expect("should pick");
            assert!(picked < 5);
        }
    }

    #[test]
    fn empty_picker_picks_nothing() {
        let mut picker = FairRandomPicker::new(0, 3);
        assert_eq!(picker.pick(123), None);
    }

    /// Deterministic test-vector sequence (splitmix64).
    fn next_test_random(state: &mut u64) -> u64 {
        *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = *state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    #[test]
    fn counts_converge_toward_uniform() {
        for smoothing in [1u64, 3, 5] {
            for num_candidates in [3usize, 7, 16] {
                let mut state = 2_655u64 ^ num_candidates as u64 ^ (smoothing << 8);
                let mut picker = FairRandomPicker::new(num_candidates, smoothing);
                for _ in 0..10 * num_candidates {
                    picker
                        .pick(u128::from(next_test_random(&mut state)))
                        .expect("should pick");
                }
                let max = picker.counts().iter().copied().max().unwrap_or(0);
                let min = picker.counts().iter().copied().min().unwrap_or(0);
                assert!(
                    max - min <= smoothing + 1,
                    "spread {} exceeds smoothing {} for n {}",
                    max - min,
                    smoothing,
                    num_candidates
                );
            }
        }
    }

    #[test]
    fn under_represented_candidate_is_eventually_picked() {
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        let mut picker = FairRandomPicker::new(4, 1);
        for _ in 0..40 {
            picker.pick(rng.gen()).expect("should pick");
        }
        assert!(picker.counts().iter().all(|count| *count > 0));
    }

    #[test]
    fn uniform_index_handles_empty_and_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(uniform_index(&mut rng, 0), None);
        for _ in 0..100 {
            let index = uniform_index(&mut rng, 7).expect("should pick");
            assert!(index < 7);
        }
    }
}
