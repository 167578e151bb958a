//! Conversion of exact probabilities into shot counts.
//!
//! [`DeterministicSampler`] derives counts by rounding and is bit-for-bit
//! reproducible. [`ShotSampler`] (feature `sampling`) draws independent
//! shots from the distribution.

use crate::counts::Counts;
use crate::probability::Probabilities;

/// Rounding-based count assignment with no randomness.
///
/// Outcomes are visited in ascending bit-string order. Every outcome but
/// the last gets `p × shots` rounded half-to-even; the last gets whatever
/// remains so that the total is exactly `shots`. If earlier roundings
/// already overshoot, the last outcome gets 0 and the excess is taken back
/// one shot at a time from the outcome whose count most exceeds
/// `p × shots` (the later outcome on ties). Outcomes left with a zero count
/// are omitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicSampler;

impl DeterministicSampler {
    /// Assign `shots` counts to the outcomes of `probabilities`.
    ///
    /// Returns empty counts for `shots == 0` or an empty distribution.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn sample(&self, probabilities: &Probabilities, shots: u64) -> Counts {
        let entries: Vec<(&str, f64)> = probabilities.iter().collect();
        let Some(((last_key, _), head)) = entries.split_last() else {
            return Counts::new();
        };
        if shots == 0 {
            return Counts::new();
        }

        let total = shots as f64;
        let mut assigned: Vec<u64> = head
            .iter()
            .map(|&(_, p)| (p * total).round_ties_even().max(0.0) as u64)
            .collect();

        let used: u64 = assigned.iter().sum();
        let last_count = shots.saturating_sub(used);
        let overshoot = used.saturating_sub(shots);

        if overshoot > 0 {
            // Each rounding adds at most half a shot, so the `overshoot`
            // largest excesses are all positive: taking one shot from each
            // equals removing shots one at a time from the current maximum.
            let excess = |i: usize| assigned[i] as f64 - head[i].1 * total;
            let mut order: Vec<usize> = (0..head.len()).filter(|&i| assigned[i] > 0).collect();
            order.sort_by(|&a, &b| excess(b).total_cmp(&excess(a)).then(b.cmp(&a)));
            let take = usize::try_from(overshoot).unwrap_or(usize::MAX);
            for i in order.into_iter().take(take) {
                assigned[i] -= 1;
            }
        }

        head.iter()
            .zip(assigned)
            .map(|(&(key, _), count)| (key.to_string(), count))
            .chain(std::iter::once(((*last_key).to_string(), last_count)))
            .collect()
    }
}

#[cfg(feature = "sampling")]
pub use shots::ShotSampler;

#[cfg(feature = "sampling")]
mod shots {
    use rand::SeedableRng;
    use rand::distributions::{Distribution, WeightedIndex};
    use rand::rngs::StdRng;

    use crate::counts::Counts;
    use crate::error::{SimError, SimResult};
    use crate::probability::Probabilities;

    /// Randomized sampler drawing independent shots from the distribution.
    #[derive(Debug, Clone)]
    pub struct ShotSampler {
        rng: StdRng,
    }

    impl ShotSampler {
        /// Sampler seeded from the operating system's entropy source.
        pub fn from_entropy() -> Self {
            Self {
                rng: StdRng::from_entropy(),
            }
        }

        /// Sampler with a fixed seed, for reproducible runs.
        pub fn seeded(seed: u64) -> Self {
            Self {
                rng: StdRng::seed_from_u64(seed),
            }
        }

        /// Draw `shots` outcomes.
        ///
        /// The result sums to `shots` and only contains outcomes present
        /// in `probabilities`. Empty counts for `shots == 0`; an empty or
        /// non-finite distribution is an error.
        pub fn sample(&mut self, probabilities: &Probabilities, shots: u64) -> SimResult<Counts> {
            if shots == 0 {
                return Ok(Counts::new());
            }
            let (keys, weights): (Vec<&str>, Vec<f64>) = probabilities.iter().unzip();
            let dist = WeightedIndex::new(&weights).map_err(|e| SimError::SamplingFailed {
                reason: e.to_string(),
            })?;

            let mut tally = vec![0_u64; keys.len()];
            for _ in 0..shots {
                tally[dist.sample(&mut self.rng)] += 1;
            }

            Ok(keys
                .into_iter()
                .zip(tally)
                .map(|(key, count)| (key.to_string(), count))
                .collect())
        }
    }
}
