use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Source of randomness for question order.
///
/// `Random` draws from the thread RNG. `Seeded` yields the same permutation for the
/// same seed and input length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shuffler {
    #[default]
    Random,
    Seeded(u64),
}

impl Shuffler {
    /// Returns a uniformly permuted copy of `items`; the input is left untouched.
    #[must_use]
    pub fn shuffle<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        match self {
            Shuffler::Random => out.shuffle(&mut rand::rng()),
            Shuffler::Seeded(seed) => out.shuffle(&mut StdRng::seed_from_u64(*seed)),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<u32>) -> Vec<u32> {
        v.sort_unstable();
        v
    }

    #[test]
    fn shuffle_is_a_permutation_for_small_sizes() {
        for n in 0..=12u32 {
            let input: Vec<u32> = (0..n).map(|i| i % 4).collect();
            for shuffler in [Shuffler::Random, Shuffler::Seeded(u64::from(n))] {
                let out = shuffler.shuffle(&input);
                assert_eq!(out.len(), input.len());
                assert_eq!(sorted(out), sorted(input.clone()));
            }
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec![1, 2, 3, 4, 5];
        let _ = Shuffler::Random.shuffle(&input);
        assert_eq!(input, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let input: Vec<u32> = (0..20).collect();
        let a = Shuffler::Seeded(7).shuffle(&input);
        let b = Shuffler::Seeded(7).shuffle(&input);
        assert_eq!(a, b);
    }

    #[test]
    fn random_shuffle_reaches_every_position() {
        // Each element of a 3-slice should land first at least once in 300 draws.
        let input = [0u8, 1, 2];
        let mut seen = [false; 3];
        for _ in 0..300 {
            let out = Shuffler::Random.shuffle(&input);
            seen[usize::from(out[0])] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
