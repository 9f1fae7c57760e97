//! Distribute placement units over folds.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constraints::{Constraints, Unit};
use crate::error::{ConfigurationError, Result};

use super::{FoldLayout, IterationSet};

/// Check fold and iteration counts for `n` instances
pub fn validate_fold_counts(n: usize, num_folds: usize, num_iter: usize) -> Result<()> {
    if num_folds < 2 {
        return Err(ConfigurationError::TooFewFolds { num_folds }.into());
    }
    if num_folds > n {
        return Err(ConfigurationError::TooManyFolds { num_folds, n }.into());
    }
    if num_iter < 1 {
        return Err(ConfigurationError::NoIterations.into());
    }
    Ok(())
}

/// Generate `num_iter` independent fold layouts.
///
/// Without clusters or strata every iteration is a uniform random partition with fold sizes that
/// differ by at most one. Otherwise units are placed greedily, largest first, into the fold that
/// (in this order) stays within the target size, holds the fewest members of the unit's strata,
/// is smallest, and has the lowest id. Balance is best effort; the result is always a partition.
///
/// The same `seed` reproduces the same layouts. Without a seed the generator is seeded from the
/// operating system.
pub fn assign(
    constraints: &Constraints,
    num_folds: usize,
    num_iter: usize,
    seed: Option<u64>,
) -> Result<IterationSet> {
    validate_fold_counts(constraints.pool().len(), num_folds, num_iter)?;
    Ok(generate(constraints, num_folds, num_iter, seed))
}

/// `assign` for fold counts that were already validated
pub(crate) fn generate(
    constraints: &Constraints,
    num_folds: usize,
    num_iter: usize,
    seed: Option<u64>,
) -> IterationSet {
    let n = constraints.pool().len();

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let layouts = (0..num_iter)
        .map(|_| {
            let fold_of = if constraints.is_trivial() {
                random_partition(n, num_folds, &mut rng)
            } else {
                greedy_partition(constraints, num_folds, &mut rng)
            };
            FoldLayout::Assigned(fold_of)
        })
        .collect();

    let set = IterationSet::new(n, num_folds, layouts);

    for iteration in 0..num_iter {
        for (fold, test) in set.test_sets(iteration).iter().enumerate() {
            if test.is_empty() {
                warn!("iteration {} fold {} is empty", iteration, fold);
            }
        }
    }

    set
}

fn random_partition<R: Rng>(n: usize, num_folds: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let mut fold_of = vec![0; n];
    for (k, &i) in order.iter().enumerate() {
        fold_of[i] = k % num_folds;
    }
    fold_of
}

fn greedy_partition<R: Rng>(constraints: &Constraints, num_folds: usize, rng: &mut R) -> Vec<usize> {
    let n = constraints.pool().len();
    let units = constraints.units();
    let capacity = (n + num_folds - 1) / num_folds;

    let mut order: Vec<usize> = (0..units.len()).collect();
    order.shuffle(rng);
    order.sort_by(|&a, &b| units[b].len().cmp(&units[a].len()));

    let mut sizes = vec![0usize; num_folds];
    let mut stratum_load = vec![vec![0usize; constraints.num_strata()]; num_folds];
    let mut fold_of = vec![0; n];

    for u in order {
        let unit = &units[u];

        let best = (0..num_folds)
            .min_by_key(|&f| {
                let overflow = sizes[f] + unit.len() > capacity;
                (overflow, conflicts(unit, &stratum_load[f]), sizes[f])
            })
            .unwrap_or(0);

        sizes[best] += unit.len();
        for &(s, w) in unit.strata() {
            stratum_load[best][s] += w;
        }
        for &i in unit.members() {
            fold_of[i] = best;
        }
    }

    fold_of
}

/// weighted number of same-stratum members already in a fold
fn conflicts(unit: &Unit, load: &[usize]) -> usize {
    unit.strata().iter().map(|&(s, w)| w * load[s]).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::resolve;
    use crate::procedures::Procedure;

    fn assert_partition(set: &IterationSet) {
        for iteration in 0..set.num_iter() {
            let mut seen = vec![0; set.n()];
            for test in set.test_sets(iteration) {
                for i in test {
                    seen[i] += 1;
                }
            }
            assert!(seen.iter().all(|&c| c == 1), "{:?}", seen);
        }
    }

    #[test]
    fn rejects_bad_fold_counts() {
        let c = Constraints::none(5);
        assert!(assign(&c, 1, 1, Some(0)).is_err());
        assert!(assign(&c, 6, 1, Some(0)).is_err());
        assert!(assign(&c, 2, 0, Some(0)).is_err());
        assert!(assign(&c, 5, 1, Some(0)).is_ok());
    }

    #[test]
    fn unconstrained_folds_are_balanced() {
        for &(n, k) in &[(10, 3), (7, 7), (100, 10), (23, 4)] {
            let set = assign(&Constraints::none(n), k, 3, Some(7)).unwrap();
            assert_partition(&set);
            for iteration in 0..3 {
                for test in set.test_sets(iteration) {
                    assert!(test.len() == n / k || test.len() == n / k + 1);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_layouts() {
        let c = resolve(20, &[vec![0, 5, 9], vec![3, 4]], &[vec![1, 2, 3, 10, 11]]).unwrap();
        let a = assign(&c, 4, 3, Some(42)).unwrap();
        let b = assign(&c, 4, 3, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn iterations_differ() {
        let set = assign(&Constraints::none(50), 5, 2, Some(1)).unwrap();
        assert_ne!(set.layouts()[0], set.layouts()[1]);
    }

    #[test]
    fn clusters_stay_together() {
        let clusters = vec![vec![0, 1], vec![2, 3]];
        let c = resolve(6, &clusters, &[]).unwrap();
        for seed in 0..20 {
            let set = assign(&c, 3, 2, Some(seed)).unwrap();
            assert_partition(&set);
            for layout in set.layouts() {
                match *layout {
                    FoldLayout::Assigned(ref fold_of) => {
                        assert_eq!(fold_of[0], fold_of[1]);
                        assert_eq!(fold_of[2], fold_of[3]);
                    }
                    FoldLayout::Explicit(_) => panic!("generated layouts are assigned"),
                }
            }
            for test in set.test_sets(0) {
                assert_eq!(test.len(), 2);
            }
        }
    }

    #[test]
    fn strata_are_spread() {
        let strata = vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7, 8, 9, 10, 11]];
        let c = resolve(12, &[], &strata).unwrap();
        for seed in 0..10 {
            let set = assign(&c, 4, 1, Some(seed)).unwrap();
            assert_partition(&set);
            for test in set.test_sets(0) {
                assert_eq!(test.len(), 3);
                assert_eq!(test.iter().filter(|&&i| i < 4).count(), 1);
            }
        }
    }

    #[test]
    fn oversized_cluster_still_partitions() {
        let c = resolve(6, &[vec![0, 1, 2, 3, 4]], &[vec![0, 5]]).unwrap();
        let set = assign(&c, 3, 1, Some(3)).unwrap();
        assert_partition(&set);
        let sizes: Vec<_> = set.test_sets(0).iter().map(|t| t.len()).collect();
        assert_eq!(sizes.iter().filter(|&&s| s == 0).count(), 1);
        assert!(sizes.contains(&5));
    }
}
