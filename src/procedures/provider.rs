use crate::constraints::Constraints;
use crate::error::{ConsistencyWarning, Result};

use super::assigner::generate;
use super::{validate_fold_counts, FrozenSets, IterationSet, Procedure};

/// Everything needed to generate fold layouts, possibly more than once
#[derive(Debug, Clone)]
pub struct FoldPlan {
    constraints: Constraints,
    num_folds: usize,
    num_iter: usize,
    seed: Option<u64>,
}

impl FoldPlan {
    pub fn new(
        constraints: Constraints,
        num_folds: usize,
        num_iter: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        validate_fold_counts(constraints.pool().len(), num_folds, num_iter)?;
        Ok(FoldPlan {
            constraints,
            num_folds,
            num_iter,
            seed,
        })
    }

    /// Generate layouts from `seed + offset`, or from fresh entropy for an unseeded plan.
    pub fn generate(&self, offset: u64) -> IterationSet {
        let seed = self.seed.map(|s| s.wrapping_add(offset));
        generate(&self.constraints, self.num_folds, self.num_iter, seed)
    }
}

/// Where the folds of a cross-validation come from
#[derive(Debug, Clone)]
pub enum FoldSource {
    Generated(FoldPlan),
    Frozen {
        sets: FrozenSets,
        n: usize,
        num_iter: usize,
        num_folds: usize,
    },
}

impl FoldSource {
    pub fn frozen(sets: FrozenSets, n: usize, num_iter: usize, num_folds: usize) -> Self {
        FoldSource::Frozen {
            sets,
            n,
            num_iter,
            num_folds,
        }
    }

    pub fn is_frozen(&self) -> bool {
        match *self {
            FoldSource::Frozen { .. } => true,
            FoldSource::Generated(_) => false,
        }
    }

    /// Build the iteration set: generate it, or validate and wrap the frozen folds. The
    /// consistency warnings of the set are logged and returned with it.
    pub fn iteration_set(&self) -> Result<(IterationSet, Vec<ConsistencyWarning>)> {
        let set = match *self {
            FoldSource::Generated(ref plan) => plan.generate(0),
            FoldSource::Frozen {
                ref sets,
                n,
                num_iter,
                num_folds,
            } => sets.to_iteration_set(n, num_iter, num_folds)?,
        };

        info!(
            "{} {} iteration(s) of {} folds over {} instances",
            if self.is_frozen() { "Using frozen" } else { "Generated" },
            set.num_iter(),
            set.num_folds(),
            set.n()
        );

        let warnings = set.consistency_warnings();
        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok((set, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::resolve;

    #[test]
    fn generated_source_delegates_to_assigner() {
        let plan = FoldPlan::new(Constraints::none(9), 3, 2, Some(5)).unwrap();
        let (set, warnings) = FoldSource::Generated(plan.clone()).iteration_set().unwrap();
        assert_eq!(set, plan.generate(0));
        assert!(warnings.is_empty());
        assert_eq!(set.num_iter(), 2);
        assert_eq!(set.num_folds(), 3);
    }

    #[test]
    fn offset_changes_layout() {
        let c = resolve(30, &[vec![0, 1, 2]], &[]).unwrap();
        let plan = FoldPlan::new(c, 3, 1, Some(5)).unwrap();
        assert_eq!(plan.generate(1), plan.generate(1));
        assert_ne!(plan.generate(0), plan.generate(1));
    }

    #[test]
    fn frozen_source_is_used_verbatim() {
        let sets = FrozenSets::new(vec![vec![vec![3, 0], vec![1, 2]]]);
        let (set, warnings) = FoldSource::frozen(sets.clone(), 4, 1, 2)
            .iteration_set()
            .unwrap();
        assert_eq!(set.to_frozen_sets(), sets);
        assert!(warnings.is_empty());
        assert!(FoldSource::frozen(sets, 4, 2, 2).iteration_set().is_err());
    }

    #[test]
    fn frozen_source_returns_its_warnings() {
        let sets = FrozenSets::new(vec![vec![vec![0, 1], vec![1, 2, 3]]]);
        let (set, warnings) = FoldSource::frozen(sets, 4, 1, 2).iteration_set().unwrap();
        assert!(!warnings.is_empty());
        assert_eq!(warnings, set.consistency_warnings());
    }

    #[test]
    fn invalid_plan_fails_early() {
        assert!(FoldPlan::new(Constraints::none(3), 4, 1, None).is_err());
    }
}
