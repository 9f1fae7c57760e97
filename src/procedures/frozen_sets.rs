use crate::error::{ConfigurationError, Result};
use crate::index_pool::IndexPool;

use super::{FoldLayout, IterationSet};

/// Externally supplied folds: `folds[iteration][fold]` lists the test indices of that fold.
///
/// The lists are used as given. Test sets that overlap within one iteration lead to train sets
/// with duplicates or with test instances in them; `IterationSet::consistency_warnings` reports
/// those cases but nothing is corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrozenSets {
    folds: Vec<Vec<Vec<usize>>>,
}

impl FrozenSets {
    pub fn new(folds: Vec<Vec<Vec<usize>>>) -> Self {
        FrozenSets { folds }
    }

    pub fn folds(&self) -> &[Vec<Vec<usize>>] {
        &self.folds
    }

    pub fn num_iter(&self) -> usize {
        self.folds.len()
    }

    /// number of folds in the first iteration
    pub fn num_folds(&self) -> usize {
        self.folds.first().map(|inner| inner.len()).unwrap_or(0)
    }

    /// check the shape against `num_iter` x `num_folds` and every index against `0..n`
    pub fn validate(&self, n: usize, num_iter: usize, num_folds: usize) -> Result<()> {
        if self.folds.len() != num_iter {
            return Err(ConfigurationError::IterationShape {
                expected: num_iter,
                found: self.folds.len(),
            }
            .into());
        }

        let pool = IndexPool::new(n);
        for (iteration, inner) in self.folds.iter().enumerate() {
            if inner.len() != num_folds {
                return Err(ConfigurationError::FoldShape {
                    iteration,
                    expected: num_folds,
                    found: inner.len(),
                }
                .into());
            }
            for &i in inner.iter().flat_map(|test| test.iter()) {
                pool.check(i)?;
            }
        }

        Ok(())
    }

    /// wrap the folds verbatim, after validating them
    pub fn to_iteration_set(&self, n: usize, num_iter: usize, num_folds: usize) -> Result<IterationSet> {
        self.validate(n, num_iter, num_folds)?;
        let layouts = self
            .folds
            .iter()
            .cloned()
            .map(FoldLayout::Explicit)
            .collect();
        Ok(IterationSet::new(n, num_folds, layouts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedures::Procedure;

    #[test]
    fn shape_is_checked() {
        let frozen = FrozenSets::new(vec![vec![vec![0, 1], vec![2, 3]]]);
        assert!(frozen.validate(4, 1, 2).is_ok());
        assert!(frozen.validate(4, 2, 2).is_err());
        assert!(frozen.validate(4, 1, 3).is_err());
        assert!(frozen.validate(3, 1, 2).is_err());
    }

    #[test]
    fn duplicated_test_index_is_kept() {
        let frozen = FrozenSets::new(vec![vec![vec![0, 1], vec![0, 2], vec![3]]]);
        let set = frozen.to_iteration_set(4, 1, 3).unwrap();

        assert_eq!(set.split(0, 0).testset, vec![0, 1]);
        assert_eq!(set.split(0, 0).trainset, vec![0, 2, 3]);
        assert_eq!(set.split(0, 1).trainset, vec![0, 1, 3]);
        assert_eq!(set.split(0, 2).trainset, vec![0, 1, 0, 2]);
        assert_eq!(set.consistency_warnings().len(), 3);
    }

    #[test]
    fn json_shape() {
        let frozen: FrozenSets = serde_json::from_str("[[[0, 2], [1, 3]]]").unwrap();
        assert_eq!(frozen.num_iter(), 1);
        assert_eq!(frozen.num_folds(), 2);
        assert_eq!(serde_json::to_string(&frozen).unwrap(), "[[[0,2],[1,3]]]");
    }
}
