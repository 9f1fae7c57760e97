//! Validation procedures: fold layouts and the train/test splits derived from them

mod assigner;
mod frozen_sets;
mod provider;

pub use self::assigner::{assign, validate_fold_counts};
pub use self::frozen_sets::FrozenSets;
pub use self::provider::{FoldPlan, FoldSource};

use crate::error::ConsistencyWarning;

/// Validation procedures support iteration over cross-validation splits
pub trait Procedure {
    fn num_iter(&self) -> usize;

    fn num_folds(&self) -> usize;

    /// the split that holds out `fold` in `iteration`
    fn split(&self, iteration: usize, fold: usize) -> Split;

    /// all splits in increasing (iteration, fold) order
    fn splits<'a>(&'a self) -> Box<dyn Iterator<Item = (usize, usize, Split)> + 'a> {
        let num_folds = self.num_folds();
        let iter = (0..self.num_iter())
            .flat_map(move |i| (0..num_folds).map(move |f| (i, f)))
            .map(move |(i, f)| (i, f, self.split(i, f)));
        Box::new(iter)
    }
}

/// A single cross-validation split, consisting of a training set and a testing set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub trainset: Vec<usize>,
    pub testset: Vec<usize>,
}

/// Fold membership for one iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldLayout {
    /// fold id of every instance; always a partition
    Assigned(Vec<usize>),

    /// test indices of every fold, used verbatim
    Explicit(Vec<Vec<usize>>),
}

impl FoldLayout {
    fn split(&self, fold: usize) -> Split {
        match *self {
            FoldLayout::Assigned(ref fold_of) => {
                let (testset, trainset) = (0..fold_of.len()).partition(|&i| fold_of[i] == fold);
                Split { trainset, testset }
            }
            FoldLayout::Explicit(ref tests) => Split {
                testset: tests[fold].clone(),
                trainset: tests
                    .iter()
                    .enumerate()
                    .filter(|&(f, _)| f != fold)
                    .flat_map(|(_, t)| t.iter().cloned())
                    .collect(),
            },
        }
    }

    fn test_sets(&self, num_folds: usize) -> Vec<Vec<usize>> {
        match *self {
            FoldLayout::Assigned(ref fold_of) => {
                let mut tests = vec![Vec::new(); num_folds];
                for (i, &f) in fold_of.iter().enumerate() {
                    tests[f].push(i);
                }
                tests
            }
            FoldLayout::Explicit(ref tests) => tests.clone(),
        }
    }
}

/// `num_iter` fold layouts over the same `n` instances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationSet {
    n: usize,
    num_folds: usize,
    layouts: Vec<FoldLayout>,
}

impl IterationSet {
    pub(crate) fn new(n: usize, num_folds: usize, layouts: Vec<FoldLayout>) -> Self {
        IterationSet {
            n,
            num_folds,
            layouts,
        }
    }

    /// number of instances
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn layouts(&self) -> &[FoldLayout] {
        &self.layouts
    }

    /// test indices of every fold in `iteration`
    pub fn test_sets(&self, iteration: usize) -> Vec<Vec<usize>> {
        self.layouts[iteration].test_sets(self.num_folds)
    }

    /// export as an external fold specification, e.g. to save it with `FrozenSets::save_json`
    pub fn to_frozen_sets(&self) -> FrozenSets {
        FrozenSets::new(
            (0..self.layouts.len())
                .map(|i| self.test_sets(i))
                .collect(),
        )
    }

    /// duplicate train indices and train/test overlaps of explicit layouts
    pub fn consistency_warnings(&self) -> Vec<ConsistencyWarning> {
        let mut warnings = Vec::new();

        for (iteration, layout) in self.layouts.iter().enumerate() {
            if let FoldLayout::Assigned(_) = *layout {
                continue;
            }

            for fold in 0..self.num_folds {
                let split = layout.split(fold);

                let mut train_count = vec![0usize; self.n];
                for &i in &split.trainset {
                    train_count[i] += 1;
                    if train_count[i] == 2 {
                        warnings.push(ConsistencyWarning::DuplicateInTrain {
                            iteration,
                            fold,
                            index: i,
                        });
                    }
                }

                let mut reported = vec![false; self.n];
                for &i in &split.testset {
                    if train_count[i] > 0 && !reported[i] {
                        reported[i] = true;
                        warnings.push(ConsistencyWarning::TrainTestOverlap {
                            iteration,
                            fold,
                            index: i,
                        });
                    }
                }
            }
        }

        warnings
    }
}

impl Procedure for IterationSet {
    fn num_iter(&self) -> usize {
        self.layouts.len()
    }

    fn num_folds(&self) -> usize {
        self.num_folds
    }

    fn split(&self, iteration: usize, fold: usize) -> Split {
        self.layouts[iteration].split(fold)
    }
}
