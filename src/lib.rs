//! Cross-validation with constrained folds.
//!
//! Instances are partitioned into folds, each fold is held out once as test set while an
//! evaluation runs on the remaining instances, and the per-fold results are reduced by an
//! aggregator. Folds can keep clusters of instances together, spread strata over the folds, be
//! repeated over several independent iterations, or be supplied from outside (`FrozenSets`).

extern crate arff;
extern crate fs2;
#[macro_use]
extern crate log;
extern crate num_traits;
extern crate rand;
extern crate rand_chacha;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

mod aggregator;
mod constraints;
mod cross_validated;
mod dataset;
mod error;
mod evaluation;
mod index_pool;
mod procedures;
mod runner;
mod split_files;

pub use crate::aggregator::{Aggregator, Identity, Max, Mean, MeanAndList, Min, Score, Scored};
pub use crate::constraints::{resolve, strata_by_labels, Constraints, Unit};
pub use crate::cross_validated::{CrossValidated, CrossValidation};
pub use crate::dataset::{DataSet, FoldData};
pub use crate::error::{ConfigurationError, ConsistencyWarning, Error, Result};
pub use crate::evaluation::{supervised, unsupervised, Evaluation, Signature, Supervised, Unsupervised};
pub use crate::index_pool::IndexPool;
pub use crate::procedures::{
    assign, FoldLayout, FoldPlan, FoldSource, FrozenSets, IterationSet, Procedure, Split,
};

/// Generate folds in one step: resolve `clusters` and `strata` over `n` instances and assign
/// them to `num_folds` folds for `num_iter` iterations.
pub fn generate_folds(
    n: usize,
    num_folds: usize,
    num_iter: usize,
    clusters: &[Vec<usize>],
    strata: &[Vec<usize>],
    seed: Option<u64>,
) -> Result<IterationSet> {
    let constraints = resolve(n, clusters, strata)?;
    assign(&constraints, num_folds, num_iter, seed)
}

pub mod prelude {
    pub use crate::aggregator::{Aggregator, Score};
    pub use crate::evaluation::{Evaluation, Signature};
    pub use crate::procedures::Procedure;
}
