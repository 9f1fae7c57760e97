//! Bind an evaluation to a data set and a fold structure.
//!
//! `CrossValidation` collects the fold configuration. `bind` validates it, builds the folds once
//! and returns a `CrossValidated` value whose `call` method runs a complete cross-validation for
//! one set of free parameters:
//!
//! ```
//! use std::convert::Infallible;
//! use crossval::{supervised, CrossValidation};
//!
//! let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|xi| 2.0 * xi + 1.0).collect();
//!
//! let cv = CrossValidation::new()
//!     .num_folds(5)
//!     .seed(3)
//!     .bind(
//!         x,
//!         Some(y),
//!         supervised(|_: &[&f64], _: &[&f64], x_test: &[&f64], y_test: &[&f64], slope: &f64| {
//!             let err: f64 = x_test
//!                 .iter()
//!                 .zip(y_test)
//!                 .map(|(&&x, &&y)| (slope * x + 1.0 - y).abs())
//!                 .sum();
//!             Ok::<_, Infallible>(err / x_test.len() as f64)
//!         }),
//!     )
//!     .unwrap();
//!
//! assert_eq!(cv.call(&2.0).unwrap(), 0.0);
//! assert!(cv.call(&1.5).unwrap() > 0.0);
//! ```

use std::cell::Cell;

use crate::aggregator::{Aggregator, Mean};
use crate::constraints::resolve;
use crate::dataset::DataSet;
use crate::error::{ConfigurationError, ConsistencyWarning, Result};
use crate::evaluation::{Evaluation, Signature};
use crate::procedures::{validate_fold_counts, FoldPlan, FoldSource, FrozenSets, IterationSet};
use crate::runner::run;

const DEFAULT_NUM_FOLDS: usize = 10;
const DEFAULT_NUM_ITER: usize = 1;

/// Fold configuration and aggregator of a cross-validation
#[derive(Debug, Clone)]
pub struct CrossValidation<A = Mean> {
    num_folds: Option<usize>,
    num_iter: Option<usize>,
    strata: Vec<Vec<usize>>,
    clusters: Vec<Vec<usize>>,
    folds: Option<FrozenSets>,
    seed: Option<u64>,
    regenerate_folds: bool,
    aggregator: A,
}

impl CrossValidation<Mean> {
    pub fn new() -> Self {
        CrossValidation {
            num_folds: None,
            num_iter: None,
            strata: vec![],
            clusters: vec![],
            folds: None,
            seed: None,
            regenerate_folds: false,
            aggregator: Mean,
        }
    }
}

impl Default for CrossValidation<Mean> {
    fn default() -> Self {
        CrossValidation::new()
    }
}

impl<A> CrossValidation<A> {
    /// number of folds per iteration; defaults to 10, or to the shape of frozen folds
    pub fn num_folds(mut self, num_folds: usize) -> Self {
        self.num_folds = Some(num_folds);
        self
    }

    /// number of independent re-partitions; defaults to 1, or to the shape of frozen folds
    pub fn num_iter(mut self, num_iter: usize) -> Self {
        self.num_iter = Some(num_iter);
        self
    }

    /// groups of instances to spread over the folds
    pub fn strata(mut self, strata: Vec<Vec<usize>>) -> Self {
        self.strata = strata;
        self
    }

    /// disjoint groups of instances that must share a fold
    pub fn clusters(mut self, clusters: Vec<Vec<usize>>) -> Self {
        self.clusters = clusters;
        self
    }

    /// use these folds instead of generating them
    pub fn folds(mut self, folds: FrozenSets) -> Self {
        self.folds = Some(folds);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// generate new folds on every call instead of once at bind time
    pub fn regenerate_folds(mut self, regenerate: bool) -> Self {
        self.regenerate_folds = regenerate;
        self
    }

    pub fn aggregator<B>(self, aggregator: B) -> CrossValidation<B> {
        CrossValidation {
            num_folds: self.num_folds,
            num_iter: self.num_iter,
            strata: self.strata,
            clusters: self.clusters,
            folds: self.folds,
            seed: self.seed,
            regenerate_folds: self.regenerate_folds,
            aggregator,
        }
    }

    /// Validate the configuration against the data and the evaluation, and build the folds.
    pub fn bind<X, Y, E>(
        self,
        x: Vec<X>,
        y: Option<Vec<Y>>,
        evaluation: E,
    ) -> Result<CrossValidated<X, Y, E, A>>
    where
        E: Signature,
    {
        let data = DataSet::new(x, y)?;
        let n = data.len();

        match (evaluation.uses_labels(), data.is_labeled()) {
            (true, false) => return Err(ConfigurationError::LabelsRequired.into()),
            (false, true) => return Err(ConfigurationError::LabelsUnexpected.into()),
            _ => {}
        }

        let source = match self.folds {
            Some(sets) => {
                let num_iter = self.num_iter.unwrap_or_else(|| sets.num_iter());
                let num_folds = self.num_folds.unwrap_or_else(|| sets.num_folds());
                validate_fold_counts(n, num_folds, num_iter)?;

                if !self.clusters.is_empty() || !self.strata.is_empty() {
                    warn!("Clusters and strata are ignored for frozen folds");
                }
                if self.seed.is_some() {
                    warn!("The seed is ignored for frozen folds");
                }
                FoldSource::frozen(sets, n, num_iter, num_folds)
            }
            None => {
                let constraints = resolve(n, &self.clusters, &self.strata)?;
                FoldSource::Generated(FoldPlan::new(
                    constraints,
                    self.num_folds.unwrap_or(DEFAULT_NUM_FOLDS),
                    self.num_iter.unwrap_or(DEFAULT_NUM_ITER),
                    self.seed,
                )?)
            }
        };

        let (folds, warnings) = source.iteration_set()?;

        let regenerate_folds = self.regenerate_folds && !source.is_frozen();
        if self.regenerate_folds && source.is_frozen() {
            warn!("Frozen folds cannot be regenerated; reusing them on every call");
        }

        Ok(CrossValidated {
            data,
            source,
            folds,
            warnings,
            regenerate_folds,
            calls: Cell::new(0),
            evaluation,
            aggregator: self.aggregator,
        })
    }

    /// `bind` for evaluations that do not use labels
    pub fn bind_unlabeled<X, E>(self, x: Vec<X>, evaluation: E) -> Result<CrossValidated<X, (), E, A>>
    where
        E: Signature,
    {
        self.bind(x, None, evaluation)
    }
}

/// An evaluation bound to its data and folds
///
/// Every `call` evaluates all folds again; nothing is cached between calls.
#[derive(Debug)]
pub struct CrossValidated<X, Y, E, A> {
    data: DataSet<X, Y>,
    source: FoldSource,
    folds: IterationSet,
    warnings: Vec<ConsistencyWarning>,
    regenerate_folds: bool,
    calls: Cell<u64>,
    evaluation: E,
    aggregator: A,
}

impl<X, Y, E, A> CrossValidated<X, Y, E, A> {
    /// Run the cross-validation with the free parameters `params` and aggregate the results.
    ///
    /// An error of the evaluation aborts the call and is returned as is.
    pub fn call<P>(&self, params: &P) -> std::result::Result<A::Output, E::Error>
    where
        E: Evaluation<X, Y, P>,
        A: Aggregator<E::Output>,
    {
        let call = self.calls.get();
        self.calls.set(call + 1);

        let results = match self.source {
            FoldSource::Generated(ref plan) if self.regenerate_folds && call > 0 => {
                debug!("Regenerating folds for call {}", call);
                run(&self.evaluation, &self.data, &plan.generate(call), params)?
            }
            _ => run(&self.evaluation, &self.data, &self.folds, params)?,
        };

        Ok(self.aggregator.aggregate(results))
    }

    /// the folds built at bind time
    pub fn folds(&self) -> &IterationSet {
        &self.folds
    }

    /// problems found in frozen folds
    pub fn warnings(&self) -> &[ConsistencyWarning] {
        &self.warnings
    }

    pub fn data(&self) -> &DataSet<X, Y> {
        &self.data
    }

    /// number of calls so far
    pub fn calls(&self) -> u64 {
        self.calls.get()
    }
}
