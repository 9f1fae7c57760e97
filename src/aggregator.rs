//! Aggregators reduce the per-fold results of one cross-validation call to a single value, such as
//! the mean score that a parameter search optimizes.

use num_traits::AsPrimitive;

/// Trait implemented by reductions over per-fold results
///
/// Results arrive flattened in (iteration, fold) order. Any `Fn(Vec<R>) -> O` is an aggregator.
pub trait Aggregator<R> {
    type Output;

    fn aggregate(&self, results: Vec<R>) -> Self::Output;
}

impl<R, O, F> Aggregator<R> for F
where
    F: Fn(Vec<R>) -> O,
{
    type Output = O;

    fn aggregate(&self, results: Vec<R>) -> O {
        self(results)
    }
}

/// Per-fold results that carry a scalar score
pub trait Score {
    fn score(&self) -> f64;
}

impl<T> Score for T
where
    T: AsPrimitive<f64>,
{
    #[inline(always)]
    fn score(&self) -> f64 {
        self.as_()
    }
}

/// A scalar score with an auxiliary payload, e.g. predictions kept for later inspection
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<A> {
    pub primary: f64,
    pub aux: A,
}

impl<A> Score for Scored<A> {
    #[inline(always)]
    fn score(&self) -> f64 {
        self.primary
    }
}

/// Arithmetic mean over all `num_iter * num_folds` scores
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

/// Smallest score
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

/// Largest score
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

/// Mean score as primary value, all results as payload
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAndList;

/// All results, unreduced
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

fn mean<R: Score>(results: &[R]) -> f64 {
    let sum: f64 = results.iter().map(Score::score).sum();
    sum / results.len() as f64
}

/// a NaN score makes the result NaN, as it does for `Mean`
fn extremum<R: Score>(results: &[R], init: f64, pick: fn(f64, f64) -> f64) -> f64 {
    results.iter().map(Score::score).fold(init, |acc, s| {
        if acc.is_nan() || s.is_nan() {
            f64::NAN
        } else {
            pick(acc, s)
        }
    })
}

impl<R: Score> Aggregator<R> for Mean {
    type Output = f64;

    fn aggregate(&self, results: Vec<R>) -> f64 {
        mean(&results)
    }
}

impl<R: Score> Aggregator<R> for Min {
    type Output = f64;

    fn aggregate(&self, results: Vec<R>) -> f64 {
        extremum(&results, f64::INFINITY, f64::min)
    }
}

impl<R: Score> Aggregator<R> for Max {
    type Output = f64;

    fn aggregate(&self, results: Vec<R>) -> f64 {
        extremum(&results, f64::NEG_INFINITY, f64::max)
    }
}

impl<R: Score> Aggregator<R> for MeanAndList {
    type Output = Scored<Vec<R>>;

    fn aggregate(&self, results: Vec<R>) -> Scored<Vec<R>> {
        Scored {
            primary: mean(&results),
            aux: results,
        }
    }
}

impl<R> Aggregator<R> for Identity {
    type Output = Vec<R>;

    fn aggregate(&self, results: Vec<R>) -> Vec<R> {
        results
    }
}
