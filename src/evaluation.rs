//! The evaluation run on every fold.
//!
//! An evaluation receives the train and test instances of one split (plus the labels, if it uses
//! them) and the free parameters of the current call. Closures are wrapped with `supervised` or
//! `unsupervised`:
//!
//! ```
//! use std::convert::Infallible;
//! use crossval::supervised;
//!
//! let mse = supervised(
//!     |_x_train: &[&f64], y_train: &[&f64], _x_test: &[&f64], y_test: &[&f64], _p: &()| {
//!         let mean = y_train.iter().map(|&&y| y).sum::<f64>() / y_train.len() as f64;
//!         let err = y_test.iter().map(|&&y| (y - mean) * (y - mean)).sum::<f64>();
//!         Ok::<_, Infallible>(err / y_test.len() as f64)
//!     },
//! );
//! # let _ = mse;
//! ```

use crate::dataset::FoldData;

/// The part of an evaluation's calling convention that is checked when binding
pub trait Signature {
    /// true if the evaluation takes `y_train` and `y_test`
    fn uses_labels(&self) -> bool;
}

/// Trait implemented by per-fold evaluations
pub trait Evaluation<X, Y, P>: Signature {
    type Output;
    type Error;

    fn evaluate(&self, fold: &FoldData<X, Y>, params: &P) -> Result<Self::Output, Self::Error>;
}

/// Evaluation taking `(x_train, y_train, x_test, y_test, params)`
#[derive(Debug, Clone, Copy)]
pub struct Supervised<F>(pub F);

/// Evaluation taking `(x_train, x_test, params)`
#[derive(Debug, Clone, Copy)]
pub struct Unsupervised<F>(pub F);

pub fn supervised<X, Y, P, R, E, F>(f: F) -> Supervised<F>
where
    F: Fn(&[&X], &[&Y], &[&X], &[&Y], &P) -> Result<R, E>,
{
    Supervised(f)
}

pub fn unsupervised<X, P, R, E, F>(f: F) -> Unsupervised<F>
where
    F: Fn(&[&X], &[&X], &P) -> Result<R, E>,
{
    Unsupervised(f)
}

impl<F> Signature for Supervised<F> {
    fn uses_labels(&self) -> bool {
        true
    }
}

impl<F> Signature for Unsupervised<F> {
    fn uses_labels(&self) -> bool {
        false
    }
}

impl<X, Y, P, R, E, F> Evaluation<X, Y, P> for Supervised<F>
where
    F: Fn(&[&X], &[&Y], &[&X], &[&Y], &P) -> Result<R, E>,
{
    type Output = R;
    type Error = E;

    fn evaluate(&self, fold: &FoldData<X, Y>, params: &P) -> Result<R, E> {
        let y_train = fold.y_train.as_ref().map(|y| &y[..]).unwrap_or(&[]);
        let y_test = fold.y_test.as_ref().map(|y| &y[..]).unwrap_or(&[]);
        (self.0)(&fold.x_train, y_train, &fold.x_test, y_test, params)
    }
}

impl<X, Y, P, R, E, F> Evaluation<X, Y, P> for Unsupervised<F>
where
    F: Fn(&[&X], &[&X], &P) -> Result<R, E>,
{
    type Output = R;
    type Error = E;

    fn evaluate(&self, fold: &FoldData<X, Y>, params: &P) -> Result<R, E> {
        (self.0)(&fold.x_train, &fold.x_test, params)
    }
}
