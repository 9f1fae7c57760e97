extern crate crossval;
extern crate log;
extern crate simple_logger;
extern crate time;

use std::convert::Infallible;

use crossval::{strata_by_labels, supervised, CrossValidation, MeanAndList};
use log::Level;
use time::PreciseTime;

/// nearest centroid classifier on a single feature, with a decision threshold shift
fn accuracy(x_train: &[&f64], y_train: &[&bool], x_test: &[&f64], y_test: &[&bool], shift: &f64) -> f64 {
    let centroid = |class: bool| {
        let xs: Vec<f64> = x_train
            .iter()
            .zip(y_train)
            .filter(|&(_, &&y)| y == class)
            .map(|(&&x, _)| x)
            .collect();
        xs.iter().sum::<f64>() / xs.len() as f64
    };
    let threshold = 0.5 * (centroid(true) + centroid(false)) + shift;

    let correct = x_test
        .iter()
        .zip(y_test)
        .filter(|&(&&x, &&y)| (x > threshold) == y)
        .count();
    correct as f64 / x_test.len() as f64
}

fn main() {
    simple_logger::init_with_level(Level::Info).unwrap();

    let x: Vec<f64> = (0..200).map(|i| (i as f64 * 0.37).sin() * 3.0 + (i % 7) as f64).collect();
    let y: Vec<bool> = x.iter().map(|&xi| xi > 3.5).collect();

    let cv = CrossValidation::new()
        .num_folds(5)
        .num_iter(2)
        .strata(strata_by_labels(&y))
        .seed(2018)
        .aggregator(MeanAndList)
        .bind(
            x,
            Some(y),
            supervised(|xtr: &[&f64], ytr: &[&bool], xte: &[&f64], yte: &[&bool], shift: &f64| {
                Ok::<_, Infallible>(accuracy(xtr, ytr, xte, yte, shift))
            }),
        )
        .unwrap();

    let start = PreciseTime::now();

    let mut best = (f64::NAN, f64::NEG_INFINITY);
    for step in -10..=10 {
        let shift = step as f64 * 0.1;
        let result = cv.call(&shift).unwrap();
        println!("shift {:+.1}: accuracy {:.3} over {} folds", shift, result.primary, result.aux.len());
        if result.primary > best.1 {
            best = (shift, result.primary);
        }
    }

    let end = PreciseTime::now();

    println!("best shift {:+.1} with accuracy {:.3}", best.0, best.1);
    println!("search took {} seconds.", start.to(end));
}
