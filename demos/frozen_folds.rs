extern crate crossval;
extern crate log;
extern crate simple_logger;

use std::convert::Infallible;
use std::env;

use crossval::{unsupervised, CrossValidation, FrozenSets, Max};
use log::Level;

const SPLITS: &str = "@relation splits

@attribute type {TRAIN,TEST}
@attribute rowid numeric
@attribute repeat numeric
@attribute fold numeric

@data
TEST,0,0,0
TEST,1,0,0
TEST,2,0,1
TEST,3,0,1
TEST,4,0,2
TEST,5,0,2
TEST,0,0,2
";

fn main() {
    simple_logger::init_with_level(Level::Info).unwrap();

    // the last row puts instance 0 into two test sets; the run goes ahead with a warning
    let folds = match env::args().nth(1) {
        Some(path) => FrozenSets::from_arff_file(path).unwrap(),
        None => FrozenSets::from_arff_str(SPLITS).unwrap(),
    };

    let cv = CrossValidation::new()
        .folds(folds)
        .aggregator(Max)
        .bind_unlabeled(
            vec![1.0, 4.0, 2.0, 8.0, 5.0, 7.0],
            unsupervised(|train: &[&f64], test: &[&f64], _: &()| {
                let mean = train.iter().map(|&&x| x).sum::<f64>() / train.len() as f64;
                let err = test.iter().map(|&&x| (x - mean).abs()).sum::<f64>();
                Ok::<_, Infallible>(err / test.len() as f64)
            }),
        )
        .unwrap();

    for warning in cv.warnings() {
        println!("warning: {}", warning);
    }

    println!("worst fold error: {:.3}", cv.call(&()).unwrap());

    let path = env::temp_dir().join("crossval-frozen.json");
    cv.folds().to_frozen_sets().save_json(&path).unwrap();
    println!("folds saved to {}", path.display());
}
