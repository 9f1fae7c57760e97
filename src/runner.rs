use crate::dataset::DataSet;
use crate::evaluation::Evaluation;
use crate::procedures::Procedure;

/// run `evaluation` on every split of `folds`, iterations and folds in increasing order
///
/// The first failing fold aborts the run; its error is returned unchanged and the results of the
/// folds evaluated so far are dropped. Callers check beforehand that the evaluation's use of
/// labels matches `data`; `CrossValidation::bind` does.
pub(crate) fn run<X, Y, P, E, S>(
    evaluation: &E,
    data: &DataSet<X, Y>,
    folds: &S,
    params: &P,
) -> Result<Vec<E::Output>, E::Error>
where
    E: Evaluation<X, Y, P> + ?Sized,
    S: Procedure + ?Sized,
{
    let mut results = Vec::with_capacity(folds.num_iter() * folds.num_folds());

    for (iteration, fold, split) in folds.splits() {
        debug!(
            "Evaluating iteration {} fold {} ({} train, {} test)",
            iteration,
            fold,
            split.trainset.len(),
            split.testset.len()
        );

        let fold_data = data.fold_data(&split);
        match evaluation.evaluate(&fold_data, params) {
            Ok(r) => results.push(r),
            Err(e) => {
                error!(
                    "Evaluation failed in iteration {} fold {}; aborting cross-validation",
                    iteration, fold
                );
                return Err(e);
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{supervised, unsupervised};
    use crate::procedures::FrozenSets;
    use std::cell::RefCell;

    fn frozen(n: usize) -> impl Procedure {
        FrozenSets::new(vec![
            vec![vec![0, 1], vec![2, 3]],
            vec![vec![1, 3], vec![0, 2]],
        ])
        .to_iteration_set(n, 2, 2)
        .unwrap()
    }

    #[test]
    fn results_in_iteration_fold_order() {
        let data = DataSet::<_, ()>::new(vec![10, 20, 30, 40], None).unwrap();
        let seen = RefCell::new(vec![]);
        let eval = unsupervised(|train: &[&i32], test: &[&i32], offset: &i32| {
            seen.borrow_mut().push(test.iter().map(|&&x| x).collect::<Vec<_>>());
            Ok::<_, ()>(train.iter().map(|&&x| x).sum::<i32>() + offset)
        });

        let results = run(&eval, &data, &frozen(4), &1).unwrap();

        assert_eq!(results, vec![71, 31, 41, 61]);
        assert_eq!(
            *seen.borrow(),
            vec![vec![10, 20], vec![30, 40], vec![20, 40], vec![10, 30]]
        );
    }

    #[test]
    fn labels_follow_their_instances() {
        let data = DataSet::new(vec![0, 1, 2, 3], Some(vec!['a', 'b', 'c', 'd'])).unwrap();
        let eval = supervised(
            |x_train: &[&i32], y_train: &[&char], x_test: &[&i32], y_test: &[&char], _: &()| {
                let pairs: Vec<(i32, char)> = x_train
                    .iter()
                    .chain(x_test.iter())
                    .map(|&&x| x)
                    .zip(y_train.iter().chain(y_test.iter()).map(|&&y| y))
                    .collect();
                Ok::<_, ()>(pairs)
            },
        );

        for pairs in run(&eval, &data, &frozen(4), &()).unwrap() {
            for (x, y) in pairs {
                assert_eq!((b'a' + x as u8) as char, y);
            }
        }
    }

    #[test]
    fn first_error_aborts() {
        let data = DataSet::<_, ()>::new(vec![0, 1, 2, 3], None).unwrap();
        let calls = RefCell::new(0);
        let eval = unsupervised(|_: &[&i32], test: &[&i32], _: &()| {
            *calls.borrow_mut() += 1;
            if test.contains(&&2) {
                Err("fold with instance 2")
            } else {
                Ok(1.0)
            }
        });

        assert_eq!(run(&eval, &data, &frozen(4), &()), Err("fold with instance 2"));
        assert_eq!(*calls.borrow(), 2);
    }
}
