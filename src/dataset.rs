use crate::error::{ConfigurationError, Result};
use crate::procedures::Split;

/// Instances and optional labels of equal length
#[derive(Debug, Clone)]
pub struct DataSet<X, Y> {
    x: Vec<X>,
    y: Option<Vec<Y>>,
}

/// Train and test views of a data set for one split
#[derive(Debug)]
pub struct FoldData<'a, X, Y> {
    pub x_train: Vec<&'a X>,
    pub x_test: Vec<&'a X>,
    pub y_train: Option<Vec<&'a Y>>,
    pub y_test: Option<Vec<&'a Y>>,
}

impl<X, Y> DataSet<X, Y> {
    pub fn new(x: Vec<X>, y: Option<Vec<Y>>) -> Result<Self> {
        if let Some(ref y) = y {
            if y.len() != x.len() {
                return Err(ConfigurationError::LengthMismatch {
                    x: x.len(),
                    y: y.len(),
                }
                .into());
            }
        }
        Ok(DataSet { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn is_labeled(&self) -> bool {
        self.y.is_some()
    }

    pub fn x(&self) -> &[X] {
        &self.x
    }

    pub fn y(&self) -> Option<&[Y]> {
        self.y.as_ref().map(|y| &y[..])
    }

    /// select the rows of `split`, keeping the order of its index lists
    pub fn fold_data(&self, split: &Split) -> FoldData<'_, X, Y> {
        let select_x = |rows: &[usize]| rows.iter().map(|&i| &self.x[i]).collect();
        let select_y = |rows: &[usize]| {
            self.y
                .as_ref()
                .map(|y| rows.iter().map(|&i| &y[i]).collect())
        };

        FoldData {
            x_train: select_x(&split.trainset),
            x_test: select_x(&split.testset),
            y_train: select_y(&split.trainset),
            y_test: select_y(&split.testset),
        }
    }
}

#[test]
fn length_mismatch() {
    assert!(DataSet::new(vec![1, 2, 3], Some(vec!['a', 'b'])).is_err());
    assert!(DataSet::<_, char>::new(vec![1, 2, 3], None).is_ok());
}

#[test]
fn split_selection() {
    let data = DataSet::new(vec![10, 11, 12, 13], Some(vec!['a', 'b', 'c', 'd'])).unwrap();
    let split = Split {
        trainset: vec![3, 0, 3],
        testset: vec![2],
    };
    let fold = data.fold_data(&split);
    assert_eq!(fold.x_train, vec![&13, &10, &13]);
    assert_eq!(fold.x_test, vec![&12]);
    assert_eq!(fold.y_train, Some(vec![&'d', &'a', &'d']));
    assert_eq!(fold.y_test, Some(vec![&'c']));
}
