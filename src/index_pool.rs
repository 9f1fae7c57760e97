//! The universe of instance positions `0..n`.

use std::ops::Range;

use crate::error::{ConfigurationError, Result};

/// Instance positions of a data set with `n` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPool {
    n: usize,
}

impl IndexPool {
    pub fn new(n: usize) -> Self {
        IndexPool { n }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// return `index` if it addresses an instance of this pool
    pub fn check(&self, index: usize) -> Result<usize> {
        if index < self.n {
            Ok(index)
        } else {
            Err(ConfigurationError::IndexOutOfRange { index, n: self.n }.into())
        }
    }

    pub fn iter(&self) -> Range<usize> {
        0..self.n
    }
}

#[test]
fn check_bounds() {
    let pool = IndexPool::new(3);
    assert_eq!(pool.check(2).unwrap(), 2);
    assert!(pool.check(3).is_err());
    assert_eq!(pool.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
}
