//! Reduce clusters and strata to a set of atomic placement units.
//!
//! Every cluster collapses into one unit that is always placed as a whole. Instances outside any
//! cluster become singleton units. Strata do not change the units; each unit only remembers how
//! many of its members fall into each stratum, which the fold assigner uses to spread strata over
//! the folds.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::error::{ConfigurationError, Result};
use crate::index_pool::IndexPool;

/// An atomic group of instances that ends up in exactly one fold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    members: Vec<usize>,
    strata: Vec<(usize, usize)>,
}

impl Unit {
    /// member indices in ascending order
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// `(stratum, weight)` pairs, where weight counts the members that belong to the stratum
    pub fn strata(&self) -> &[(usize, usize)] {
        &self.strata
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The reduced assignment problem
#[derive(Debug, Clone)]
pub struct Constraints {
    pool: IndexPool,
    units: Vec<Unit>,
    num_strata: usize,
}

impl Constraints {
    /// no constraints at all: one singleton unit per instance
    pub fn none(n: usize) -> Self {
        Constraints {
            pool: IndexPool::new(n),
            units: (0..n)
                .map(|i| Unit {
                    members: vec![i],
                    strata: vec![],
                })
                .collect(),
            num_strata: 0,
        }
    }

    pub fn pool(&self) -> IndexPool {
        self.pool
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn num_strata(&self) -> usize {
        self.num_strata
    }

    /// true if the units carry neither cluster nor stratum information
    pub fn is_trivial(&self) -> bool {
        self.units
            .iter()
            .all(|u| u.members.len() == 1 && u.strata.is_empty())
    }
}

/// Collapse `clusters` into units and attach `strata` membership to them.
///
/// Fails if an index is outside `0..n` or if two clusters share an index. Strata may overlap
/// each other and the clusters.
pub fn resolve(n: usize, clusters: &[Vec<usize>], strata: &[Vec<usize>]) -> Result<Constraints> {
    let pool = IndexPool::new(n);

    let mut owner: Vec<Option<usize>> = vec![None; n];
    let mut units = Vec::with_capacity(n);

    for (c, cluster) in clusters.iter().enumerate() {
        let mut members = Vec::with_capacity(cluster.len());
        for &i in cluster {
            let i = pool.check(i)?;
            match owner[i] {
                Some(first) if first != c => {
                    return Err(ConfigurationError::OverlappingClusters {
                        index: i,
                        first,
                        second: c,
                    }
                    .into())
                }
                Some(_) => {}
                None => {
                    owner[i] = Some(c);
                    members.push(i);
                }
            }
        }

        if !members.is_empty() {
            members.sort_unstable();
            units.push(members);
        }
    }

    units.extend(pool.iter().filter(|&i| owner[i].is_none()).map(|i| vec![i]));

    let mut strata_of: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (s, stratum) in strata.iter().enumerate() {
        for &i in stratum {
            let i = pool.check(i)?;
            if strata_of[i].last() != Some(&s) {
                strata_of[i].push(s);
            }
        }
    }

    let units = units
        .into_iter()
        .map(|members| {
            let mut weights = BTreeMap::new();
            for &i in &members {
                for &s in &strata_of[i] {
                    *weights.entry(s).or_insert(0) += 1;
                }
            }
            Unit {
                members,
                strata: weights.into_iter().collect(),
            }
        })
        .collect();

    Ok(Constraints {
        pool,
        units,
        num_strata: strata.len(),
    })
}

/// One stratum per distinct label, in order of first appearance.
pub fn strata_by_labels<Y: Eq + Hash>(labels: &[Y]) -> Vec<Vec<usize>> {
    let mut ids = HashMap::new();
    let mut strata: Vec<Vec<usize>> = Vec::new();

    for (i, label) in labels.iter().enumerate() {
        let next = strata.len();
        let s = *ids.entry(label).or_insert(next);
        if s == next {
            strata.push(Vec::new());
        }
        strata[s].push(i);
    }

    strata
}
