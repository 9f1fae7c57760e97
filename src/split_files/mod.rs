//! Read and write external fold specifications.
//!
//! Two formats are supported: OpenML style ARFF split files with one `(type, rowid, repeat, fold)`
//! row per instance and split, and plain JSON `[[[usize]]]` arrays as produced by
//! `FrozenSets::save_json`.

mod api_types;
mod file_lock;

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{ConfigurationError, Result};
use crate::procedures::FrozenSets;

use self::api_types::{SplitItem, TrainTest};
use self::file_lock::{ExclusiveLock, SharedLock};

impl FrozenSets {
    /// Parse an ARFF split file. Only `TEST` rows are used; train sets are always derived from
    /// the test sets of the other folds.
    ///
    /// A `repeat` or `fold` value must be smaller than the number of rows in the file.
    pub fn from_arff_str(raw: &str) -> Result<Self> {
        let data: Vec<SplitItem> = arff::from_str(raw)?;

        let rows = data.len();
        let mut folds: Vec<Vec<Vec<usize>>> = vec![];
        let mut n_train = 0;
        for item in data {
            if item.repeat >= rows || item.fold >= rows {
                return Err(ConfigurationError::SplitOutOfRange {
                    repeat: item.repeat,
                    fold: item.fold,
                    rows,
                }
                .into());
            }
            if item.repeat >= folds.len() {
                folds.resize(item.repeat + 1, vec![]);
            }
            let rep = &mut folds[item.repeat];

            if item.fold >= rep.len() {
                rep.resize(item.fold + 1, vec![]);
            }

            match item.purpose {
                TrainTest::Train => n_train += 1,
                TrainTest::Test => rep[item.fold].push(item.rowid),
            }
        }
        debug!("Ignored {} TRAIN rows of split file", n_train);

        Ok(FrozenSets::new(folds))
    }

    pub fn from_arff_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading split file {}", path.as_ref().display());
        FrozenSets::from_arff_str(&read_shared(path.as_ref())?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading folds from {}", path.as_ref().display());
        Ok(serde_json::from_str(&read_shared(path.as_ref())?)?)
    }

    /// Write the folds as JSON, replacing any previous content of `path`.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        info!("Saving folds to {}", path.display());

        let f = OpenOptions::new().create(true).write(true).open(path)?;
        let mut file = ExclusiveLock::new(f)?;
        file.truncate()?;
        serde_json::to_writer(&mut file, self)?;
        file.flush()?;
        Ok(())
    }
}

fn read_shared(path: &Path) -> Result<String> {
    let mut file = SharedLock::new(File::open(path)?)?;
    let mut data = String::new();
    file.read_to_string(&mut data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::process;

    const SPLITS: &str = "@relation splits

@attribute type {TRAIN,TEST}
@attribute rowid numeric
@attribute repeat numeric
@attribute fold numeric

@data
TRAIN,2,0,0
TRAIN,3,0,0
TEST,0,0,0
TEST,1,0,0
TRAIN,0,0,1
TRAIN,1,0,1
TEST,3,0,1
TEST,2,0,1
TEST,1,1,0
TEST,0,1,1
TEST,2,1,1
TEST,3,1,0
";

    #[test]
    fn arff_test_rows_become_folds() {
        let frozen = FrozenSets::from_arff_str(SPLITS).unwrap();
        assert_eq!(
            frozen.folds(),
            &[
                vec![vec![0, 1], vec![3, 2]],
                vec![vec![1, 3], vec![0, 2]],
            ][..]
        );
    }

    #[test]
    fn arff_huge_repeat_is_rejected() {
        let raw = SPLITS.replace("TEST,3,1,0", "TEST,3,1000000000,0");
        match FrozenSets::from_arff_str(&raw) {
            Err(crate::error::Error::Configuration(ConfigurationError::SplitOutOfRange {
                repeat: 1000000000,
                fold: 0,
                rows: 12,
            })) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn json_file_round_trip() {
        let path = env::temp_dir().join(format!("crossval-folds-{}.json", process::id()));
        let frozen = FrozenSets::new(vec![vec![vec![4, 0], vec![1, 3, 2]]]);

        FrozenSets::new(vec![vec![vec![0; 20]]]).save_json(&path).unwrap();
        frozen.save_json(&path).unwrap();
        let loaded = FrozenSets::from_json_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, frozen);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        match FrozenSets::from_json_file("/nonexistent/crossval/folds.json") {
            Err(crate::error::Error::IoError(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
