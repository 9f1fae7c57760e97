use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;
use std::result::Result as StdResult;

use arff::Error as ArffError;
use serde_json::Error as JsonError;

pub type Result<T> = StdResult<T, Error>;

#[derive(Debug)]
pub enum Error {
    Configuration(ConfigurationError),
    IoError(IoError),
    JsonError(JsonError),
    ArffError(ArffError),
}

/// Invalid fold, cluster or stratum parameters. Always raised before any fold is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    TooFewFolds { num_folds: usize },
    TooManyFolds { num_folds: usize, n: usize },
    NoIterations,
    IndexOutOfRange { index: usize, n: usize },
    OverlappingClusters { index: usize, first: usize, second: usize },
    LengthMismatch { x: usize, y: usize },
    IterationShape { expected: usize, found: usize },
    FoldShape { iteration: usize, expected: usize, found: usize },
    SplitOutOfRange { repeat: usize, fold: usize, rows: usize },
    LabelsRequired,
    LabelsUnexpected,
}

/// Non-fatal problems of an externally supplied fold specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyWarning {
    DuplicateInTrain { iteration: usize, fold: usize, index: usize },
    TrainTestOverlap { iteration: usize, fold: usize, index: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Configuration(ref e) => write!(f, "configuration error: {}", e),
            Error::IoError(ref e) => write!(f, "i/o error: {}", e),
            Error::JsonError(ref e) => write!(f, "json error: {}", e),
            Error::ArffError(ref e) => write!(f, "arff error: {:?}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::Configuration(ref e) => Some(e),
            Error::IoError(ref e) => Some(e),
            Error::JsonError(ref e) => Some(e),
            Error::ArffError(_) => None,
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigurationError::TooFewFolds { num_folds } => {
                write!(f, "at least 2 folds are required, got {}", num_folds)
            }
            ConfigurationError::TooManyFolds { num_folds, n } => {
                write!(f, "cannot split {} instances into {} folds", n, num_folds)
            }
            ConfigurationError::NoIterations => write!(f, "at least one iteration is required"),
            ConfigurationError::IndexOutOfRange { index, n } => {
                write!(f, "index {} is out of range for {} instances", index, n)
            }
            ConfigurationError::OverlappingClusters {
                index,
                first,
                second,
            } => write!(
                f,
                "index {} belongs to clusters {} and {}",
                index, first, second
            ),
            ConfigurationError::LengthMismatch { x, y } => {
                write!(f, "{} instances but {} labels", x, y)
            }
            ConfigurationError::IterationShape { expected, found } => {
                write!(f, "expected {} iterations of folds, got {}", expected, found)
            }
            ConfigurationError::FoldShape {
                iteration,
                expected,
                found,
            } => write!(
                f,
                "expected {} folds in iteration {}, got {}",
                expected, iteration, found
            ),
            ConfigurationError::SplitOutOfRange { repeat, fold, rows } => write!(
                f,
                "split file row with repeat {} fold {} is out of range for {} rows",
                repeat, fold, rows
            ),
            ConfigurationError::LabelsRequired => {
                write!(f, "the evaluation uses labels but none were supplied")
            }
            ConfigurationError::LabelsUnexpected => {
                write!(f, "labels were supplied but the evaluation does not use them")
            }
        }
    }
}

impl StdError for ConfigurationError {}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConsistencyWarning::DuplicateInTrain {
                iteration,
                fold,
                index,
            } => write!(
                f,
                "iteration {} fold {}: index {} appears more than once in the train set",
                iteration, fold, index
            ),
            ConsistencyWarning::TrainTestOverlap {
                iteration,
                fold,
                index,
            } => write!(
                f,
                "iteration {} fold {}: index {} is in both train and test set",
                iteration, fold, index
            ),
        }
    }
}

impl From<ConfigurationError> for Error {
    fn from(e: ConfigurationError) -> Self {
        Error::Configuration(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::IoError(e)
    }
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Self {
        Error::JsonError(e)
    }
}

impl From<ArffError> for Error {
    fn from(e: ArffError) -> Self {
        Error::ArffError(e)
    }
}
