use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, ModelErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum ModelErr {
    /// The configuration file does not exist.
    ConfigNotFound { path: PathBuf },
    /// The configuration file exists but is not valid JSON.
    ConfigParse(serde_json::Error),
    /// The configuration is valid JSON but does not describe a training run.
    InvalidConfig(String),
    Io(io::Error),
    Csv(csv::Error),
    /// A dataset source could not find the requested file.
    DatasetNotFound { path: PathBuf },
    /// The operation requires state that has not been set up (or was flushed).
    Precondition(&'static str),
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    MissingColumn { name: String },
    DuplicateColumn { name: String },
    /// The dataset has no rows to compute statistics over.
    EmptyDataset,
    InvalidInput(String),
}

impl Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigNotFound { path } => {
                write!(f, "config file not found at {}", path.display())
            }
            Self::ConfigParse(e) => write!(f, "invalid config json: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Csv(e) => write!(f, "csv error: {e}"),
            Self::DatasetNotFound { path } => {
                write!(f, "dataset not found at {}", path.display())
            }
            Self::Precondition(msg) => write!(f, "precondition failed: {msg}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} dataset(s)")
            }
            Self::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            Self::MissingColumn { name } => write!(f, "column '{name}' is not in the dataset"),
            Self::DuplicateColumn { name } => write!(f, "column '{name}' appears more than once"),
            Self::EmptyDataset => write!(f, "the dataset has no rows"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for ModelErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConfigParse(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ModelErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ModelErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for ModelErr {
    fn from(value: serde_json::Error) -> Self {
        Self::ConfigParse(value)
    }
}
