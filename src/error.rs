//! Error type shared by the history log, the disk facade and the binary.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The history path does not end in `.json` or `.jsonl`.
    #[error("unsupported history format for {}: use .json or .jsonl history files", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The file exists but its content does not fit the declared format.
    #[error("malformed history in {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error(
        "need at least 2 snapshots in history to run disk report/diff/advise (found {found}). \
         Run `snaplog scan` multiple times first."
    )]
    NotEnoughSnapshots { found: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode history record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not determine data directory for the default history file")]
    NoDataDir,
}

impl Error {
    pub(crate) fn malformed(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Error::Malformed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
