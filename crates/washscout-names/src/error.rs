use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NamesError {
    #[error("failed to read reference list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed reference CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
