use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not read config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not hand {uri} to the desktop")]
    Launch { uri: String },
    #[error("could not set up logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
