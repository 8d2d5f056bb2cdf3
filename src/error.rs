/// Error types shared by the loader, the flag store and the configuration layer.
///
/// Synchronization bugs between the registry, the list and the collection are
/// not represented here: those panic, since the view model is broken.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("Duplicate curve name: {0}")]
    DuplicateName(String),
    #[error("No spectra found in {}", .0.display())]
    EmptyCollection(PathBuf),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ViewerError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ViewerError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
