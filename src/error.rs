use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::frequency::ShapeError;

#[derive(Debug, Error)]
#[error("Expected {expected} {location} but observed: {observed}")]
pub struct ParseError {
    expected: &'static str,
    observed: String,
    location: Location,
}

#[derive(Debug)]
pub enum Location {
    Unknown,
    Item { type_: &'static str, index: usize },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unknown => write!(f, "at unknown location"),
            Location::Item { type_, index } => {
                write!(f, "for item of type {} at index {}", type_, index)
            }
        }
    }
}

impl ParseError {
    pub fn somewhere(expected: &'static str, observed: String) -> Self {
        Self {
            expected,
            observed,
            location: Location::Unknown,
        }
    }

    pub fn item(
        type_: &'static str,
        index: usize,
        expected: &'static str,
        observed: String,
    ) -> Self {
        let location = Location::Item { type_, index };
        Self {
            observed,
            expected,
            location,
        }
    }
}

#[derive(Debug, Error)]
pub struct FileError {
    path: Option<PathBuf>,
    #[source]
    source: FileErrorSource,
}

impl FileError {
    pub fn io<P: AsRef<Path>>(path: Option<P>, error: std::io::Error) -> Self {
        Self {
            path: path.map(|p| p.as_ref().to_path_buf()),
            source: error.into(),
        }
    }

    pub fn parse<P: AsRef<Path>>(path: Option<P>, error: ParseError) -> Self {
        Self {
            path: path.map(|p| p.as_ref().to_path_buf()),
            source: error.into(),
        }
    }

    pub fn csv<P: AsRef<Path>>(path: Option<P>, error: csv::Error) -> Self {
        Self {
            path: path.map(|p| p.as_ref().to_path_buf()),
            source: error.into(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "Failed to work with file {}", path.display()),
            None => write!(f, "Failed to work with anonymous file"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FileErrorSource {
    #[error("Failed to parse file")]
    Parse {
        #[from]
        source: ParseError,
    },
    #[error("Failed to read/write to file")]
    IO {
        #[from]
        source: std::io::Error,
    },
    #[error("Failed to read/write table")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

/// Structural problems of a single alignment. These are local to the alignment
/// and never abort a whole run.
#[derive(Debug, Error)]
pub enum AlignmentError {
    #[error("Alignment {name} contains no sequences")]
    Empty { name: String },
    #[error("Alignment {name} has no aligned columns")]
    NoColumns { name: String },
    #[error("Alignment {name} is not rectangular")]
    Shape {
        name: String,
        #[source]
        source: ShapeError,
    },
}

/// Catch-all error for top-level API
#[derive(Debug, Error)]
pub enum MsamutError {
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    FileError(#[from] FileError),
    #[error(transparent)]
    AlignmentError(#[from] AlignmentError),
    #[error("Failed to set up worker threads")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
