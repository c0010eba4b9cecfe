use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl FileError {
    pub fn path(&self) -> &Path {
        match self {
            FileError::Read { path, .. } | FileError::Write { path, .. } => path,
        }
    }
}

/// Reads the whole file at `path` as UTF-8 text.
pub fn read(path: &Path) -> Result<String, FileError> {
    let wrap = |source| FileError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(wrap)?;
    let mut buf = String::new();
    file.read_to_string(&mut buf).map_err(wrap)?;

    Ok(buf)
}

/// Replaces the contents of `path` with `text`, creating the file if needed.
pub fn write(path: &Path, text: &str) -> Result<(), FileError> {
    let wrap = |source| FileError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(wrap)?;
    file.write_all(text.as_bytes()).map_err(wrap)?;
    file.flush().map_err(wrap)?;

    Ok(())
}
