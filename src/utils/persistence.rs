//! Helpers for files under ~/.dino/ (config and log).

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.dino/ directory path, creating it if needed.
pub fn dino_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".dino");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.dino/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(dino_dir()?.join(filename))
}

/// Open a file in ~/.dino/ for appending, creating it if missing.
pub fn open_append(filename: &str) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_path(filename)?)
}
