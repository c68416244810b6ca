use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const BOARD_DIR_NAME: &str = ".kanboard";

/// Get the board directory - checks for local .kanboard first, then falls back to global ~/.kanboard
pub fn get_board_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_board(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(BOARD_DIR_NAME))
}

/// Find local .kanboard directory by walking up the directory tree
fn find_local_board(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let board_dir = current.join(BOARD_DIR_NAME);
        if board_dir.is_dir() {
            return Some(board_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the board directory exists
pub fn ensure_board_dir() -> Result<PathBuf> {
    let dir = get_board_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .kanboard directory in the current directory
pub fn init_local_board() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let board_dir = current_dir.join(BOARD_DIR_NAME);

    if board_dir.exists() {
        anyhow::bail!("Board directory already exists: {}", board_dir.display());
    }

    fs::create_dir_all(&board_dir)
        .with_context(|| format!("Failed to create directory: {}", board_dir.display()))?;

    Ok(board_dir)
}

/// Path of the JSON document backing a store key
pub fn key_file(dir: &Path, key: &str) -> PathBuf {
    let safe: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect();
    dir.join(format!("{}.json", safe))
}

/// Path of config.json inside a board directory
pub fn config_file(dir: &Path) -> PathBuf {
    dir.join("config.json")
}

/// Directory holding rotated log files
pub fn log_dir(dir: &Path) -> PathBuf {
    dir.join("logs")
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
