//! Size-based log file rotation.
//!
//! When a write would take the file to `max_bytes` or beyond, `file.N-1`
//! becomes `file.N` down to `file` becoming `file.1`, and writing continues
//! in a fresh file. Rotation is off when either limit is zero.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Log file that rotates itself by size
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backup_count: u32,
    file: File,
    size: u64,
}

impl RotatingFile {
    /// Open `path` for appending, creating it and its parent directory if needed
    pub fn open(path: impl AsRef<Path>, max_bytes: u64, backup_count: u32) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            file,
            size,
        })
    }

    /// Path of the `index`-th backup
    fn backup_path(&self, index: u32) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.max_bytes > 0
            && self.backup_count > 0
            && self.size > 0
            && self.size + incoming as u64 >= self.max_bytes
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        for index in (1..self.backup_count).rev() {
            let source = self.backup_path(index);
            if source.exists() {
                fs::rename(&source, self.backup_path(index + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.size = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate(buf.len()) {
            self.rotate()?;
        }
        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
