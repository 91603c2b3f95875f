use crate::core_error::FtpError;
use log::debug;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs::{self, File, OpenOptions};

/// Result of a stat call on the served filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
    pub size: u64,
    pub modified: SystemTime,
}

/// The flash filesystem, with the virtual `/` mapped onto `root`.
///
/// Every path handed in must already be absolute and normalized by
/// [`crate::core_fs::resolve`], so joining it under `root` cannot escape.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Maps a virtual absolute path onto the host filesystem.
    pub fn real_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    /// Names of the immediate entries of a directory, unsorted.
    pub async fn list_dir(&self, path: &str) -> Result<Vec<String>, FtpError> {
        let real_path = self.real_path(path);
        let mut entries = fs::read_dir(&real_path)
            .await
            .map_err(|e| FtpError::from_io(path, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FtpError::from_io(path, e))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        debug!("Listed {} entries in {:?}", names.len(), real_path);
        Ok(names)
    }

    pub async fn stat(&self, path: &str) -> Result<FileStat, FtpError> {
        let metadata = fs::metadata(self.real_path(path))
            .await
            .map_err(|e| FtpError::from_io(path, e))?;

        Ok(FileStat {
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
        })
    }

    pub async fn is_dir(&self, path: &str) -> bool {
        matches!(self.stat(path).await, Ok(stat) if stat.is_dir)
    }

    pub async fn remove(&self, path: &str) -> Result<(), FtpError> {
        fs::remove_file(self.real_path(path))
            .await
            .map_err(|e| FtpError::from_io(path, e))
    }

    pub async fn rename(&self, from: &str, to: &str) -> Result<(), FtpError> {
        fs::rename(self.real_path(from), self.real_path(to))
            .await
            .map_err(|e| FtpError::from_io(from, e))
    }

    pub async fn mkdir(&self, path: &str) -> Result<(), FtpError> {
        fs::create_dir(self.real_path(path))
            .await
            .map_err(|e| FtpError::from_io(path, e))
    }

    pub async fn rmdir(&self, path: &str) -> Result<(), FtpError> {
        fs::remove_dir(self.real_path(path))
            .await
            .map_err(|e| FtpError::from_io(path, e))
    }

    pub async fn open_read(&self, path: &str) -> Result<File, FtpError> {
        let real_path = self.real_path(path);
        let metadata = fs::metadata(&real_path)
            .await
            .map_err(|e| FtpError::from_io(path, e))?;
        if metadata.is_dir() {
            return Err(FtpError::NotFound(path.to_string()));
        }
        File::open(real_path)
            .await
            .map_err(|e| FtpError::from_io(path, e))
    }

    /// Opens a file for upload, truncating it or appending to it.
    pub async fn open_write(&self, path: &str, append: bool) -> Result<File, FtpError> {
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options
            .open(self.real_path(path))
            .await
            .map_err(|e| FtpError::from_io(path, e))
    }
}
