//! File operations
//!
//! Buffered copy with permission and timestamp preservation, plus
//! content hashing for post-copy verification.

use crate::error::{IoResultExt, LvConfError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Copy operation statistics
#[derive(Debug, Clone, Default)]
pub struct CopyStats {
    /// Bytes copied
    pub bytes_copied: u64,
    /// Duration of the copy
    pub duration: Duration,
}

/// Buffer size for copy and hash I/O
const BUFFER_SIZE: usize = 64 * 1024;

/// Options for file copy operations
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Preserve file permissions
    pub preserve_permissions: bool,
    /// Preserve modification and access time
    pub preserve_times: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            preserve_times: true,
        }
    }
}

/// File copier that overwrites the destination
pub struct FileCopier {
    options: CopyOptions,
}

impl FileCopier {
    /// Create a new file copier with the given options
    pub fn new(options: CopyOptions) -> Self {
        Self { options }
    }

    /// Create with default options
    pub fn default_copier() -> Self {
        Self::new(CopyOptions::default())
    }

    /// Copy a file from source to destination, replacing any existing file
    pub fn copy(&self, source: &Path, dest: &Path) -> Result<CopyStats> {
        let metadata = std::fs::metadata(source).with_path(source)?;
        self.copy_with_metadata(source, &metadata, dest)
    }

    /// Same as [`FileCopier::copy`] with the source metadata already read
    pub fn copy_with_metadata(
        &self,
        source: &Path,
        metadata: &std::fs::Metadata,
        dest: &Path,
    ) -> Result<CopyStats> {
        let start = Instant::now();

        if !metadata.is_file() {
            return Err(LvConfError::SourceNotFound(source.to_path_buf()));
        }

        // Opening dest for writing would truncate the source
        ensure_distinct(source, dest)?;

        if let Some(parent) = dest.parent() {
            ensure_dir(parent)?;
        }

        let bytes_copied = self.copy_buffered(source, dest)?;

        if self.options.preserve_permissions {
            std::fs::set_permissions(dest, metadata.permissions()).with_path(dest)?;
        }

        if self.options.preserve_times {
            copy_times(metadata, dest)?;
        }

        Ok(CopyStats {
            bytes_copied,
            duration: start.elapsed(),
        })
    }

    fn copy_buffered(&self, source: &Path, dest: &Path) -> Result<u64> {
        let src_file = File::open(source).with_path(source)?;
        let dst_file = File::create(dest).with_path(dest)?;

        let mut reader = BufReader::with_capacity(BUFFER_SIZE, src_file);
        let mut writer = BufWriter::with_capacity(BUFFER_SIZE, dst_file);

        let bytes_copied = std::io::copy(&mut reader, &mut writer).with_path(dest)?;
        writer.flush().with_path(dest)?;

        Ok(bytes_copied)
    }
}

/// Fail when `dest` is the same file as `source` (symlink, hard link, same path)
pub fn ensure_distinct(source: &Path, dest: &Path) -> Result<()> {
    if !dest.exists() {
        return Ok(());
    }
    if same_file::is_same_file(source, dest).with_path(dest)? {
        return Err(LvConfError::SameSourceAndDestination(dest.to_path_buf()));
    }
    Ok(())
}

fn copy_times(metadata: &std::fs::Metadata, dest: &Path) -> Result<()> {
    let mtime = filetime::FileTime::from_last_modification_time(metadata);
    let atime = filetime::FileTime::from_last_access_time(metadata);
    filetime::set_file_times(dest, atime, mtime).with_path(dest)
}

/// Create `dir` and its parents; returns whether anything was created
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir).with_path(dir)?;
    tracing::debug!("Created directory {:?}", dir);
    Ok(true)
}

/// XXH3-128 digest of a file as lowercase hex
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).with_path(path)?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = xxhash_rust::xxh3::Xxh3::new();
    let mut buf = [0u8; 16 * 1024];

    loop {
        let n = reader.read(&mut buf).with_path(path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:032x}", hasher.digest128()))
}

/// Check whether two files have identical content
pub fn files_match(a: &Path, b: &Path) -> Result<bool> {
    let a_len = std::fs::metadata(a).with_path(a)?.len();
    let b_len = std::fs::metadata(b).with_path(b)?.len();
    if a_len != b_len {
        return Ok(false);
    }
    Ok(hash_file(a)? == hash_file(b)?)
}
