// Replacing a file with its bare MPEG frames

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::probe::{probe, FileStat};
use crate::utils::ByteSource;

const COPY_CHUNK: usize = 64 * 1024;

/// How a file is replaced once its new contents are ready
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Keep the original file next to the new one
    pub keep_backup: bool,
    /// Appended to the original file name to form the backup name
    pub backup_suffix: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            keep_backup: true,
            backup_suffix: ".backup".to_string(),
        }
    }
}

impl RewriteOptions {
    pub fn with_backup(mut self, keep: bool) -> Self {
        self.keep_backup = keep;
        self
    }

    /// Backup path for `path`
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(&self.backup_suffix);
        PathBuf::from(name)
    }
}

/// Write `tag` (if any) followed by the MPEG frames described by `stat`.
///
/// Returns the number of bytes written.
pub fn copy_frames<S, W>(source: &S, stat: &FileStat, tag: Option<&[u8]>, dest: &mut W) -> Result<u64>
where
    S: ByteSource + ?Sized,
    W: Write,
{
    let mut written = 0u64;

    if let Some(tag) = tag {
        dest.write_all(tag)?;
        written += tag.len() as u64;
    }

    let mut buf = vec![0u8; COPY_CHUNK];
    let mut offset = stat.frame_offset();
    let mut remaining = stat.frame_size();

    while remaining > 0 {
        let want = remaining.min(COPY_CHUNK as u64) as usize;
        let n = source.read_at(offset, &mut buf[..want])?;
        if n == 0 {
            return Err(Error::short_read("file ended before the end of its mpeg frames"));
        }

        dest.write_all(&buf[..n])?;
        offset += n as u64;
        remaining -= n as u64;
        written += n as u64;
    }

    dest.flush()?;
    Ok(written)
}

/// Strip every tag from the file at `path`, prefixing `tag` if given.
///
/// The new contents are written to a temporary file in the same
/// directory, given the original's permissions, then renamed over the
/// original. Nothing is changed if any step before the final rename fails.
pub fn rewrite_file(path: &Path, tag: Option<&[u8]>, options: &RewriteOptions) -> Result<FileStat> {
    let original = File::open(path)?;
    let stat = probe(&original)?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let temp = tempfile::Builder::new().prefix("tmp_").tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        copy_frames(&original, &stat, tag, &mut writer)?;
    }
    temp.as_file().set_permissions(original.metadata()?.permissions())?;
    temp.as_file().sync_all()?;
    drop(original);

    if options.keep_backup {
        let backup = options.backup_path(path);
        fs::rename(path, &backup)?;

        if let Err(e) = temp.persist(path) {
            // Put the original back where it was
            if let Err(restore) = fs::rename(&backup, path) {
                tracing::error!(error = %restore, backup = %backup.display(), "could not restore original file");
            }
            return Err(Error::Io(e.error));
        }
        tracing::info!(path = %path.display(), backup = %backup.display(), "replaced file");
    } else {
        temp.persist(path).map_err(|e| Error::Io(e.error))?;
        tracing::info!(path = %path.display(), "replaced file");
    }

    Ok(stat)
}
