//! Handing a finished export to its destination
//!
//! An export produces a [`Download`]: a filename, a MIME type and the bytes.
//! A [`DownloadSink`] takes it from there. Sinks own any temporary handle
//! they create and release it before `deliver` returns, on success and on
//! failure alike.

use crate::error::GuideResult;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub const OCTET_STREAM: &str = "application/octet-stream";

/// A file ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn xlsx(filename: String, bytes: Vec<u8>) -> Self {
        Self {
            filename,
            mime: OCTET_STREAM,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Where finished downloads go
pub trait DownloadSink {
    /// Save the download, returning a description of where it went
    fn deliver(&mut self, download: Download) -> GuideResult<String>;
}

/// Saves downloads into a directory
///
/// Bytes are written to a temporary file next to the target and renamed
/// into place, so a failed save never leaves a partial file behind.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            overwrite: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn target(&self, download: &Download) -> PathBuf {
        self.dir.join(&download.filename)
    }

    /// Save and return the final path
    pub fn save(&self, download: Download) -> GuideResult<PathBuf> {
        let target = self.target(&download);
        if !self.overwrite && target.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists (use --force to replace it)", target.display()),
            )
            .into());
        }

        fs::create_dir_all(&self.dir)?;

        // Dropping `temp` on any early return deletes it
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        debug!(temp = %temp.path().display(), bytes = download.len(), "writing download");
        temp.write_all(&download.bytes)?;
        temp.as_file().sync_all()?;

        if self.overwrite {
            temp.persist(&target).map_err(|e| e.error)?;
        } else {
            temp.persist_noclobber(&target).map_err(|e| e.error)?;
        }

        info!(path = %target.display(), mime = download.mime, "download saved");
        Ok(target)
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, download: Download) -> GuideResult<String> {
        let path = self.save(download)?;
        Ok(path.display().to_string())
    }
}

/// Streams downloads into any writer (stdout, a buffer, a pipe)
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DownloadSink for WriterSink<W> {
    fn deliver(&mut self, download: Download) -> GuideResult<String> {
        self.writer.write_all(&download.bytes)?;
        self.writer.flush()?;
        info!(bytes = download.len(), "download streamed");
        Ok(format!("{} ({} bytes)", download.filename, download.len()))
    }
}
