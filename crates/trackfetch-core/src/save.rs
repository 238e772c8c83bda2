//! Saving a retrieved payload.
//!
//! [`FileSink`] writes into a `.part` file next to the destination and renames
//! it into place once the bytes are flushed, so a half-written file never sits
//! under the final name. The temp file is removed on every failing path.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::retriever::RetrievalResult;

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Upper bound on `name (n).ext` candidates before giving up.
pub(crate) const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Where a save ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Receives a named payload and presents it to the user as a file.
///
/// Takes the payload by value; it is dropped as soon as the save returns.
pub trait SaveSink {
    fn save(&self, file_name: &str, payload: RetrievalResult) -> io::Result<SavedFile>;
}

/// Saves into a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    overwrite: bool,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: false,
        }
    }

    /// Replace an existing file of the same name instead of picking `name (1).ext`.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn destination(&self, file_name: &str) -> io::Result<PathBuf> {
        let first = self.dir.join(file_name);
        if self.overwrite || !first.exists() {
            return Ok(first);
        }
        let (stem, ext) = split_extension(file_name);
        for n in 1..=MAX_NAME_ATTEMPTS {
            let candidate = match ext {
                Some(ext) => self.dir.join(format!("{} ({}).{}", stem, n, ext)),
                None => self.dir.join(format!("{} ({})", stem, n)),
            };
            if !candidate.exists() {
                return Ok(candidate);
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free file name for {} in {}", file_name, self.dir.display()),
        ))
    }
}

impl SaveSink for FileSink {
    fn save(&self, file_name: &str, payload: RetrievalResult) -> io::Result<SavedFile> {
        fs::create_dir_all(&self.dir)?;
        let final_path = self.destination(file_name)?;
        let temp_path = temp_path_for(&final_path);

        let guard = TempFileGuard::new(temp_path.clone());
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(payload.bytes())?;
            file.sync_all()?;
        }
        let bytes = payload.bytes().len() as u64;
        drop(payload);

        fs::rename(&temp_path, &final_path)?;
        guard.disarm();

        tracing::info!(path = %final_path.display(), bytes, "saved payload");
        Ok(SavedFile {
            path: final_path,
            bytes,
        })
    }
}

/// `foo.mp3` -> `foo.mp3.part`
fn temp_path_for(final_path: &Path) -> PathBuf {
    let mut s = final_path.as_os_str().to_os_string();
    s.push(TEMP_SUFFIX);
    PathBuf::from(s)
}

fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    }
}

/// Removes the temp file when dropped unless disarmed.
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = fs::remove_file(&self.path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), "could not remove temp file: {}", e);
                }
            }
        }
    }
}
