//! Local persistence for captured shots.
//!
//! Files are named `screenshot_<unix-seconds>_<position>.png`. Two sessions
//! inside the same second can produce the same base name, so writes use
//! `create_new` and fall back to a numeric suffix instead of overwriting.

use super::CaptureError;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Upper bound on `-<n>` suffixes tried before giving up on a name.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Writes shot images under a single root directory.
#[derive(Debug, Clone)]
pub struct ShotStore {
    root: PathBuf,
}

impl ShotStore {
    /// Opens the store, creating the root directory if needed.
    pub fn create(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persists PNG bytes for the shot at 1-based batch `position`.
    ///
    /// Returns the path actually written.
    pub fn persist(&self, png: &[u8], position: usize) -> Result<PathBuf, CaptureError> {
        let stem = shot_stem(chrono::Utc::now().timestamp(), position);

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("{stem}.png")
            } else {
                format!("{stem}-{attempt}.png")
            };
            let path = self.root.join(name);

            let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(CaptureError::Storage { path, source }),
            };

            fill_or_remove(&path, file, png)?;

            log::info!("[CAPTURE] Screenshot saved: {}", path.display());
            return Ok(path);
        }

        Err(CaptureError::Storage {
            path: self.root.join(format!("{stem}.png")),
            source: std::io::Error::new(ErrorKind::AlreadyExists, "no free file name"),
        })
    }
}

/// Writes `png` through `out`. A failed write removes the file at `path` so
/// no truncated image is left behind.
fn fill_or_remove<W: Write>(path: &Path, mut out: W, png: &[u8]) -> Result<(), CaptureError> {
    if let Err(source) = out.write_all(png).and_then(|_| out.flush()) {
        drop(out);
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("[CAPTURE] Cannot remove partial file {}: {}", path.display(), e);
        }
        return Err(CaptureError::Storage {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn shot_stem(unix_seconds: i64, position: usize) -> String {
    format!("screenshot_{unix_seconds}_{position}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_contains_timestamp_and_position() {
        assert_eq!(shot_stem(1_700_000_000, 3), "screenshot_1700000000_3");
    }

    #[test]
    fn create_makes_nested_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b");
        let store = ShotStore::create(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn same_position_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = ShotStore::create(dir.path()).unwrap();

        let first = store.persist(b"first", 1).unwrap();
        let second = store.persist(b"second", 1).unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"first");
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
    }

    struct DiskFull;

    impl Write for DiskFull {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screenshot_1_1.png");
        std::fs::write(&path, b"trunc").unwrap();

        let err = fill_or_remove(&path, DiskFull, b"png bytes").unwrap_err();
        assert!(matches!(err, CaptureError::Storage { .. }), "{err}");
        assert!(!path.exists());
    }

    #[test]
    fn file_name_has_png_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = ShotStore::create(dir.path()).unwrap();
        let path = store.persist(b"x", 7).unwrap();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("screenshot_"), "{name}");
        assert!(name.ends_with("_7.png"), "{name}");
    }
}
