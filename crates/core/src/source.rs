//! Line suppliers.
//!
//! The verifier consumes a lazy, non-restartable sequence of lines. A
//! [`SourceProvider`] opens a path as a buffered reader so the verifier can
//! pull lines one at a time; [`FileSystemProvider`] reads real files and
//! [`InMemoryProvider`] serves fixed text for tests and embedding.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Component, Path, PathBuf};

pub trait SourceProvider {
    /// Open `path` for line-by-line reading.
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>>;
}

/// Reads from disk.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Path -> source text, with `.` and `..` resolved lexically.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        let files = files
            .into_iter()
            .map(|(path, text)| (normalize_path(&path), text))
            .collect();
        Self { files }
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        self.files.insert(normalize_path(path.as_ref()), text.into());
        self
    }
}

impl SourceProvider for InMemoryProvider {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        let normalized = normalize_path(path);
        let text = self.files.get(&normalized).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })?;
        Ok(Box::new(Cursor::new(text.as_bytes())))
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                components.pop();
            }
            other => components.push(other),
        }
    }
    components.iter().collect()
}
