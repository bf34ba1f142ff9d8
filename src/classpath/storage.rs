//! Backing storage for classpath locations.
//!
//! Every location reads either a plain directory tree or a zip archive.
//! Paths handed to [`Storage`] are always slash-separated and relative to
//! the storage root, so locations never care which backend they sit on.
//!
//! Archive handles open lazily and exactly once. A handle that failed to open
//! stays empty for the rest of the session instead of being retried.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use zip::ZipArchive;

use crate::error::LocationError;

/// A lazily opened zip archive.
pub struct ArchiveHandle {
    path: PathBuf,
    state: OnceLock<Option<OpenArchive>>,
}

struct OpenArchive {
    archive: Mutex<ZipArchive<BufReader<File>>>,
    /// File entries (no trailing slash).
    entries: FxHashSet<String>,
    /// Every directory implied by an entry, including ancestors.
    dirs: FxHashSet<String>,
}

impl OpenArchive {
    fn open(path: &Path) -> Result<Self, LocationError> {
        let file = File::open(path).map_err(|e| LocationError::io(path, e))?;
        let archive =
            ZipArchive::new(BufReader::new(file)).map_err(|e| LocationError::archive(path, e))?;

        let mut entries = FxHashSet::default();
        let mut dirs = FxHashSet::default();
        for name in archive.file_names() {
            let dir = if let Some(dir) = name.strip_suffix('/') {
                dir
            } else {
                entries.insert(name.to_string());
                parent_of(name)
            };
            add_with_ancestors(&mut dirs, dir);
        }

        Ok(Self {
            archive: Mutex::new(archive),
            entries,
            dirs,
        })
    }

    fn read(&self, archive_path: &Path, entry: &str) -> Option<Vec<u8>> {
        if !self.entries.contains(entry) {
            return None;
        }
        let mut archive = self.archive.lock();
        let mut file = match archive.by_name(entry) {
            Ok(file) => file,
            Err(e) => {
                let err = LocationError::archive(archive_path, e);
                tracing::warn!("cannot read {entry}: {err}");
                return None;
            }
        };
        let mut bytes = Vec::new();
        if let Err(e) = file.read_to_end(&mut bytes) {
            let err = LocationError::io(archive_path, e);
            tracing::warn!("cannot read {entry}: {err}");
            return None;
        }
        Some(bytes)
    }
}

fn parent_of(entry: &str) -> &str {
    entry.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn add_with_ancestors(dirs: &mut FxHashSet<String>, mut dir: &str) {
    while !dir.is_empty() && dirs.insert(dir.to_string()) {
        dir = parent_of(dir);
    }
}

impl ArchiveHandle {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Option<&OpenArchive> {
        self.state
            .get_or_init(|| match OpenArchive::open(&self.path) {
                Ok(archive) => {
                    tracing::debug!("opened archive {}", self.path.display());
                    Some(archive)
                }
                Err(e) => {
                    tracing::warn!("treating archive as empty: {e}");
                    None
                }
            })
            .as_ref()
    }

    /// Opens the archive if needed; `false` if it cannot be read.
    pub fn is_readable(&self) -> bool {
        self.open().is_some()
    }

    /// Whether an open has been attempted and succeeded.
    pub fn is_open(&self) -> bool {
        matches!(self.state.get(), Some(Some(_)))
    }
}

impl fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}

/// Session-owned cache of archive handles, keyed by canonical path.
///
/// Locations of one session that point at the same archive share a handle.
/// Dropping or clearing the cache releases the handles once no location
/// holds them any more.
#[derive(Debug, Default)]
pub struct ArchiveCache {
    handles: Mutex<FxHashMap<PathBuf, Arc<ArchiveHandle>>>,
}

impl ArchiveCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self, path: &Path) -> Arc<ArchiveHandle> {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.handles
            .lock()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(ArchiveHandle::new(key)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.handles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.lock().is_empty()
    }

    pub fn clear(&self) {
        self.handles.lock().clear();
    }
}

/// Directory tree or archive, addressed by slash-separated relative paths.
#[derive(Clone, Debug)]
pub(crate) enum Storage {
    Directory(PathBuf),
    Archive(Arc<ArchiveHandle>),
}

impl Storage {
    pub(crate) fn root(&self) -> &Path {
        match self {
            Storage::Directory(root) => root,
            Storage::Archive(handle) => handle.path(),
        }
    }

    fn dir_path(root: &Path, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|s| !s.is_empty())
            .fold(root.to_path_buf(), |path, segment| path.join(segment))
    }

    /// On-disk path for a directory entry; the archive path for archives.
    pub(crate) fn display_path(&self, rel: &str) -> PathBuf {
        match self {
            Storage::Directory(root) => Self::dir_path(root, rel),
            Storage::Archive(handle) => handle.path().to_path_buf(),
        }
    }

    pub(crate) fn contains(&self, rel: &str) -> bool {
        match self {
            Storage::Directory(root) => Self::dir_path(root, rel).is_file(),
            Storage::Archive(handle) => handle.open().is_some_and(|a| a.entries.contains(rel)),
        }
    }

    pub(crate) fn read(&self, rel: &str) -> Option<Vec<u8>> {
        match self {
            Storage::Directory(root) => {
                let path = Self::dir_path(root, rel);
                match fs::read(&path) {
                    Ok(bytes) => Some(bytes),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                    Err(e) => {
                        let err = LocationError::io(path, e);
                        tracing::warn!("{err}");
                        None
                    }
                }
            }
            Storage::Archive(handle) => handle.open()?.read(handle.path(), rel),
        }
    }

    pub(crate) fn read_to_string(&self, rel: &str) -> Option<String> {
        String::from_utf8(self.read(rel)?).ok()
    }

    pub(crate) fn has_directory(&self, rel: &str) -> bool {
        match self {
            Storage::Directory(root) => Self::dir_path(root, rel).is_dir(),
            Storage::Archive(handle) => handle
                .open()
                .is_some_and(|a| rel.is_empty() || a.dirs.contains(rel)),
        }
    }

    /// Names of the files directly inside `rel`, sorted.
    pub(crate) fn list_dir(&self, rel: &str) -> Vec<String> {
        let mut names: Vec<String> = match self {
            Storage::Directory(root) => match fs::read_dir(Self::dir_path(root, rel)) {
                Ok(entries) => entries
                    .filter_map(Result::ok)
                    .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
                    .filter_map(|e| e.file_name().into_string().ok())
                    .collect(),
                Err(_) => Vec::new(),
            },
            Storage::Archive(handle) => match handle.open() {
                Some(archive) => archive
                    .entries
                    .iter()
                    .filter(|entry| parent_of(entry) == rel)
                    .map(|entry| entry.rsplit('/').next().unwrap_or(entry).to_string())
                    .collect(),
                None => Vec::new(),
            },
        };
        names.sort();
        names
    }

    /// Names of the top-level directories, sorted.
    pub(crate) fn top_level_dirs(&self) -> Vec<String> {
        let mut names: Vec<String> = match self {
            Storage::Directory(root) => match fs::read_dir(root) {
                Ok(entries) => entries
                    .filter_map(Result::ok)
                    .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
                    .filter_map(|e| e.file_name().into_string().ok())
                    .collect(),
                Err(_) => Vec::new(),
            },
            Storage::Archive(handle) => match handle.open() {
                Some(archive) => archive
                    .dirs
                    .iter()
                    .filter(|d| !d.contains('/'))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            },
        };
        names.sort();
        names
    }
}
