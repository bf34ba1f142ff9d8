//! Source units an answer can point at.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use smol_str::SmolStr;

/// An open, possibly unsaved, compilation unit supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingCopy {
    /// Dotted package name, `""` for the default package.
    package: SmolStr,
    /// File name including its extension, e.g. `Foo.java`.
    file_name: SmolStr,
    contents: Arc<str>,
}

impl WorkingCopy {
    pub fn new(
        package: impl Into<SmolStr>,
        file_name: impl Into<SmolStr>,
        contents: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            package: package.into(),
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// File name without a recognised source extension.
    pub fn main_type_name(&self, source_extensions: &[SmolStr]) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext)) if source_extensions.iter().any(|e| e == ext) => stem,
            _ => &self.file_name,
        }
    }

    /// Overlay key: slash package plus main type name, e.g. `p/q/Foo`.
    pub fn qualified_main_type_name(&self, source_extensions: &[SmolStr]) -> String {
        let main = self.main_type_name(source_extensions);
        if self.package.is_empty() {
            main.to_string()
        } else {
            format!("{}/{}", self.package.replace('.', "/"), main)
        }
    }
}

/// Where the source text of an answer lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceUnit {
    /// An in-memory working copy shadowing the disk.
    WorkingCopy(Arc<WorkingCopy>),
    /// A file in a source directory.
    File { path: PathBuf, main_type: SmolStr },
    /// A source entry bundled in an archive or packaged image.
    ArchiveEntry {
        archive: PathBuf,
        entry: String,
        contents: Arc<str>,
    },
}

impl SourceUnit {
    pub fn is_working_copy(&self) -> bool {
        matches!(self, SourceUnit::WorkingCopy(_))
    }

    /// The on-disk file or archive holding the unit, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            SourceUnit::WorkingCopy(_) => None,
            SourceUnit::File { path, .. } => Some(path),
            SourceUnit::ArchiveEntry { archive, .. } => Some(archive),
        }
    }
}
