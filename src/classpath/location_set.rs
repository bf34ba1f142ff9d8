//! The ordered, duplicate-free set of locations searched by a session.
//!
//! Order is precedence: the first location that definitively answers wins.
//! Roots from dependent projects are merged at the end, so a project's own
//! roots are always searched first.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::access::AccessRuleSet;
use super::location::{ClasspathLocation, LocationKey};
use super::module::ModuleScope;
use super::storage::{ArchiveCache, ArchiveHandle};
use crate::base::constants::{
    DEFAULT_ARCHIVE_EXTENSIONS, JIMAGE_EXTENSION, JRT_LIB_DIR, JRT_MODULES_FILE,
};
use crate::error::LocationError;

/// Declared role of a folder root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RootRole {
    Source,
    Binary,
}

/// An already resolved classpath root, as handed over by a project model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClasspathRoot {
    pub path: PathBuf,
    pub role: RootRole,
    pub access_rules: AccessRuleSet,
    pub inclusion: Vec<SmolStr>,
    pub exclusion: Vec<SmolStr>,
    pub external_annotation_path: Option<PathBuf>,
    /// Module this root belongs to; `None` serves every module.
    pub module: Option<SmolStr>,
}

impl ClasspathRoot {
    fn new(path: impl Into<PathBuf>, role: RootRole) -> Self {
        Self {
            path: path.into(),
            role,
            access_rules: AccessRuleSet::default(),
            inclusion: Vec::new(),
            exclusion: Vec::new(),
            external_annotation_path: None,
            module: None,
        }
    }

    pub fn source(path: impl Into<PathBuf>) -> Self {
        Self::new(path, RootRole::Source)
    }

    /// A class folder, archive or module image.
    pub fn binary(path: impl Into<PathBuf>) -> Self {
        Self::new(path, RootRole::Binary)
    }

    pub fn with_access_rules(mut self, rules: AccessRuleSet) -> Self {
        self.access_rules = rules;
        self
    }

    pub fn with_inclusion<S: Into<SmolStr>>(
        mut self,
        patterns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.inclusion = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclusion<S: Into<SmolStr>>(
        mut self,
        patterns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.exclusion = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_external_annotations(mut self, path: impl Into<PathBuf>) -> Self {
        self.external_annotation_path = Some(path.into());
        self
    }

    pub fn in_module(mut self, module: impl Into<SmolStr>) -> Self {
        self.module = Some(module.into());
        self
    }

    fn module_scope(&self) -> ModuleScope {
        match &self.module {
            Some(name) => ModuleScope::Named(vec![name.clone()]),
            None => ModuleScope::Any,
        }
    }
}

/// Supplies the resolved classpath roots of a project.
pub trait RootProvider {
    /// Ordered roots, or `None` when the project does not exist.
    fn classpath_roots(&self, project: &str) -> Option<Vec<ClasspathRoot>>;
}

impl<S: BuildHasher> RootProvider for HashMap<String, Vec<ClasspathRoot>, S> {
    fn classpath_roots(&self, project: &str) -> Option<Vec<ClasspathRoot>> {
        self.get(project).cloned()
    }
}

/// Insertion-ordered, de-duplicated classpath locations.
#[derive(Debug)]
pub struct LocationSet {
    locations: IndexMap<LocationKey, ClasspathLocation>,
    archives: ArchiveCache,
    archive_extensions: Vec<SmolStr>,
}

impl Default for LocationSet {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_EXTENSIONS.iter().copied())
    }
}

impl LocationSet {
    pub fn new<S: Into<SmolStr>>(archive_extensions: impl IntoIterator<Item = S>) -> Self {
        Self {
            locations: IndexMap::new(),
            archives: ArchiveCache::new(),
            archive_extensions: archive_extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Map every root to a location, skipping roots that cannot be opened.
    pub fn build(
        roots: impl IntoIterator<Item = ClasspathRoot>,
        archive_extensions: &[SmolStr],
    ) -> Self {
        let mut set = Self::new(archive_extensions.iter().cloned());
        set.merge(roots);
        set
    }

    /// Append locations not already present; returns how many were added.
    pub fn merge(&mut self, roots: impl IntoIterator<Item = ClasspathRoot>) -> usize {
        let mut added = 0;
        for root in roots {
            let Some(location) = self.map_root(&root) else {
                continue;
            };
            if self.push(location) {
                added += 1;
            }
        }
        added
    }

    /// Append a location unless an identical one is already present.
    pub fn push(&mut self, location: ClasspathLocation) -> bool {
        let key = location.key();
        if self.locations.contains_key(&key) {
            tracing::trace!("dropping duplicate location {}", location.root().display());
            return false;
        }
        self.locations.insert(key, location);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClasspathLocation> {
        self.locations.values()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn archives(&self) -> &ArchiveCache {
        &self.archives
    }

    /// Drop every location and release archive handles.
    pub fn cleanup(&mut self) {
        self.locations.clear();
        self.archives.clear();
    }

    fn is_archive(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.archive_extensions.iter().any(|a| a.eq_ignore_ascii_case(ext)))
    }

    fn map_root(&self, root: &ClasspathRoot) -> Option<ClasspathLocation> {
        let path = root.path.as_path();
        let annotations = root.external_annotation_path.clone();

        if is_module_image(path) {
            if path.is_dir() {
                return Some(ClasspathLocation::exploded_image(path, annotations));
            }
            let handle = self.open_archive(path)?;
            return Some(ClasspathLocation::packaged_image(handle, annotations));
        }

        if self.is_archive(path) {
            let handle = self.open_archive(path)?;
            return Some(ClasspathLocation::archive(
                handle,
                root.access_rules.clone(),
                annotations,
                root.module_scope(),
            ));
        }

        if !path.is_dir() {
            tracing::warn!("skipping root: {}", LocationError::Missing(path.to_path_buf()));
            return None;
        }
        Some(match root.role {
            RootRole::Source => ClasspathLocation::source_directory(
                path,
                root.inclusion.clone(),
                root.exclusion.clone(),
                root.module_scope(),
            ),
            RootRole::Binary => ClasspathLocation::binary_folder(
                path,
                root.access_rules.clone(),
                root.module_scope(),
            ),
        })
    }

    fn open_archive(&self, path: &Path) -> Option<Arc<ArchiveHandle>> {
        if !path.is_file() {
            tracing::warn!("skipping root: {}", LocationError::Missing(path.to_path_buf()));
            return None;
        }
        let handle = self.archives.handle(path);
        // The handle already logged why it could not open.
        handle.is_readable().then_some(handle)
    }
}

impl<'a> IntoIterator for &'a LocationSet {
    type Item = &'a ClasspathLocation;
    type IntoIter = indexmap::map::Values<'a, LocationKey, ClasspathLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.values()
    }
}

fn is_module_image(path: &Path) -> bool {
    if path.extension().and_then(|e| e.to_str()) == Some(JIMAGE_EXTENSION) {
        return true;
    }
    path.file_name().and_then(|n| n.to_str()) == Some(JRT_MODULES_FILE)
        && path
            .parent()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            == Some(JRT_LIB_DIR)
}
