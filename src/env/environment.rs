//! The resolution engine.
//!
//! One query walks the [`LocationSet`] in order:
//!
//! ```text
//! find_type(name, filter)
//!     │
//!     ▼
//! primary scan      ← per location: overlay (source dirs only, checked once),
//!     │               then find_class; fold answers into a suggestion slot
//!     ▼
//! secondary lookup  ← only if the scan failed and a source directory took part
//!     │
//!     ▼
//! suggestion        ← best advisory answer, if any
//! ```

use std::cmp::Ordering;
use std::sync::Arc;

use crate::base::QualifiedName;
use crate::classpath::{
    Answer, ClasspathLocation, LocationKind, LocationSet, LookupPaths, ModuleFilter,
    RootProvider, SourceUnit, WorkingCopy, compare_answers,
};

use super::options::{EnvironmentOptions, ScanPolicy};
use super::overlay::WorkingCopyOverlay;

/// Per-query state. Path decompositions are derived lazily, once per style.
struct Query<'a> {
    name: &'a QualifiedName,
    slash_name: String,
    source_paths: Option<LookupPaths>,
    binary_paths: Option<LookupPaths>,
    /// Overlay decision, made at the first source directory.
    working_copy: Option<Option<Arc<WorkingCopy>>>,
    source_probed: bool,
}

impl<'a> Query<'a> {
    fn new(name: &'a QualifiedName) -> Self {
        Self {
            name,
            slash_name: name.as_slash_path(),
            source_paths: None,
            binary_paths: None,
            working_copy: None,
            source_probed: false,
        }
    }

    fn source_paths(&mut self) -> &LookupPaths {
        let name = self.name;
        self.source_paths
            .get_or_insert_with(|| LookupPaths::source(name))
    }

    fn binary_paths(&mut self) -> &LookupPaths {
        let name = self.name;
        self.binary_paths
            .get_or_insert_with(|| LookupPaths::binary(name))
    }

    fn working_copy(&mut self, overlay: &WorkingCopyOverlay) -> Option<Arc<WorkingCopy>> {
        let slash_name = &self.slash_name;
        self.working_copy
            .get_or_insert_with(|| overlay.lookup(slash_name).cloned())
            .clone()
    }
}

enum Primary {
    Found(Answer),
    Suggested(Answer),
    Missing,
}

/// Resolves qualified type names against a project's classpath.
#[derive(Debug)]
pub struct NameEnvironment {
    locations: LocationSet,
    working_copies: WorkingCopyOverlay,
    options: EnvironmentOptions,
}

impl NameEnvironment {
    pub fn new(
        locations: LocationSet,
        working_copies: impl IntoIterator<Item = WorkingCopy>,
        options: EnvironmentOptions,
    ) -> Self {
        let working_copies = WorkingCopyOverlay::new(working_copies, &options.source_extensions);
        Self {
            locations,
            working_copies,
            options,
        }
    }

    /// Build the location set from a project's roots.
    ///
    /// An unknown project yields an empty environment.
    pub fn for_project(
        provider: &impl RootProvider,
        project: &str,
        working_copies: impl IntoIterator<Item = WorkingCopy>,
        options: EnvironmentOptions,
    ) -> Self {
        let roots = provider.classpath_roots(project).unwrap_or_else(|| {
            tracing::debug!("project {project} does not exist; empty classpath");
            Vec::new()
        });
        let locations = LocationSet::build(roots, &options.archive_extensions);
        Self::new(locations, working_copies, options)
    }

    /// Append the roots of another project after the existing ones.
    pub fn add_project_classpath(&mut self, provider: &impl RootProvider, project: &str) -> usize {
        match provider.classpath_roots(project) {
            Some(roots) => self.locations.merge(roots),
            None => 0,
        }
    }

    /// Release every location and archive handle.
    pub fn cleanup(&mut self) {
        self.locations.cleanup();
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn working_copies(&self) -> &WorkingCopyOverlay {
        &self.working_copies
    }

    pub fn options(&self) -> &EnvironmentOptions {
        &self.options
    }

    /// `type_name` in the package given by its segments.
    pub fn find_type_in_package<S: AsRef<str>>(
        &self,
        type_name: &str,
        package: &[S],
        filter: &ModuleFilter,
    ) -> Option<Answer> {
        let name = QualifiedName::from_parts(package, type_name)?;
        self.find_type(&name, filter)
    }

    pub fn find_type_compound<S: AsRef<str>>(
        &self,
        compound: &[S],
        filter: &ModuleFilter,
    ) -> Option<Answer> {
        let name = QualifiedName::from_compound(compound)?;
        self.find_type(&name, filter)
    }

    pub fn find_type(&self, name: &QualifiedName, filter: &ModuleFilter) -> Option<Answer> {
        tracing::trace!("find_type {name}");
        let mut query = Query::new(name);
        let suggestion = match self.scan_primary(&mut query, filter) {
            Primary::Found(answer) => return Some(answer),
            Primary::Suggested(answer) => Some(answer),
            Primary::Missing => None,
        };

        if self.options.search_secondary_types && query.source_probed {
            if let Some(answer) = self.find_secondary(name, filter) {
                return Some(answer);
            }
        }
        suggestion
    }

    /// Whether any eligible location contains the slash-separated package.
    pub fn is_package(&self, qualified_package: &str, filter: &ModuleFilter) -> bool {
        self.eligible(filter).any(|location| match filter {
            ModuleFilter::Any => location.is_package(qualified_package, None),
            ModuleFilter::Modules(modules) => modules
                .iter()
                .filter(|m| location.serves_module(&m.name))
                .any(|m| location.is_package(qualified_package, Some(m))),
        })
    }

    pub fn is_package_in<S: AsRef<str>>(
        &self,
        compound: &[S],
        package_name: &str,
        filter: &ModuleFilter,
    ) -> bool {
        let mut qualified = String::new();
        for segment in compound {
            qualified.push_str(segment.as_ref());
            qualified.push('/');
        }
        qualified.push_str(package_name);
        self.is_package(&qualified, filter)
    }

    fn eligible<'a>(
        &'a self,
        filter: &'a ModuleFilter,
    ) -> impl Iterator<Item = &'a ClasspathLocation> + 'a {
        self.locations.iter().filter(move |location| match filter {
            ModuleFilter::Any => true,
            ModuleFilter::Modules(modules) => {
                modules.iter().any(|m| location.serves_module(&m.name))
            }
        })
    }

    fn scan_primary(&self, query: &mut Query<'_>, filter: &ModuleFilter) -> Primary {
        let mut suggestion: Option<Answer> = None;
        for location in self.eligible(filter) {
            let Some(answer) = self.probe(location, query, filter) else {
                continue;
            };
            match self.options.scan_policy {
                ScanPolicy::FirstDefinitive => {
                    if !answer.is_better_than(suggestion.as_ref()) {
                        continue;
                    }
                    if !answer.is_advisory() {
                        return Primary::Found(answer);
                    }
                    // Remember the suggestion and keep looking.
                    suggestion = Some(answer);
                }
                ScanPolicy::Exhaustive => {
                    let better = suggestion
                        .as_ref()
                        .is_none_or(|best| compare_answers(&answer, best) == Ordering::Greater);
                    if better {
                        suggestion = Some(answer);
                    }
                }
            }
        }
        match suggestion {
            Some(answer) if !answer.is_advisory() => Primary::Found(answer),
            Some(answer) => Primary::Suggested(answer),
            None => Primary::Missing,
        }
    }

    fn probe(
        &self,
        location: &ClasspathLocation,
        query: &mut Query<'_>,
        filter: &ModuleFilter,
    ) -> Option<Answer> {
        let paths = match location.kind() {
            LocationKind::SourceDirectory => {
                query.source_probed = true;
                if let Some(copy) = query.working_copy(&self.working_copies) {
                    return Some(Answer::source(SourceUnit::WorkingCopy(copy)));
                }
                query.source_paths()
            }
            LocationKind::BinaryFolder | LocationKind::Archive | LocationKind::ModuleImage => {
                query.binary_paths()
            }
        };
        let extensions = &self.options.source_extensions;
        match filter {
            ModuleFilter::Any => location.find_class(paths, None, extensions),
            ModuleFilter::Modules(modules) => modules
                .iter()
                .filter(|m| location.serves_module(&m.name))
                .find_map(|m| location.find_class(paths, Some(m), extensions)),
        }
    }

    fn find_secondary(&self, name: &QualifiedName, filter: &ModuleFilter) -> Option<Answer> {
        let type_name = name.file_stem();
        let package = name.package_prefix();
        let extensions = &self.options.source_extensions;
        if let Some(module) = filter.single() {
            return self
                .locations
                .iter()
                .find(|l| l.serves_module(&module.name))?
                .find_secondary_in_class(type_name, &package, Some(module), extensions);
        }
        self.eligible(filter).find_map(|location| match filter {
            ModuleFilter::Any => {
                location.find_secondary_in_class(type_name, &package, None, extensions)
            }
            ModuleFilter::Modules(modules) => modules
                .iter()
                .filter(|m| location.serves_module(&m.name))
                .find_map(|m| {
                    location.find_secondary_in_class(type_name, &package, Some(m), extensions)
                }),
        })
    }
}
