//! Classpath locations: the four kinds of searchable roots.
//!
//! [`ClasspathLocation`] is a closed enum and every consumer matches it
//! exhaustively. A location is immutable once built. Only the backing archive handle
//! changes state, and only to open itself once.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use smol_str::SmolStr;

use super::access::AccessRuleSet;
use super::answer::{Answer, BinaryType};
use super::module::{ModuleDescriptor, ModuleScope};
use super::scanner::declared_types;
use super::source_unit::SourceUnit;
use super::storage::{ArchiveHandle, Storage};
use crate::base::constants::CLASS_SUFFIX;
use crate::base::{QualifiedName, path_match};

/// File name, package and full relative path of the type being looked up,
/// in the style of one storage kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupPaths {
    /// `Foo` (source style) or `Foo.class` (binary style).
    pub file_name: String,
    /// Slash package, `""` for the default package.
    pub package: String,
    /// `p/q/Foo` or `p/q/Foo.class`.
    pub qualified_file_name: String,
}

impl LookupPaths {
    /// Source style: no extension, each directory tries its own.
    pub fn source(name: &QualifiedName) -> Self {
        Self {
            file_name: name.file_stem().to_string(),
            package: name.package_prefix(),
            qualified_file_name: name.as_slash_path(),
        }
    }

    pub fn binary(name: &QualifiedName) -> Self {
        Self {
            file_name: format!("{}{CLASS_SUFFIX}", name.file_stem()),
            package: name.package_prefix(),
            qualified_file_name: format!("{}{CLASS_SUFFIX}", name.as_slash_path()),
        }
    }

    fn qualified_type_name(&self) -> &str {
        self.qualified_file_name
            .strip_suffix(CLASS_SUFFIX)
            .unwrap_or(&self.qualified_file_name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocationKind {
    SourceDirectory,
    BinaryFolder,
    Archive,
    ModuleImage,
}

/// A source folder with inclusion and exclusion patterns.
#[derive(Debug)]
pub struct SourceDirectory {
    storage: Storage,
    inclusion: Vec<SmolStr>,
    exclusion: Vec<SmolStr>,
    module: ModuleScope,
}

/// A folder of compiled classes.
#[derive(Debug)]
pub struct BinaryFolder {
    storage: Storage,
    access_rules: AccessRuleSet,
    module: ModuleScope,
}

/// A class archive (jar or zip).
#[derive(Debug)]
pub struct ArchiveLocation {
    storage: Storage,
    access_rules: AccessRuleSet,
    external_annotation_path: Option<PathBuf>,
    module: ModuleScope,
}

/// A runtime image whose top-level directories are modules.
#[derive(Debug)]
pub struct ModuleImage {
    storage: Storage,
    external_annotation_path: Option<PathBuf>,
    modules: OnceLock<Vec<SmolStr>>,
}

#[derive(Debug)]
pub enum ClasspathLocation {
    SourceDirectory(SourceDirectory),
    BinaryFolder(BinaryFolder),
    Archive(ArchiveLocation),
    ModuleImage(ModuleImage),
}

/// Identity used to drop duplicate locations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocationKey {
    kind: LocationKind,
    root: PathBuf,
    access_rules: AccessRuleSet,
    inclusion: Vec<SmolStr>,
    exclusion: Vec<SmolStr>,
    external_annotation_path: Option<PathBuf>,
    module: ModuleScope,
}

impl ClasspathLocation {
    pub fn source_directory(
        root: impl Into<PathBuf>,
        inclusion: Vec<SmolStr>,
        exclusion: Vec<SmolStr>,
        module: ModuleScope,
    ) -> Self {
        Self::SourceDirectory(SourceDirectory {
            storage: Storage::Directory(root.into()),
            inclusion,
            exclusion,
            module,
        })
    }

    pub fn binary_folder(
        root: impl Into<PathBuf>,
        access_rules: AccessRuleSet,
        module: ModuleScope,
    ) -> Self {
        Self::BinaryFolder(BinaryFolder {
            storage: Storage::Directory(root.into()),
            access_rules,
            module,
        })
    }

    pub fn archive(
        handle: Arc<ArchiveHandle>,
        access_rules: AccessRuleSet,
        external_annotation_path: Option<PathBuf>,
        module: ModuleScope,
    ) -> Self {
        Self::Archive(ArchiveLocation {
            storage: Storage::Archive(handle),
            access_rules,
            external_annotation_path,
            module,
        })
    }

    /// An exploded image directory.
    pub fn exploded_image(
        root: impl Into<PathBuf>,
        external_annotation_path: Option<PathBuf>,
    ) -> Self {
        Self::image(Storage::Directory(root.into()), external_annotation_path)
    }

    /// A packaged image read through an archive handle.
    pub fn packaged_image(
        handle: Arc<ArchiveHandle>,
        external_annotation_path: Option<PathBuf>,
    ) -> Self {
        Self::image(Storage::Archive(handle), external_annotation_path)
    }

    fn image(storage: Storage, external_annotation_path: Option<PathBuf>) -> Self {
        Self::ModuleImage(ModuleImage {
            storage,
            external_annotation_path,
            modules: OnceLock::new(),
        })
    }

    pub fn kind(&self) -> LocationKind {
        match self {
            Self::SourceDirectory(_) => LocationKind::SourceDirectory,
            Self::BinaryFolder(_) => LocationKind::BinaryFolder,
            Self::Archive(_) => LocationKind::Archive,
            Self::ModuleImage(_) => LocationKind::ModuleImage,
        }
    }

    fn storage(&self) -> &Storage {
        match self {
            Self::SourceDirectory(l) => &l.storage,
            Self::BinaryFolder(l) => &l.storage,
            Self::Archive(l) => &l.storage,
            Self::ModuleImage(l) => &l.storage,
        }
    }

    pub fn root(&self) -> &Path {
        self.storage().root()
    }

    pub fn key(&self) -> LocationKey {
        let mut key = LocationKey {
            kind: self.kind(),
            root: self.root().to_path_buf(),
            access_rules: AccessRuleSet::default(),
            inclusion: Vec::new(),
            exclusion: Vec::new(),
            external_annotation_path: None,
            module: ModuleScope::Any,
        };
        match self {
            Self::SourceDirectory(l) => {
                key.inclusion = l.inclusion.clone();
                key.exclusion = l.exclusion.clone();
                key.module = l.module.clone();
            }
            Self::BinaryFolder(l) => {
                key.access_rules = l.access_rules.clone();
                key.module = l.module.clone();
            }
            Self::Archive(l) => {
                key.access_rules = l.access_rules.clone();
                key.external_annotation_path = l.external_annotation_path.clone();
                key.module = l.module.clone();
            }
            Self::ModuleImage(l) => {
                key.external_annotation_path = l.external_annotation_path.clone();
            }
        }
        key
    }

    /// Module names a module image contains; empty for other kinds.
    pub fn image_modules(&self) -> &[SmolStr] {
        match self {
            Self::ModuleImage(image) => image.modules(),
            Self::SourceDirectory(_) | Self::BinaryFolder(_) | Self::Archive(_) => &[],
        }
    }

    pub fn serves_module(&self, module: &str) -> bool {
        match self {
            Self::SourceDirectory(l) => l.module.serves(module),
            Self::BinaryFolder(l) => l.module.serves(module),
            Self::Archive(l) => l.module.serves(module),
            Self::ModuleImage(image) => image.modules().iter().any(|m| m == module),
        }
    }

    /// Whether this location contains the slash-separated package.
    ///
    /// With a module, a module image only looks inside that module's tree
    /// and the descriptor's package set must reach the package.
    pub fn is_package(&self, qualified_package: &str, module: Option<&ModuleDescriptor>) -> bool {
        if module.is_some_and(|m| !m.reaches_package(qualified_package)) {
            return false;
        }
        match self {
            Self::SourceDirectory(dir) => {
                dir.is_package_included(qualified_package)
                    && dir.storage.has_directory(qualified_package)
            }
            Self::BinaryFolder(_) | Self::Archive(_) => {
                self.storage().has_directory(qualified_package)
            }
            Self::ModuleImage(image) => image
                .modules_for(module)
                .any(|m| image.storage.has_directory(&join(m, qualified_package))),
        }
    }

    /// Primary lookup of the file named after the requested type.
    ///
    /// `paths` must be in the style of this location's kind: source style for
    /// source directories, binary style for everything else.
    pub fn find_class(
        &self,
        paths: &LookupPaths,
        module: Option<&ModuleDescriptor>,
        source_extensions: &[SmolStr],
    ) -> Option<Answer> {
        if module.is_some_and(|m| !m.serves_package(&paths.package)) {
            return None;
        }
        match self {
            Self::SourceDirectory(dir) => source_extensions.iter().find_map(|ext| {
                let rel = format!("{}.{ext}", paths.qualified_file_name);
                (dir.is_included(&rel) && dir.storage.contains(&rel)).then(|| {
                    Answer::source(SourceUnit::File {
                        path: dir.storage.display_path(&rel),
                        main_type: SmolStr::new(&paths.file_name),
                    })
                })
            }),
            Self::BinaryFolder(folder) => {
                let answer = read_binary(&folder.storage, &paths.qualified_file_name, None)?;
                Some(answer.with_restriction(
                    folder
                        .access_rules
                        .violated_restriction(paths.qualified_type_name()),
                ))
            }
            Self::Archive(archive) => {
                let answer = read_binary(
                    &archive.storage,
                    &paths.qualified_file_name,
                    archive.external_annotation_path.as_deref(),
                )?;
                Some(answer.with_restriction(
                    archive
                        .access_rules
                        .violated_restriction(paths.qualified_type_name()),
                ))
            }
            Self::ModuleImage(image) => match module {
                Some(module) => image.find_in_module(&module.name, paths),
                None => image
                    .modules()
                    .iter()
                    .find_map(|m| image.find_in_module(m, paths)),
            },
        }
    }

    /// Lookup of a secondary top-level type declared in another source file
    /// of the same package.
    pub fn find_secondary_in_class(
        &self,
        type_name: &str,
        qualified_package: &str,
        module: Option<&ModuleDescriptor>,
        source_extensions: &[SmolStr],
    ) -> Option<Answer> {
        if module.is_some_and(|m| !m.serves_package(qualified_package)) {
            return None;
        }
        let qualified_type = join(qualified_package, type_name);
        match self {
            Self::SourceDirectory(dir) => {
                scan_secondary(
                    &dir.storage,
                    qualified_package,
                    type_name,
                    source_extensions,
                    |rel| dir.is_included(rel),
                )
            }
            Self::BinaryFolder(folder) => scan_secondary(
                &folder.storage,
                qualified_package,
                type_name,
                source_extensions,
                |_| true,
            )
            .map(|a| {
                a.with_restriction(folder.access_rules.violated_restriction(&qualified_type))
            }),
            Self::Archive(archive) => scan_secondary(
                &archive.storage,
                qualified_package,
                type_name,
                source_extensions,
                |_| true,
            )
            .map(|a| {
                a.with_restriction(archive.access_rules.violated_restriction(&qualified_type))
            }),
            Self::ModuleImage(image) => image.modules_for(module).find_map(|m| {
                scan_secondary(
                    &image.storage,
                    &join(m, qualified_package),
                    type_name,
                    source_extensions,
                    |_| true,
                )
                .map(|a| a.in_module(m.clone()))
            }),
        }
    }
}

impl SourceDirectory {
    fn is_included(&self, rel: &str) -> bool {
        if self.exclusion.iter().any(|p| path_match(p, rel)) {
            return false;
        }
        self.inclusion.is_empty() || self.inclusion.iter().any(|p| path_match(p, rel))
    }

    /// A package folder is hidden when an exclusion pattern covers the folder
    /// itself, and visible when any inclusion pattern can reach inside it.
    fn is_package_included(&self, package: &str) -> bool {
        if package.is_empty() {
            return true;
        }
        if self.exclusion.iter().any(|p| path_match(p, package)) {
            return false;
        }
        let folder = format!("{package}/");
        self.inclusion.is_empty()
            || self.inclusion.iter().any(|p| {
                path_match(p, package) || p.starts_with(&folder) || p.starts_with("**")
            })
    }
}

impl ModuleImage {
    fn modules(&self) -> &[SmolStr] {
        self.modules.get_or_init(|| {
            self.storage
                .top_level_dirs()
                .into_iter()
                .map(SmolStr::from)
                .collect()
        })
    }

    /// The modules a query may look into: the given one if this image
    /// serves it, otherwise every module.
    fn modules_for<'a>(
        &'a self,
        module: Option<&'a ModuleDescriptor>,
    ) -> impl Iterator<Item = &'a SmolStr> + 'a {
        let modules = self.modules();
        modules
            .iter()
            .filter(move |m| module.is_none_or(|d| d.name == **m))
    }

    fn find_in_module(&self, module: &str, paths: &LookupPaths) -> Option<Answer> {
        if !self.modules().iter().any(|m| m == module) {
            return None;
        }
        let rel = join(module, &paths.qualified_file_name);
        let answer = read_binary(&self.storage, &rel, self.external_annotation_path.as_deref())?;
        Some(answer.in_module(module))
    }
}

fn join(dir: &str, rest: &str) -> String {
    if dir.is_empty() {
        rest.to_string()
    } else if rest.is_empty() {
        dir.to_string()
    } else {
        format!("{dir}/{rest}")
    }
}

fn read_binary(storage: &Storage, rel: &str, annotations: Option<&Path>) -> Option<Answer> {
    let bytes = storage.read(rel)?;
    let entry = matches!(storage, Storage::Archive(_)).then(|| rel.to_string());
    Some(Answer::binary(BinaryType {
        origin: storage.display_path(rel),
        entry,
        bytes: Arc::from(bytes),
        external_annotation_path: annotations.map(Path::to_path_buf),
    }))
}

fn scan_secondary(
    storage: &Storage,
    dir: &str,
    type_name: &str,
    source_extensions: &[SmolStr],
    include: impl Fn(&str) -> bool,
) -> Option<Answer> {
    for name in storage.list_dir(dir) {
        let Some((stem, ext)) = name.rsplit_once('.') else {
            continue;
        };
        if stem == type_name || !source_extensions.iter().any(|e| e == ext) {
            continue;
        }
        let rel = join(dir, &name);
        if !include(&rel) {
            continue;
        }
        let Some(contents) = storage.read_to_string(&rel) else {
            continue;
        };
        if !declared_types(&contents).iter().any(|t| t == type_name) {
            continue;
        }
        tracing::trace!("secondary type {type_name} found in {rel}");
        let unit = match storage {
            Storage::Directory(_) => SourceUnit::File {
                path: storage.display_path(&rel),
                main_type: SmolStr::new(stem),
            },
            Storage::Archive(handle) => SourceUnit::ArchiveEntry {
                archive: handle.path().to_path_buf(),
                entry: rel,
                contents: Arc::from(contents),
            },
        };
        return Some(Answer::source(unit));
    }
    None
}
