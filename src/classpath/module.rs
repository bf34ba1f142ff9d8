//! Module descriptors and the filters built from them.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// A module name bound to the packages it serves.
///
/// An empty package set means the descriptor does not constrain packages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub name: SmolStr,
    packages: FxHashSet<SmolStr>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            packages: FxHashSet::default(),
        }
    }

    /// Add served packages; dotted and slash forms are both accepted.
    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.packages.extend(
            packages
                .into_iter()
                .map(|p| SmolStr::new(p.as_ref().replace('.', "/"))),
        );
        self
    }

    /// Whether `package` (slash form) is served by this module.
    pub fn serves_package(&self, package: &str) -> bool {
        self.packages.is_empty() || self.packages.contains(package)
    }

    /// Whether `package` is served or is a parent of a served package.
    pub fn reaches_package(&self, package: &str) -> bool {
        self.serves_package(package)
            || self.packages.iter().any(|p| {
                p.strip_prefix(package)
                    .is_some_and(|rest| rest.starts_with('/'))
            })
    }
}

/// Restricts which locations take part in a query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ModuleFilter {
    #[default]
    Any,
    Modules(Vec<ModuleDescriptor>),
}

impl ModuleFilter {
    pub fn module(descriptor: ModuleDescriptor) -> Self {
        Self::Modules(vec![descriptor])
    }

    /// The single named module, when the filter names exactly one.
    pub fn single(&self) -> Option<&ModuleDescriptor> {
        match self {
            Self::Modules(modules) if modules.len() == 1 => modules.first(),
            _ => None,
        }
    }
}

/// The modules a location serves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModuleScope {
    /// Classpath content: eligible under every filter.
    #[default]
    Any,
    Named(Vec<SmolStr>),
}

impl ModuleScope {
    pub fn serves(&self, module: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Named(names) => names.iter().any(|n| n == module),
        }
    }
}
