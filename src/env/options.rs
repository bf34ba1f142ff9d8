//! Name environment options

use smol_str::SmolStr;

use crate::base::constants::{DEFAULT_ARCHIVE_EXTENSIONS, DEFAULT_SOURCE_EXTENSIONS};

/// How far the primary scan goes before deciding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Return the first definitive answer that beats the current suggestion.
    #[default]
    FirstDefinitive,
    /// Visit every location, then return the best answer seen (earliest on ties).
    Exhaustive,
}

/// Options for a name environment session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentOptions {
    pub scan_policy: ScanPolicy,
    /// Fall back to secondary-type lookup when the primary scan fails
    pub search_secondary_types: bool,
    /// Java-like source extensions, without the dot
    pub source_extensions: Vec<SmolStr>,
    /// Extensions that mark a root as an archive, without the dot
    pub archive_extensions: Vec<SmolStr>,
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            scan_policy: ScanPolicy::default(),
            search_secondary_types: true,
            source_extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .copied()
                .map(SmolStr::new)
                .collect(),
            archive_extensions: DEFAULT_ARCHIVE_EXTENSIONS
                .iter()
                .copied()
                .map(SmolStr::new)
                .collect(),
        }
    }
}

impl EnvironmentOptions {
    pub fn with_scan_policy(mut self, policy: ScanPolicy) -> Self {
        self.scan_policy = policy;
        self
    }

    pub fn with_secondary_types(mut self, enabled: bool) -> Self {
        self.search_secondary_types = enabled;
        self
    }

    pub fn with_source_extensions<S: Into<SmolStr>>(
        mut self,
        exts: impl IntoIterator<Item = S>,
    ) -> Self {
        self.source_extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_archive_extensions<S: Into<SmolStr>>(
        mut self,
        exts: impl IntoIterator<Item = S>,
    ) -> Self {
        self.archive_extensions = exts.into_iter().map(Into::into).collect();
        self
    }
}
