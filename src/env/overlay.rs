//! Working-copy overlay.
//!
//! Maps the slash-qualified main type name of each open unit to the unit.
//! Built once per session and never mutated afterwards.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::classpath::WorkingCopy;

#[derive(Debug, Clone, Default)]
pub struct WorkingCopyOverlay {
    copies: FxHashMap<String, Arc<WorkingCopy>>,
}

impl WorkingCopyOverlay {
    pub fn new(
        copies: impl IntoIterator<Item = WorkingCopy>,
        source_extensions: &[SmolStr],
    ) -> Self {
        let copies = copies
            .into_iter()
            .map(|copy| (copy.qualified_main_type_name(source_extensions), Arc::new(copy)))
            .collect();
        Self { copies }
    }

    /// The working copy whose main type is `qualified_name` (slash form).
    pub fn lookup(&self, qualified_name: &str) -> Option<&Arc<WorkingCopy>> {
        self.copies.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.copies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }
}
