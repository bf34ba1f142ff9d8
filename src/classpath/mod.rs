//! Classpath locations and the set they are searched in.
//!
//! - [`ClasspathLocation`] - source directory, binary folder, archive or module image
//! - [`LocationSet`] - ordered, de-duplicated locations built from [`ClasspathRoot`]s
//! - [`Answer`] - what one probe found, ranked by [`AnswerRank`]
//! - [`AccessRuleSet`] - per-entry access rules
//! - [`ModuleFilter`] - which modules a query may see

mod access;
mod answer;
mod location;
mod location_set;
mod module;
mod scanner;
mod source_unit;
mod storage;

pub use access::{
    AccessRestriction, AccessRule, AccessRuleKind, AccessRuleSet, RestrictionSeverity,
};
pub use answer::{
    Access, Answer, AnswerKind, AnswerRank, BinaryType, Definitiveness, compare_answers,
};
pub use location::{ClasspathLocation, LocationKey, LocationKind, LookupPaths};
pub use location_set::{ClasspathRoot, LocationSet, RootProvider, RootRole};
pub use module::{ModuleDescriptor, ModuleFilter, ModuleScope};
pub use scanner::declared_types;
pub use source_unit::{SourceUnit, WorkingCopy};
pub use storage::{ArchiveCache, ArchiveHandle};
