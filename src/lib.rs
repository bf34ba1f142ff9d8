//! # nameenv-base
//!
//! Classpath name lookup for a Java-like compiler: given a qualified type
//! name, find the source unit or class file that declares it.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! env       → NameEnvironment, working-copy overlay, cancellation
//!   ↓
//! classpath → Locations, access rules, modules, answers
//!   ↓
//! base      → Primitives (QualifiedName, path matching, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → classpath → env)
// ============================================================================

/// Foundation types: QualifiedName, glob matching, constants
pub mod base;

/// Classpath locations, access rules and lookup answers
pub mod classpath;

/// Name environment sessions and cancellation
pub mod env;

/// Error types
pub mod error;

// Re-export foundation types
pub use base::QualifiedName;

// Re-export the lookup surface
pub use classpath::{
    AccessRule, AccessRuleSet, Answer, AnswerKind, ClasspathLocation, ClasspathRoot, LocationSet,
    ModuleDescriptor, ModuleFilter, RootProvider, SourceUnit, WorkingCopy,
};
pub use env::{CancellableEnvironment, EnvironmentOptions, NameEnvironment, ScanPolicy};
pub use error::{LookupError, LookupResult};
