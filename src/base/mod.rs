//! Foundation types for the name environment.
//!
//! - [`QualifiedName`] - package segments plus simple type name
//! - [`path_match`] - slash-separated glob matching
//! - Domain constants (file suffixes, image layout)
//!
//! This module has NO dependencies on other nameenv modules.

pub mod constants;
mod name;
mod path_match;

pub use name::QualifiedName;
pub use path_match::path_match;
