//! Domain constants: file suffixes and JDK image layout names.

/// Suffix of compiled class files.
pub const CLASS_SUFFIX: &str = ".class";

/// Source extensions recognised when no options override them.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["java"];

/// Archive extensions recognised when no options override them.
pub const DEFAULT_ARCHIVE_EXTENSIONS: &[&str] = &["jar", "zip"];

/// Extension of a packaged module image.
pub const JIMAGE_EXTENSION: &str = "jimage";

/// File name of the runtime image inside a JDK's `lib` directory.
pub const JRT_MODULES_FILE: &str = "modules";

/// Parent directory of [`JRT_MODULES_FILE`].
pub const JRT_LIB_DIR: &str = "lib";
