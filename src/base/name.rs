//! Qualified type names.
//!
//! A [`QualifiedName`] is the package segments followed by the simple type
//! name. Lookups work on the slash-separated form (`java/util/List`), which
//! is also the relative path of the type's file inside a classpath root.

use std::fmt;

use smol_str::SmolStr;

/// An immutable, non-empty sequence of identifier segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    segments: Vec<SmolStr>,
}

impl QualifiedName {
    /// Parse a slash-separated name such as `p/q/Foo`.
    ///
    /// Returns `None` for an empty string or when any segment is empty.
    pub fn parse(slash_path: &str) -> Option<Self> {
        if slash_path.is_empty() {
            return None;
        }
        Self::from_segments(slash_path.split('/'))
    }

    /// Build from compound segments, e.g. `["java", "util", "List"]`.
    pub fn from_compound<S: AsRef<str>>(compound: &[S]) -> Option<Self> {
        Self::from_segments(compound.iter().map(AsRef::as_ref))
    }

    /// Build from a package (possibly empty) and a simple type name.
    pub fn from_parts<S: AsRef<str>>(package: &[S], type_name: &str) -> Option<Self> {
        Self::from_segments(
            package
                .iter()
                .map(AsRef::as_ref)
                .chain(std::iter::once(type_name)),
        )
    }

    fn from_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Option<Self> {
        let segments: Vec<SmolStr> = segments.map(SmolStr::new).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// The simple type name (last segment), which is also the file stem.
    pub fn file_stem(&self) -> &str {
        // Construction guarantees at least one segment.
        self.segments.last().map(SmolStr::as_str).unwrap_or_default()
    }

    /// All segments but the last.
    pub fn package_segments(&self) -> &[SmolStr] {
        &self.segments[..self.segments.len() - 1]
    }

    /// Slash-joined package, `""` for the default package.
    pub fn package_prefix(&self) -> String {
        join_slash(self.package_segments())
    }

    pub fn as_slash_path(&self) -> String {
        join_slash(&self.segments)
    }
}

fn join_slash(segments: &[SmolStr]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(segment);
    }
    out
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_slash_path())
    }
}
