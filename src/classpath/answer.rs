//! Lookup answers and their ranking.
//!
//! ## Ranking
//!
//! Answers are totally ordered by [`AnswerRank`], compared field by field:
//!
//! ```text
//! access:          Unrestricted  >  Discouraged  >  Forbidden
//! definitiveness:  Definitive    >  Advisory        (at equal access)
//! ```
//!
//! [`Answer::is_better_than`] builds the tie-break on top of that: anything
//! beats no answer, an unrestricted answer always wins, and a restricted
//! answer wins only with a strictly higher rank.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::Arc;

use smol_str::SmolStr;

use super::access::{AccessRestriction, RestrictionSeverity};
use super::source_unit::SourceUnit;

/// Compiled class bytes plus where they came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryType {
    /// Class file path, or the archive path for archive entries.
    pub origin: PathBuf,
    /// Entry name inside an archive or image.
    pub entry: Option<String>,
    pub bytes: Arc<[u8]>,
    pub external_annotation_path: Option<PathBuf>,
}

/// Source XOR binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerKind {
    Source(SourceUnit),
    Binary(BinaryType),
}

/// The result of one successful probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    pub kind: AnswerKind,
    pub restriction: Option<AccessRestriction>,
    /// Module the answer was found in, for module-aware locations.
    pub module: Option<SmolStr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Access {
    Forbidden,
    Discouraged,
    Unrestricted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Definitiveness {
    Advisory,
    Definitive,
}

/// Total order over answers; greater is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnswerRank {
    pub access: Access,
    pub definitiveness: Definitiveness,
}

impl Answer {
    pub fn source(unit: SourceUnit) -> Self {
        Self {
            kind: AnswerKind::Source(unit),
            restriction: None,
            module: None,
        }
    }

    pub fn binary(binary: BinaryType) -> Self {
        Self {
            kind: AnswerKind::Binary(binary),
            restriction: None,
            module: None,
        }
    }

    pub fn with_restriction(mut self, restriction: Option<AccessRestriction>) -> Self {
        self.restriction = restriction;
        self
    }

    pub fn in_module(mut self, module: impl Into<SmolStr>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn source_unit(&self) -> Option<&SourceUnit> {
        match &self.kind {
            AnswerKind::Source(unit) => Some(unit),
            AnswerKind::Binary(_) => None,
        }
    }

    pub fn binary_type(&self) -> Option<&BinaryType> {
        match &self.kind {
            AnswerKind::Binary(binary) => Some(binary),
            AnswerKind::Source(_) => None,
        }
    }

    /// A suggestion to remember while the search continues.
    pub fn is_advisory(&self) -> bool {
        self.restriction
            .as_ref()
            .is_some_and(AccessRestriction::ignore_if_better)
    }

    pub fn rank(&self) -> AnswerRank {
        let access = match self.restriction.as_ref().map(AccessRestriction::severity) {
            None => Access::Unrestricted,
            Some(RestrictionSeverity::Discouraged) => Access::Discouraged,
            Some(RestrictionSeverity::Forbidden) => Access::Forbidden,
        };
        let definitiveness = if self.is_advisory() {
            Definitiveness::Advisory
        } else {
            Definitiveness::Definitive
        };
        AnswerRank {
            access,
            definitiveness,
        }
    }

    pub fn is_better_than(&self, other: Option<&Answer>) -> bool {
        match other {
            None => true,
            Some(_) if self.restriction.is_none() => true,
            Some(other) => compare_answers(self, other) == Ordering::Greater,
        }
    }
}

/// Compare two answers by rank only.
pub fn compare_answers(a: &Answer, b: &Answer) -> Ordering {
    a.rank().cmp(&b.rank())
}
