//! Access rules attached to binary classpath entries.
//!
//! A rule set is an ordered list of patterns; the first pattern matching a
//! slash-qualified type name decides whether the type is accessible,
//! discouraged or forbidden.

use smol_str::SmolStr;

use crate::base::path_match;

/// What a matching rule says about the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessRuleKind {
    Accessible,
    Discouraged,
    NonAccessible,
}

/// Severity of a restriction, ordered from mildest to harshest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RestrictionSeverity {
    Discouraged,
    Forbidden,
}

/// A single `pattern -> kind` rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessRule {
    pub pattern: SmolStr,
    pub kind: AccessRuleKind,
    /// Answers restricted by this rule are only suggestions: the search keeps
    /// looking for a better one.
    pub ignore_if_better: bool,
}

impl AccessRule {
    pub fn new(pattern: impl Into<SmolStr>, kind: AccessRuleKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            ignore_if_better: false,
        }
    }

    pub fn accessible(pattern: impl Into<SmolStr>) -> Self {
        Self::new(pattern, AccessRuleKind::Accessible)
    }

    pub fn discouraged(pattern: impl Into<SmolStr>) -> Self {
        Self::new(pattern, AccessRuleKind::Discouraged)
    }

    pub fn forbidden(pattern: impl Into<SmolStr>) -> Self {
        Self::new(pattern, AccessRuleKind::NonAccessible)
    }

    pub fn ignoring_if_better(mut self) -> Self {
        self.ignore_if_better = true;
        self
    }

    pub fn matches(&self, qualified_type: &str) -> bool {
        path_match(&self.pattern, qualified_type)
    }
}

/// A restriction violated by a found type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessRestriction {
    pub rule: AccessRule,
    /// Display name of the classpath entry that carries the rule.
    pub entry_name: SmolStr,
}

impl AccessRestriction {
    pub fn severity(&self) -> RestrictionSeverity {
        match self.rule.kind {
            AccessRuleKind::Discouraged => RestrictionSeverity::Discouraged,
            // Accessible rules never produce a restriction.
            AccessRuleKind::NonAccessible | AccessRuleKind::Accessible => {
                RestrictionSeverity::Forbidden
            }
        }
    }

    pub fn ignore_if_better(&self) -> bool {
        self.rule.ignore_if_better
    }
}

/// Ordered access rules for one classpath entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccessRuleSet {
    rules: Vec<AccessRule>,
    entry_name: SmolStr,
}

impl AccessRuleSet {
    pub fn new(rules: Vec<AccessRule>, entry_name: impl Into<SmolStr>) -> Self {
        Self {
            rules,
            entry_name: entry_name.into(),
        }
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The restriction imposed on `qualified_type` (slash form, no suffix).
    pub fn violated_restriction(&self, qualified_type: &str) -> Option<AccessRestriction> {
        let rule = self.rules.iter().find(|r| r.matches(qualified_type))?;
        if rule.kind == AccessRuleKind::Accessible {
            return None;
        }
        Some(AccessRestriction {
            rule: rule.clone(),
            entry_name: self.entry_name.clone(),
        })
    }
}
