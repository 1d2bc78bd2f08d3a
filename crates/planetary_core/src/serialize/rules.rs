//! Exclusion rules for record serialization.
//!
//! A rule names a dotted path relative to the record being serialized:
//! `-missions.planet` drops the `planet` key from every serialized mission
//! under `missions`. A single segment (`-missions`) drops the key itself.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rule string that does not have the `-segment(.segment)*` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRule(pub String);

impl Display for InvalidRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid serialization rule `{}`; expected `-field` or `-relation.field`",
            self.0
        )
    }
}

impl Error for InvalidRule {}

/// Set of excluded relationship/field paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeRules {
    excluded: BTreeSet<String>,
}

impl SerializeRules {
    /// Rules that exclude nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parses rules written as `-path.to.field`.
    pub fn parse<I, S>(rules: I) -> Result<Self, InvalidRule>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut excluded = BTreeSet::new();
        for rule in rules {
            let rule = rule.as_ref();
            let path = rule
                .strip_prefix('-')
                .filter(|path| !path.is_empty() && path.split('.').all(|seg| !seg.is_empty()))
                .ok_or_else(|| InvalidRule(rule.to_string()))?;
            excluded.insert(path.to_string());
        }
        Ok(Self { excluded })
    }

    pub(crate) fn from_paths(paths: &[&str]) -> Self {
        Self {
            excluded: paths.iter().map(|path| path.to_string()).collect(),
        }
    }

    /// Whether `field` is dropped at this level.
    pub fn excludes(&self, field: &str) -> bool {
        self.excluded.contains(field)
    }

    /// Rules that apply beneath `field`, with the `field.` prefix stripped.
    pub fn descend(&self, field: &str) -> Self {
        let excluded = self
            .excluded
            .iter()
            .filter_map(|path| path.strip_prefix(field)?.strip_prefix('.'))
            .map(str::to_string)
            .collect();
        Self { excluded }
    }

    /// Union of both rule sets.
    pub fn merged(&self, other: &Self) -> Self {
        Self {
            excluded: self.excluded.union(&other.excluded).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }
}
