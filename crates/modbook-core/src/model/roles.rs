//! Module role assignments.
//!
//! A [`ModuleRoleMap`] is a multimap from [`ModuleCode`] to [`RoleType`],
//! stored as an ordered set of [`ModuleRolePair`]s. Membership is exact:
//! a pair is present only if both the code and the role match.
//!
//! Iteration order is module code, then role, so every rendering of a map
//! (and of a difference between two maps) is deterministic.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{ModuleCode, RoleType};

// ---------------------------------------------------------------------------
// ModuleRolePair
// ---------------------------------------------------------------------------

/// One role held in one module, rendered as `CS1101S-Student`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleRolePair {
    /// The module.
    pub code: ModuleCode,
    /// The role held in that module.
    pub role: RoleType,
}

impl ModuleRolePair {
    /// Create a pair.
    #[must_use]
    pub const fn new(code: ModuleCode, role: RoleType) -> Self {
        Self { code, role }
    }
}

impl fmt::Display for ModuleRolePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.code, self.role)
    }
}

// ---------------------------------------------------------------------------
// ModuleRoleMap
// ---------------------------------------------------------------------------

/// The set of module roles a person holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleRoleMap {
    pairs: BTreeSet<ModuleRolePair>,
}

impl ModuleRoleMap {
    /// An empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pairs: BTreeSet::new(),
        }
    }

    /// Returns `true` if the exact pair is present.
    #[must_use]
    pub fn contains(&self, pair: &ModuleRolePair) -> bool {
        self.pairs.contains(pair)
    }

    /// Returns `true` if any role is held for `code`.
    #[must_use]
    pub fn contains_code(&self, code: &ModuleCode) -> bool {
        self.pairs_for(code).next().is_some()
    }

    /// Every pair whose module code is `code`, in role order.
    pub fn pairs_for<'a>(
        &'a self,
        code: &'a ModuleCode,
    ) -> impl Iterator<Item = &'a ModuleRolePair> + 'a {
        self.pairs.iter().filter(move |p| &p.code == code)
    }

    /// Iterate all pairs in (code, role) order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleRolePair> {
        self.pairs.iter()
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no roles are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Set union. Pairs already present are not duplicated.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            pairs: self.pairs.union(&other.pairs).cloned().collect(),
        }
    }

    /// Pairs in `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            pairs: self.pairs.difference(&other.pairs).cloned().collect(),
        }
    }
}

impl FromIterator<ModuleRolePair> for ModuleRoleMap {
    fn from_iter<I: IntoIterator<Item = ModuleRolePair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ModuleRoleMap {
    type Item = &'a ModuleRolePair;
    type IntoIter = std::collections::btree_set::Iter<'a, ModuleRolePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Space-separated pairs, e.g. `CS1101S-Student MA1521-Tutor`.
impl fmt::Display for ModuleRoleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for pair in &self.pairs {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{pair}")?;
            first = false;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
