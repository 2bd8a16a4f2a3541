//! Role-edit operations on a [`ModuleRoleMap`].
//!
//! A [`RoleEditOperation`] is a closed set of two variants:
//!
//! - **Add** unions the targets into the map. A target without a role gets
//!   [`RoleType::DEFAULT`]. Adding a pair that is already present is a no-op.
//! - **Delete** removes targets. A target with a role removes exactly that
//!   pair; a target without a role removes every pair for the module.
//!
//! Application is all-or-nothing: if any delete target is missing from the
//! existing map, the whole operation fails and nothing is returned.
//!
//! # Text form
//!
//! ```text
//! +CS1101S MA1521-TA     add CS1101S-Student and MA1521-Tutor
//! -CS1101S               delete every CS1101S role
//! -MA1521-tutor          delete MA1521-Tutor only
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::model::roles::{ModuleRoleMap, ModuleRolePair};
use crate::model::types::{ErrorKind, ModuleCode, RoleType, ValidationError};

/// Usage text reported when an operation fails to parse.
pub const OPERATION_USAGE: &str = "Module role operation follows this format:\n\
    +(MODULECODE[-ROLETYPE])+ for adding new module role(s)\n\
    or -(MODULECODE[-ROLETYPE])+ for deleting existing module role(s)\n\
    e.g. +CS1101S MA1521-TA\n\
    adds CS1101S-Student and MA1521-Tutor to the person";

const MODULE_ROLE_ADDED: &str = "Module role(s) added: ";
const MODULE_ROLE_DELETED: &str = "Module role(s) deleted: ";

// ---------------------------------------------------------------------------
// RoleTarget
// ---------------------------------------------------------------------------

/// A module code with an optional role, as written by the user.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoleTarget {
    /// The module.
    pub code: ModuleCode,
    /// The role, or `None` for "default" (add) / "any" (delete).
    pub role: Option<RoleType>,
}

impl RoleTarget {
    #[must_use]
    pub const fn new(code: ModuleCode, role: Option<RoleType>) -> Self {
        Self { code, role }
    }

    /// The pair this target adds, filling in the default role.
    #[must_use]
    pub fn resolve_for_add(&self) -> ModuleRolePair {
        ModuleRolePair::new(self.code.clone(), self.role.unwrap_or(RoleType::DEFAULT))
    }
}

impl fmt::Display for RoleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Some(role) => write!(f, "{}-{role}", self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

impl FromStr for RoleTarget {
    type Err = ValidationError;

    /// Parses `CODE` or `CODE-ROLE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((code, role)) => Ok(Self::new(code.parse()?, Some(role.parse()?))),
            None => Ok(Self::new(s.parse()?, None)),
        }
    }
}

// ---------------------------------------------------------------------------
// RoleEditFailure / InvalidRoleEdit
// ---------------------------------------------------------------------------

/// Why a single delete target could not be applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoleEditFailure {
    /// A delete named a role the person does not hold in that module.
    #[error("Module role {0} does not exist for this person.")]
    MissingRole(ModuleRolePair),
    /// A delete named a module in which the person holds no role at all.
    #[error("Module code {0} does not exist for this person.")]
    MissingModule(ModuleCode),
}

/// A role edit that could not be applied. Lists every failing target, one
/// per line, in target order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidRoleEdit {
    /// The failing targets. Never empty.
    pub failures: Vec<RoleEditFailure>,
}

impl fmt::Display for InvalidRoleEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidRoleEdit {}

// ---------------------------------------------------------------------------
// RoleEditOperation
// ---------------------------------------------------------------------------

/// An edit to a person's module roles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleEditOperation {
    /// Union the targets into the map.
    Add {
        /// Targets to add; a missing role means [`RoleType::DEFAULT`].
        targets: BTreeSet<RoleTarget>,
    },
    /// Remove the targets from the map.
    Delete {
        /// Targets to remove; a missing role means every role for the code.
        targets: BTreeSet<RoleTarget>,
    },
}

impl RoleEditOperation {
    /// An `Add` operation over `targets`.
    pub fn add<I: IntoIterator<Item = RoleTarget>>(targets: I) -> Self {
        Self::Add {
            targets: targets.into_iter().collect(),
        }
    }

    /// A `Delete` operation over `targets`.
    pub fn delete<I: IntoIterator<Item = RoleTarget>>(targets: I) -> Self {
        Self::Delete {
            targets: targets.into_iter().collect(),
        }
    }

    /// Apply the operation to `existing`, returning the new map.
    ///
    /// `existing` is never modified. Delete targets are checked against
    /// `existing`, so overlapping targets (e.g. `-CS1101S CS1101S-TA`) are
    /// valid as long as each names something the person held before.
    ///
    /// # Errors
    /// Returns [`InvalidRoleEdit`] if any delete target is absent.
    pub fn apply(&self, existing: &ModuleRoleMap) -> Result<ModuleRoleMap, InvalidRoleEdit> {
        match self {
            Self::Add { targets } => {
                let added: ModuleRoleMap = targets.iter().map(RoleTarget::resolve_for_add).collect();
                let result = existing.union(&added);
                tracing::debug!(
                    before = existing.len(),
                    after = result.len(),
                    "applied module role add"
                );
                Ok(result)
            }
            Self::Delete { targets } => {
                let mut removed = BTreeSet::new();
                let mut failures = Vec::new();
                for target in targets {
                    match target.role {
                        Some(role) => {
                            let pair = ModuleRolePair::new(target.code.clone(), role);
                            if existing.contains(&pair) {
                                removed.insert(pair);
                            } else {
                                failures.push(RoleEditFailure::MissingRole(pair));
                            }
                        }
                        None if existing.contains_code(&target.code) => {
                            removed.extend(existing.pairs_for(&target.code).cloned());
                        }
                        None => failures.push(RoleEditFailure::MissingModule(target.code.clone())),
                    }
                }
                if !failures.is_empty() {
                    tracing::debug!(failures = failures.len(), "module role delete rejected");
                    return Err(InvalidRoleEdit { failures });
                }
                let removed: ModuleRoleMap = removed.into_iter().collect();
                let result = existing.difference(&removed);
                tracing::debug!(
                    before = existing.len(),
                    after = result.len(),
                    "applied module role delete"
                );
                Ok(result)
            }
        }
    }
}

impl fmt::Display for RoleEditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, targets) = match self {
            Self::Add { targets } => ('+', targets),
            Self::Delete { targets } => ('-', targets),
        };
        write!(f, "{sign}")?;
        for (i, target) in targets.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{target}")?;
        }
        Ok(())
    }
}

impl FromStr for RoleEditOperation {
    type Err = ValidationError;

    /// Parses `+CODE[-ROLE] ...` or `-CODE[-ROLE] ...`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let usage = || ValidationError {
            kind: ErrorKind::RoleEditOperation,
            value: s.to_owned(),
            reason: OPERATION_USAGE.to_owned(),
        };
        let trimmed = s.trim();
        let (is_add, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('-') {
            (false, rest)
        } else {
            return Err(usage());
        };
        let targets = rest
            .split_whitespace()
            .map(str::parse::<RoleTarget>)
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|_| usage())?;
        if targets.is_empty() {
            return Err(usage());
        }
        Ok(if is_add {
            Self::Add { targets }
        } else {
            Self::Delete { targets }
        })
    }
}

// ---------------------------------------------------------------------------
// describe_role_changes
// ---------------------------------------------------------------------------

/// Describe the pairs added and removed between two maps.
///
/// Produces up to two lines, `Module role(s) added: ...` then
/// `Module role(s) deleted: ...`, each listing pairs space-joined in
/// (code, role) order. A line is omitted when its set is empty; identical
/// maps give an empty string.
#[must_use]
pub fn describe_role_changes(before: &ModuleRoleMap, after: &ModuleRoleMap) -> String {
    let added = after.difference(before);
    let removed = before.difference(after);
    let mut lines = Vec::with_capacity(2);
    if !added.is_empty() {
        lines.push(format!("{MODULE_ROLE_ADDED}{added}"));
    }
    if !removed.is_empty() {
        lines.push(format!("{MODULE_ROLE_DELETED}{removed}"));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------
