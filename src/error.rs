//! Command-layer error type for modbook.
//!
//! Defines [`EditError`], the error returned by every step of an edit
//! command. The `Display` text of the validation variants is shown to the
//! user verbatim, so it matches the established feedback messages exactly.

use std::fmt;

use modbook_core::{InvalidRoleEdit, MergeError, UniquenessViolation};

use crate::store::StoreError;

/// Message for an edit that sets no field.
pub const MESSAGE_NOT_EDITED: &str = "At least one field to edit must be provided.";
/// Prefix of the message for an index outside the displayed list.
pub const MESSAGE_INVALID_PERSON_INDEX: &str = "The person index provided is invalid";

// ---------------------------------------------------------------------------
// EditError
// ---------------------------------------------------------------------------

/// Why an edit command was rejected. No variant leaves the book modified.
#[derive(Debug)]
pub enum EditError {
    /// The one-based index does not name a displayed person.
    IndexOutOfRange {
        /// The index as the user typed it.
        index: usize,
        /// How many persons were displayed.
        displayed: usize,
    },

    /// The descriptor sets no field.
    EmptyEdit,

    /// Phone and email both belong to other persons.
    DuplicateBoth,

    /// The new phone belongs to another person.
    DuplicatePhone,

    /// The new email belongs to another person.
    DuplicateEmail,

    /// The role edit names roles or modules the person does not hold.
    InvalidRoleEdit(InvalidRoleEdit),

    /// The address book could not be updated.
    Store(StoreError),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, .. } => {
                write!(f, "{MESSAGE_INVALID_PERSON_INDEX}: {index}")
            }
            Self::EmptyEdit => f.write_str(MESSAGE_NOT_EDITED),
            Self::DuplicateBoth => write!(f, "{}", UniquenessViolation::DuplicateBoth),
            Self::DuplicatePhone => write!(f, "{}", UniquenessViolation::DuplicatePhone),
            Self::DuplicateEmail => write!(f, "{}", UniquenessViolation::DuplicateEmail),
            Self::InvalidRoleEdit(err) => {
                write!(f, "{}\n{err}", modbook_core::merge::MESSAGE_INVALID_VALUES)
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

// ---------------------------------------------------------------------------
// std::error::Error
// ---------------------------------------------------------------------------

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRoleEdit(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// From impls
// ---------------------------------------------------------------------------

impl From<UniquenessViolation> for EditError {
    fn from(v: UniquenessViolation) -> Self {
        match v {
            UniquenessViolation::DuplicateBoth => Self::DuplicateBoth,
            UniquenessViolation::DuplicatePhone => Self::DuplicatePhone,
            UniquenessViolation::DuplicateEmail => Self::DuplicateEmail,
        }
    }
}

impl From<MergeError> for EditError {
    fn from(err: MergeError) -> Self {
        match err {
            MergeError::InvalidRoleEdit(inner) => Self::InvalidRoleEdit(inner),
        }
    }
}

impl From<StoreError> for EditError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
