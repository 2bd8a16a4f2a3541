//! The edit command: change one displayed person in the address book.
//!
//! Execution order is fixed and all-or-nothing:
//!
//! 1. resolve the one-based index against the displayed (filtered) list
//! 2. merge the descriptor into the selected person
//! 3. check phone/email uniqueness against every other person
//! 4. replace the person and show the full list again
//!
//! Any failure before step 4 leaves the book exactly as it was.

use std::fmt;

use serde::Serialize;

use modbook_core::{
    ContactRecord, EditDescriptor, FieldChange, Identity, SamePhoneOrEmail, check_uniqueness, diff,
    merge,
};

use crate::error::EditError;
use crate::store::AddressBook;

/// Label before the edited person in the success message, which reads
/// `"{changes}\nEdited Person: {person}"`.
pub const EDITED_PERSON_LABEL: &str = "Edited Person: ";

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// A one-based position in the displayed list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Index(usize);

impl Index {
    /// Index from a one-based position. Zero is never a valid position, so
    /// it is kept as-is and rejected at execution time.
    #[must_use]
    pub const fn from_one_based(n: usize) -> Self {
        Self(n)
    }

    /// Index from a zero-based offset.
    #[must_use]
    pub const fn from_zero_based(n: usize) -> Self {
        Self(n + 1)
    }

    #[must_use]
    pub const fn one_based(self) -> usize {
        self.0
    }

    /// The zero-based offset, or `None` for position zero.
    #[must_use]
    pub const fn zero_based(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CommandResult
// ---------------------------------------------------------------------------

/// What a successful edit reports back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    /// Text shown to the user.
    pub feedback: String,
    /// The person after the edit.
    pub person: ContactRecord,
    /// Every field that changed, in reporting order.
    pub changes: Vec<FieldChange>,
}

// ---------------------------------------------------------------------------
// EditCommand
// ---------------------------------------------------------------------------

/// Edits the person at `index` with the fields set in `descriptor`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditCommand {
    index: Index,
    descriptor: EditDescriptor,
}

impl EditCommand {
    /// Build the command.
    ///
    /// # Errors
    /// Returns [`EditError::EmptyEdit`] if `descriptor` sets no field.
    pub fn new(index: Index, descriptor: EditDescriptor) -> Result<Self, EditError> {
        if !descriptor.is_non_empty() {
            return Err(EditError::EmptyEdit);
        }
        Ok(Self { index, descriptor })
    }

    #[must_use]
    pub const fn index(&self) -> Index {
        self.index
    }

    #[must_use]
    pub const fn descriptor(&self) -> &EditDescriptor {
        &self.descriptor
    }

    /// Run the edit against `book`. The edited person stays the same person
    /// while it keeps its phone or its email ([`SamePhoneOrEmail`]).
    pub fn execute(&self, book: &mut AddressBook) -> Result<CommandResult, EditError> {
        self.execute_with(book, &SamePhoneOrEmail)
    }

    /// Run the edit against `book` with a caller-chosen identity rule.
    pub fn execute_with<I>(
        &self,
        book: &mut AddressBook,
        identity: &I,
    ) -> Result<CommandResult, EditError>
    where
        I: Identity + ?Sized,
    {
        let (slot, original) = self.select(book)?;

        let candidate = match merge(&original, &self.descriptor) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(index = %self.index, error = %e, "edit rejected: invalid role edit");
                return Err(e.into());
            }
        };
        tracing::debug!(index = %self.index, candidate = %candidate, "edit merged");

        let lookup = book.lookup_excluding(slot);
        if let Err(v) = check_uniqueness(&original, &candidate, &lookup, identity) {
            tracing::warn!(index = %self.index, violation = ?v, "edit rejected: duplicate value");
            return Err(v.into());
        }

        book.replace_at(slot, candidate.clone())?;
        book.show_all();

        let changes = diff::changes(&original, &candidate);
        let feedback = format!(
            "{}\n{EDITED_PERSON_LABEL}{candidate}",
            diff::render_changes(&changes)
        );
        tracing::info!(
            index = %self.index,
            name = %candidate.name(),
            changed_fields = changes.len(),
            "person edited"
        );
        Ok(CommandResult {
            feedback,
            person: candidate,
            changes,
        })
    }

    /// The storage slot and a copy of the person the index names.
    fn select(&self, book: &AddressBook) -> Result<(usize, ContactRecord), EditError> {
        let slot = self.index.zero_based().and_then(|i| book.displayed_slot(i));
        match slot.and_then(|slot| book.persons().get(slot).map(|p| (slot, p.clone()))) {
            Some(selected) => Ok(selected),
            None => {
                let displayed = book.filtered().len();
                tracing::warn!(index = %self.index, displayed, "edit rejected: index out of range");
                Err(EditError::IndexOutOfRange {
                    index: self.index.one_based(),
                    displayed,
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------
