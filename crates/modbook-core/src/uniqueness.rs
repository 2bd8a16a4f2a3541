//! Phone/email uniqueness checks for an edited record.
//!
//! The store owns the data, so collisions are answered by a
//! [`CollisionLookup`] and person identity by an [`Identity`]. This module
//! fixes the order in which the answers are combined:
//!
//! 1. a different person whose phone *and* email both collide
//!    → [`UniquenessViolation::DuplicateBoth`]
//! 2. a changed phone that collides → [`UniquenessViolation::DuplicatePhone`]
//! 3. a changed email that collides → [`UniquenessViolation::DuplicateEmail`]
//!
//! "Changed" means the candidate's value is not present-and-equal to the
//! original's, so a newly present phone counts as changed.

use crate::model::record::ContactRecord;

/// The message for a joint phone and email collision.
pub const MESSAGE_DUPLICATE_PHONE_AND_EMAIL: &str =
    "This email and this phone number already exist in the address book.";
/// The message for a phone collision.
pub const MESSAGE_DUPLICATE_PHONE_NUMBER: &str =
    "This phone number already exists in the address book";
/// The message for an email collision.
pub const MESSAGE_DUPLICATE_EMAIL: &str = "This email already exists in the address book.";

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Answers whether another stored record already holds a value.
///
/// `excluding` is the record being edited; it never counts as a collision
/// with itself. A candidate without a phone (or email) never collides on it.
pub trait CollisionLookup {
    /// Does any record other than `excluding` hold `candidate`'s phone?
    fn phone_collides(&self, candidate: &ContactRecord, excluding: &ContactRecord) -> bool;

    /// Does any record other than `excluding` hold `candidate`'s email?
    fn email_collides(&self, candidate: &ContactRecord, excluding: &ContactRecord) -> bool;
}

/// Decides whether two records describe the same person.
pub trait Identity {
    fn is_same_person(&self, a: &ContactRecord, b: &ContactRecord) -> bool;
}

/// Two records are the same person when their names are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SameName;

impl Identity for SameName {
    fn is_same_person(&self, a: &ContactRecord, b: &ContactRecord) -> bool {
        a.name() == b.name()
    }
}

/// Two records are the same person when they share a present phone or a
/// present email. A candidate that changes both is someone else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamePhoneOrEmail;

impl Identity for SamePhoneOrEmail {
    fn is_same_person(&self, a: &ContactRecord, b: &ContactRecord) -> bool {
        a.is_phone_present_and_same(b) || a.is_email_present_and_same(b)
    }
}

// ---------------------------------------------------------------------------
// UniquenessViolation
// ---------------------------------------------------------------------------

/// Why a candidate record may not replace the original.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum UniquenessViolation {
    /// Phone and email both belong to other records.
    #[error("{}", MESSAGE_DUPLICATE_PHONE_AND_EMAIL)]
    DuplicateBoth,
    /// The new phone belongs to another record.
    #[error("{}", MESSAGE_DUPLICATE_PHONE_NUMBER)]
    DuplicatePhone,
    /// The new email belongs to another record.
    #[error("{}", MESSAGE_DUPLICATE_EMAIL)]
    DuplicateEmail,
}

/// Check `candidate` (the merge of `original`) against the store.
///
/// # Errors
/// Returns the highest-priority [`UniquenessViolation`], if any.
pub fn check_uniqueness<P, I>(
    original: &ContactRecord,
    candidate: &ContactRecord,
    lookup: &P,
    identity: &I,
) -> Result<(), UniquenessViolation>
where
    P: CollisionLookup + ?Sized,
    I: Identity + ?Sized,
{
    let phone_exists = lookup.phone_collides(candidate, original);
    let email_exists = lookup.email_collides(candidate, original);

    let violation = if !identity.is_same_person(original, candidate) && phone_exists && email_exists
    {
        Some(UniquenessViolation::DuplicateBoth)
    } else if !original.is_phone_present_and_same(candidate) && phone_exists {
        Some(UniquenessViolation::DuplicatePhone)
    } else if !original.is_email_present_and_same(candidate) && email_exists {
        Some(UniquenessViolation::DuplicateEmail)
    } else {
        None
    };

    match violation {
        Some(v) => {
            tracing::debug!(?v, phone_exists, email_exists, "uniqueness check failed");
            Err(v)
        }
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
