//! Edit descriptors: sparse patches over a [`ContactRecord`].
//!
//! Each field slot is either unset (keep the original value) or set (use
//! the override). Tags additionally have an explicit clear state, because
//! "replace the tag set with nothing" and "leave the tags alone" are
//! different requests.
//!
//! Descriptors are immutable once built; use [`EditDescriptor::builder`].
//!
//! [`ContactRecord`]: super::record::ContactRecord

use std::collections::BTreeSet;

use super::record::Tags;
use super::types::{Address, Description, Email, Name, Phone, Tag};
use crate::role_edit::RoleEditOperation;

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// A two-state override slot for a field that cannot be cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch<T> {
    /// No change requested.
    Unset,
    /// Replace the field with this value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Patch<T> {
    /// Returns `true` if an override is present.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// The override, if any.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(v) => Some(v),
            Self::Unset => None,
        }
    }

    /// Resolve against the current value: the override wins, otherwise the
    /// current value is kept.
    #[must_use]
    pub fn resolve(&self, current: &T) -> T
    where
        T: Clone,
    {
        self.as_set().unwrap_or(current).clone()
    }

    /// Like [`resolve`](Self::resolve) for an optional field. An unset slot
    /// keeps whatever the original held, present or absent.
    #[must_use]
    pub fn resolve_optional(&self, current: Option<&T>) -> Option<T>
    where
        T: Clone,
    {
        self.as_set().or(current).cloned()
    }
}

// ---------------------------------------------------------------------------
// TagsPatch
// ---------------------------------------------------------------------------

/// A three-state override slot for the tag set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TagsPatch {
    /// No change requested; the original set is kept verbatim.
    #[default]
    Unset,
    /// Replace the tag set with the empty set.
    Clear,
    /// Replace the tag set with this non-empty set.
    Set(Tags),
}

impl TagsPatch {
    /// Build a replacing patch. An empty set becomes [`TagsPatch::Clear`].
    #[must_use]
    pub fn replace_with(tags: Tags) -> Self {
        if tags.is_empty() {
            Self::Clear
        } else {
            Self::Set(tags)
        }
    }

    /// Returns `true` unless the slot is [`TagsPatch::Unset`].
    #[must_use]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Resolve against the current tag set. Replacement is wholesale, never
    /// an element-wise merge.
    #[must_use]
    pub fn resolve(&self, current: &Tags) -> Tags {
        match self {
            Self::Unset => current.clone(),
            Self::Clear => BTreeSet::new(),
            Self::Set(tags) => tags.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// EditDescriptor
// ---------------------------------------------------------------------------

/// The fields to change on a contact, plus an optional role edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditDescriptor {
    name: Patch<Name>,
    phone: Patch<Phone>,
    email: Patch<Email>,
    address: Patch<Address>,
    tags: TagsPatch,
    role_edit: Option<RoleEditOperation>,
    description: Patch<Description>,
}

impl EditDescriptor {
    /// Start building a descriptor with every slot unset.
    #[must_use]
    pub fn builder() -> EditDescriptorBuilder {
        EditDescriptorBuilder::default()
    }

    /// Returns `true` if at least one of the seven slots is present,
    /// including the role edit.
    #[must_use]
    pub const fn is_non_empty(&self) -> bool {
        self.name.is_set()
            || self.phone.is_set()
            || self.email.is_set()
            || self.address.is_set()
            || self.tags.is_set()
            || self.role_edit.is_some()
            || self.description.is_set()
    }

    #[must_use]
    pub const fn name(&self) -> &Patch<Name> {
        &self.name
    }

    #[must_use]
    pub const fn phone(&self) -> &Patch<Phone> {
        &self.phone
    }

    #[must_use]
    pub const fn email(&self) -> &Patch<Email> {
        &self.email
    }

    #[must_use]
    pub const fn address(&self) -> &Patch<Address> {
        &self.address
    }

    #[must_use]
    pub const fn tags(&self) -> &TagsPatch {
        &self.tags
    }

    #[must_use]
    pub const fn role_edit(&self) -> Option<&RoleEditOperation> {
        self.role_edit.as_ref()
    }

    #[must_use]
    pub const fn description(&self) -> &Patch<Description> {
        &self.description
    }
}

// ---------------------------------------------------------------------------
// EditDescriptorBuilder
// ---------------------------------------------------------------------------

/// Builder for [`EditDescriptor`]. Each setter fills one slot; setting a
/// slot twice keeps the last value.
#[derive(Clone, Debug, Default)]
pub struct EditDescriptorBuilder {
    inner: EditDescriptor,
}

impl EditDescriptorBuilder {
    #[must_use]
    pub fn name(mut self, name: Name) -> Self {
        self.inner.name = Patch::Set(name);
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: Phone) -> Self {
        self.inner.phone = Patch::Set(phone);
        self
    }

    #[must_use]
    pub fn email(mut self, email: Email) -> Self {
        self.inner.email = Patch::Set(email);
        self
    }

    #[must_use]
    pub fn address(mut self, address: Address) -> Self {
        self.inner.address = Patch::Set(address);
        self
    }

    /// Replace the tag set. An empty iterator clears all tags.
    #[must_use]
    pub fn tags<I: IntoIterator<Item = Tag>>(mut self, tags: I) -> Self {
        self.inner.tags = TagsPatch::replace_with(tags.into_iter().collect());
        self
    }

    /// Remove every tag.
    #[must_use]
    pub fn clear_tags(mut self) -> Self {
        self.inner.tags = TagsPatch::Clear;
        self
    }

    #[must_use]
    pub fn role_edit(mut self, op: RoleEditOperation) -> Self {
        self.inner.role_edit = Some(op);
        self
    }

    #[must_use]
    pub fn description(mut self, description: Description) -> Self {
        self.inner.description = Patch::Set(description);
        self
    }

    /// Finish building. The result may be empty; callers check
    /// [`EditDescriptor::is_non_empty`].
    #[must_use]
    pub fn build(self) -> EditDescriptor {
        self.inner
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
