//! The contact record value type.
//!
//! A [`ContactRecord`] is an immutable snapshot of one person. Editing never
//! mutates a record in place; the merge engine builds a new one from the
//! original and an [`EditDescriptor`](super::descriptor::EditDescriptor).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::roles::ModuleRoleMap;
use super::types::{Address, Description, Email, Name, Phone, Tag};

/// An ordered set of tags. Ordering keeps rendering deterministic.
pub type Tags = BTreeSet<Tag>;

/// One person's data.
///
/// Constructed with [`ContactRecord::new`] and the `with_*` methods, which
/// consume and return the record so a finished value is never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactRecord {
    name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<Phone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<Email>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    roles: ModuleRoleMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<Description>,
}

impl ContactRecord {
    /// A record holding only a name.
    #[must_use]
    pub const fn new(name: Name) -> Self {
        Self {
            name,
            phone: None,
            email: None,
            address: None,
            tags: BTreeSet::new(),
            roles: ModuleRoleMap::new(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: Option<Phone>) -> Self {
        self.phone = phone;
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: Option<Email>) -> Self {
        self.email = email;
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: Option<Address>) -> Self {
        self.address = address;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: ModuleRoleMap) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<Description>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub const fn phone(&self) -> Option<&Phone> {
        self.phone.as_ref()
    }

    #[must_use]
    pub const fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    #[must_use]
    pub const fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    #[must_use]
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    #[must_use]
    pub const fn roles(&self) -> &ModuleRoleMap {
        &self.roles
    }

    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns `true` if both records hold a phone and the phones are equal.
    ///
    /// An absent phone on either side counts as "not the same", so a phone
    /// that is newly present on an edited record counts as changed.
    #[must_use]
    pub fn is_phone_present_and_same(&self, other: &Self) -> bool {
        matches!((&self.phone, &other.phone), (Some(a), Some(b)) if a == b)
    }

    /// Returns `true` if both records hold an email and the emails are equal.
    #[must_use]
    pub fn is_email_present_and_same(&self, other: &Self) -> bool {
        matches!((&self.email, &other.email), (Some(a), Some(b)) if a == b)
    }
}

/// Renders a tag set as `[friends, owesMoney]`.
pub(crate) fn render_tags(tags: &Tags) -> String {
    let joined: Vec<&str> = tags.iter().map(Tag::as_str).collect();
    format!("[{}]", joined.join(", "))
}

/// One-line summary: `Name; Phone: ..; Email: ..; ...`. Absent fields and
/// empty collections are omitted.
impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(phone) = &self.phone {
            write!(f, "; Phone: {phone}")?;
        }
        if let Some(email) = &self.email {
            write!(f, "; Email: {email}")?;
        }
        if let Some(address) = &self.address {
            write!(f, "; Address: {address}")?;
        }
        if !self.tags.is_empty() {
            write!(f, "; Tags: {}", render_tags(&self.tags))?;
        }
        if !self.roles.is_empty() {
            write!(f, "; Module roles: {}", self.roles)?;
        }
        if let Some(description) = &self.description {
            write!(f, "; Description: {description}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
