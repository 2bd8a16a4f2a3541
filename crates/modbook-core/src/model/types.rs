//! Field value types for a contact record.
//!
//! Every field of a [`ContactRecord`](super::record::ContactRecord) is a
//! validated newtype. Construction goes through `new` / `FromStr` /
//! `TryFrom<String>`, so a value that exists is a value that passed
//! validation. Serde round-trips through the same validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared boilerplate
// ---------------------------------------------------------------------------

/// Implements the string conversions shared by every validated text field.
///
/// The type must provide `fn validate(&str) -> Result<(), ValidationError>`.
macro_rules! text_field {
    ($ty:ident) => {
        impl $ty {
            /// Create a new value, validating format.
            ///
            /// # Errors
            /// Returns a [`ValidationError`] if the input is rejected.
            pub fn new(s: &str) -> Result<Self, ValidationError> {
                Self::validate(s)?;
                Ok(Self(s.to_owned()))
            }

            /// Return the inner string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ValidationError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::validate(&s)?;
                Ok(Self(s))
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> Self {
                v.0
            }
        }
    };
}

fn reject(kind: ErrorKind, value: &str, reason: &str) -> ValidationError {
    ValidationError {
        kind,
        value: value.to_owned(),
        reason: reason.to_owned(),
    }
}

fn require_non_blank(kind: ErrorKind, s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(reject(kind, s, "must not be blank"));
    }
    if s.starts_with(char::is_whitespace) {
        return Err(reject(kind, s, "must not start with whitespace"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

/// A person's name: alphanumeric words separated by spaces.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    fn validate(s: &str) -> Result<(), ValidationError> {
        require_non_blank(ErrorKind::Name, s)?;
        if !s.chars().all(|c| c.is_alphanumeric() || c == ' ') {
            return Err(reject(
                ErrorKind::Name,
                s,
                "names should only contain alphanumeric characters and spaces",
            ));
        }
        Ok(())
    }
}

text_field!(Name);

// ---------------------------------------------------------------------------
// Phone
// ---------------------------------------------------------------------------

/// A phone number: digits only, at least 3 of them.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits in a phone number.
    pub const MIN_DIGITS: usize = 3;

    fn validate(s: &str) -> Result<(), ValidationError> {
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(reject(
                ErrorKind::Phone,
                s,
                "phone numbers should only contain digits",
            ));
        }
        if s.len() < Self::MIN_DIGITS {
            return Err(ValidationError {
                kind: ErrorKind::Phone,
                value: s.to_owned(),
                reason: format!(
                    "phone numbers should be at least {} digits long, got {}",
                    Self::MIN_DIGITS,
                    s.len()
                ),
            });
        }
        Ok(())
    }
}

text_field!(Phone);

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

/// An email address of the form `local@domain`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    fn validate(s: &str) -> Result<(), ValidationError> {
        if s.chars().any(char::is_whitespace) {
            return Err(reject(
                ErrorKind::Email,
                s,
                "emails must not contain whitespace",
            ));
        }
        let Some((local, domain)) = s.split_once('@') else {
            return Err(reject(ErrorKind::Email, s, "emails must be of the form local@domain"));
        };
        if local.is_empty() {
            return Err(reject(ErrorKind::Email, s, "local part must not be empty"));
        }
        if domain.is_empty() || domain.contains('@') {
            return Err(reject(
                ErrorKind::Email,
                s,
                "domain must be non-empty and contain no further '@'",
            ));
        }
        if domain.starts_with('.') || domain.ends_with('.') || domain.starts_with('-') {
            return Err(reject(
                ErrorKind::Email,
                s,
                "domain must not start or end with a period or start with a hyphen",
            ));
        }
        Ok(())
    }
}

text_field!(Email);

// ---------------------------------------------------------------------------
// Address / Description
// ---------------------------------------------------------------------------

/// A free-text postal address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    fn validate(s: &str) -> Result<(), ValidationError> {
        require_non_blank(ErrorKind::Address, s)
    }
}

text_field!(Address);

/// A free-text note about the person.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    fn validate(s: &str) -> Result<(), ValidationError> {
        require_non_blank(ErrorKind::Description, s)
    }
}

text_field!(Description);

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// A single-word alphanumeric label.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    fn validate(s: &str) -> Result<(), ValidationError> {
        if s.is_empty() || !s.chars().all(char::is_alphanumeric) {
            return Err(reject(
                ErrorKind::Tag,
                s,
                "tag names should be a single alphanumeric word",
            ));
        }
        Ok(())
    }
}

text_field!(Tag);

// ---------------------------------------------------------------------------
// ModuleCode
// ---------------------------------------------------------------------------

/// A university module code such as `CS1101S` or `MA1521`.
///
/// Accepted case-insensitively and normalized to upper case: 2-3 letters,
/// 4 digits, then up to 2 letters.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleCode(String);

impl ModuleCode {
    /// Create a `ModuleCode`, normalizing to upper case.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the code is malformed.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        Self::validate(s)?;
        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Return the upper-case code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let prefix = s.chars().take_while(char::is_ascii_alphabetic).count();
        let digits = s[prefix..]
            .chars()
            .take_while(char::is_ascii_digit)
            .count();
        let suffix = &s[prefix + digits..];
        let ok = (2..=3).contains(&prefix)
            && digits == 4
            && suffix.len() <= 2
            && suffix.chars().all(|c| c.is_ascii_alphabetic());
        if !ok {
            return Err(reject(
                ErrorKind::ModuleCode,
                s,
                "module codes are 2-3 letters, 4 digits, then up to 2 letters (e.g. CS1101S)",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModuleCode {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModuleCode {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<ModuleCode> for String {
    fn from(code: ModuleCode) -> Self {
        code.0
    }
}

// ---------------------------------------------------------------------------
// RoleType
// ---------------------------------------------------------------------------

/// The role a person holds in a module.
///
/// Variant order is the sort order used when rendering role sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    /// Enrolled student. Used when an add target omits the role.
    #[default]
    Student,
    /// Tutor or teaching assistant.
    #[serde(alias = "ta")]
    Tutor,
    /// Lecturer in charge.
    #[serde(alias = "prof")]
    Professor,
}

impl RoleType {
    /// The role assumed when an add target names no role.
    pub const DEFAULT: Self = Self::Student;
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "Student"),
            Self::Tutor => write!(f, "Tutor"),
            Self::Professor => write!(f, "Professor"),
        }
    }
}

impl FromStr for RoleType {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "tutor" | "ta" => Ok(Self::Tutor),
            "professor" | "prof" => Ok(Self::Professor),
            _ => Err(reject(
                ErrorKind::RoleType,
                s,
                "role must be one of student, tutor, ta, professor, prof",
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// Which kind of value failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A [`Name`] validation error.
    Name,
    /// A [`Phone`] validation error.
    Phone,
    /// An [`Email`] validation error.
    Email,
    /// An [`Address`] validation error.
    Address,
    /// A [`Description`] validation error.
    Description,
    /// A [`Tag`] validation error.
    Tag,
    /// A [`ModuleCode`] validation error.
    ModuleCode,
    /// A [`RoleType`] validation error.
    RoleType,
    /// A role-edit operation failed to parse.
    RoleEditOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Phone => write!(f, "phone"),
            Self::Email => write!(f, "email"),
            Self::Address => write!(f, "address"),
            Self::Description => write!(f, "description"),
            Self::Tag => write!(f, "tag"),
            Self::ModuleCode => write!(f, "module code"),
            Self::RoleType => write!(f, "role type"),
            Self::RoleEditOperation => write!(f, "module role operation"),
        }
    }
}

/// A validation error for contact field values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}: {reason}")]
pub struct ValidationError {
    /// What kind of value was being validated.
    pub kind: ErrorKind,
    /// The invalid value.
    pub value: String,
    /// Human-readable explanation.
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
