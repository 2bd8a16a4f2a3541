//! Change reporting between two versions of a record.
//!
//! [`changes`] collects one [`FieldChange`] per differing field, in the fixed
//! order name, phone, email, address, tags, module roles, description.
//! [`describe_changes`] renders that list in a single pass.

use std::fmt;

use serde::Serialize;

use crate::model::record::{ContactRecord, render_tags};
use crate::role_edit::describe_role_changes;

/// The result when two records are identical.
pub const NO_CHANGES: &str = "No changes made.";
/// Header line when at least one field differs.
pub const CHANGES_HEADER: &str = "Change(s) made: ";

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A field of a contact record, in reporting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Phone,
    Email,
    Address,
    Tags,
    ModuleRoles,
    Description,
}

impl Field {
    /// The label printed before the change.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Address => "Address",
            Self::Tags => "Tags",
            Self::ModuleRoles => "Module roles",
            Self::Description => "Description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// FieldChange
// ---------------------------------------------------------------------------

/// One changed field, with both sides already rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: Field,
    pub before: String,
    pub after: String,
    /// Pre-rendered line that replaces `Label: before -> after`. Used for
    /// module roles, whose change is reported as added/deleted pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.summary {
            Some(summary) => f.write_str(summary),
            None => write!(f, "{}: {} -> {}", self.field, self.before, self.after),
        }
    }
}

fn optional<T: fmt::Display>(value: Option<&T>, sentinel: &str) -> String {
    value.map_or_else(|| sentinel.to_owned(), ToString::to_string)
}

/// Compare two records field by field.
#[must_use]
pub fn changes(before: &ContactRecord, after: &ContactRecord) -> Vec<FieldChange> {
    let mut out = Vec::new();
    let mut push = |field, b: String, a: String| {
        out.push(FieldChange {
            field,
            before: b,
            after: a,
            summary: None,
        });
    };

    if before.name() != after.name() {
        push(Field::Name, before.name().to_string(), after.name().to_string());
    }
    if before.phone() != after.phone() {
        push(
            Field::Phone,
            optional(before.phone(), "<no phone>"),
            optional(after.phone(), "<no phone>"),
        );
    }
    if before.email() != after.email() {
        push(
            Field::Email,
            optional(before.email(), "<no email>"),
            optional(after.email(), "<no email>"),
        );
    }
    if before.address() != after.address() {
        push(
            Field::Address,
            optional(before.address(), "<no address>"),
            optional(after.address(), "<no address>"),
        );
    }
    if before.tags() != after.tags() {
        push(Field::Tags, render_tags(before.tags()), render_tags(after.tags()));
    }
    if before.roles() != after.roles() {
        out.push(FieldChange {
            field: Field::ModuleRoles,
            before: before.roles().to_string(),
            after: after.roles().to_string(),
            summary: Some(describe_role_changes(before.roles(), after.roles())),
        });
    }
    if before.description() != after.description() {
        out.push(FieldChange {
            field: Field::Description,
            before: optional(before.description(), "<no description>"),
            after: optional(after.description(), "<no description>"),
            summary: None,
        });
    }
    out
}

/// Render the change list as user feedback.
///
/// Returns exactly [`NO_CHANGES`] when nothing differs; otherwise the
/// [`CHANGES_HEADER`] line followed by one newline-terminated line per
/// changed field.
#[must_use]
pub fn render_changes(changes: &[FieldChange]) -> String {
    if changes.is_empty() {
        return NO_CHANGES.to_owned();
    }
    let mut out = format!("{CHANGES_HEADER}\n");
    for change in changes {
        out.push_str(&change.to_string());
        out.push('\n');
    }
    out
}

/// Describe every field that differs between `before` and `after`.
#[must_use]
pub fn describe_changes(before: &ContactRecord, after: &ContactRecord) -> String {
    render_changes(&changes(before, after))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------
