//! Merge engine: apply an [`EditDescriptor`] to a [`ContactRecord`].
//!
//! Field resolution:
//!
//! - `name`, `phone`, `email`, `address`, `description`: the override wins
//!   when set; an unset slot keeps the original value, present or absent.
//! - `tags`: unset keeps the original set verbatim, clear empties it, set
//!   replaces it wholesale.
//! - module roles: the role edit, if any, is applied to the original map;
//!   otherwise the map is kept.
//!
//! The result is always a new record. No store access and no I/O happen
//! here, so the function can be called from anywhere.

use crate::model::descriptor::EditDescriptor;
use crate::model::record::ContactRecord;
use crate::role_edit::InvalidRoleEdit;

/// Prefix for every merge failure reported to the user.
pub const MESSAGE_INVALID_VALUES: &str = "Edit failed due to invalid values provided: ";

/// A merge that could not produce a candidate record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The role edit named roles or modules the person does not hold.
    #[error("{}\n{}", MESSAGE_INVALID_VALUES, .0)]
    InvalidRoleEdit(#[source] InvalidRoleEdit),
}

/// Build the candidate record produced by applying `descriptor` to
/// `original`.
///
/// # Errors
/// Returns [`MergeError::InvalidRoleEdit`] if the descriptor's role edit
/// cannot be applied to the original's roles.
pub fn merge(
    original: &ContactRecord,
    descriptor: &EditDescriptor,
) -> Result<ContactRecord, MergeError> {
    let roles = match descriptor.role_edit() {
        Some(op) => op.apply(original.roles()).map_err(MergeError::InvalidRoleEdit)?,
        None => original.roles().clone(),
    };

    let merged = ContactRecord::new(descriptor.name().resolve(original.name()))
        .with_phone(descriptor.phone().resolve_optional(original.phone()))
        .with_email(descriptor.email().resolve_optional(original.email()))
        .with_address(descriptor.address().resolve_optional(original.address()))
        .with_tags(descriptor.tags().resolve(original.tags()))
        .with_roles(roles)
        .with_description(
            descriptor
                .description()
                .resolve_optional(original.description()),
        );

    tracing::debug!(
        name = %merged.name(),
        changed = merged != *original,
        "merged edit descriptor"
    );
    Ok(merged)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::roles::{ModuleRoleMap, ModuleRolePair};
    use crate::model::types::{
        Address, Description, Email, ModuleCode, Name, Phone, RoleType, Tag,
    };
    use crate::role_edit::{RoleEditOperation, RoleTarget};

    fn code(s: &str) -> ModuleCode {
        ModuleCode::new(s).unwrap()
    }

    fn original() -> ContactRecord {
        ContactRecord::new(Name::new("Alex Yeoh").unwrap())
            .with_phone(Some(Phone::new("91234567").unwrap()))
            .with_email(Some(Email::new("a@x.com").unwrap()))
            .with_tags(
                [Tag::new("friends").unwrap(), Tag::new("cs").unwrap()]
                    .into_iter()
                    .collect(),
            )
            .with_roles(
                [ModuleRolePair::new(code("CS1101S"), RoleType::Student)]
                    .into_iter()
                    .collect(),
            )
            .with_description(Some(Description::new("Lab partner").unwrap()))
    }

    #[test]
    fn empty_descriptor_is_identity() {
        let p = original();
        let merged = merge(&p, &EditDescriptor::default()).unwrap();
        assert_eq!(merged, p);
    }

    #[test]
    fn override_replaces_only_named_fields() {
        let p = original();
        let d = EditDescriptor::builder()
            .phone(Phone::new("98765432").unwrap())
            .address(Address::new("NUS").unwrap())
            .build();
        let merged = merge(&p, &d).unwrap();
        assert_eq!(merged.phone().unwrap().as_str(), "98765432");
        assert_eq!(merged.address().unwrap().as_str(), "NUS");
        assert_eq!(merged.name(), p.name());
        assert_eq!(merged.email(), p.email());
        assert_eq!(merged.tags(), p.tags());
        assert_eq!(merged.roles(), p.roles());
        assert_eq!(merged.description(), p.description());
    }

    #[test]
    fn unset_slot_keeps_absent_field_absent() {
        let p = original().with_email(None);
        let d = EditDescriptor::builder().name(Name::new("Bob").unwrap()).build();
        let merged = merge(&p, &d).unwrap();
        assert!(merged.email().is_none());
        assert_eq!(merged.name().as_str(), "Bob");
    }

    #[test]
    fn explicit_empty_tags_clear_the_set() {
        let p = original();
        let d = EditDescriptor::builder().tags(Vec::new()).build();
        let merged = merge(&p, &d).unwrap();
        assert!(merged.tags().is_empty());
    }

    #[test]
    fn tags_are_replaced_not_merged() {
        let p = original();
        let d = EditDescriptor::builder()
            .tags([Tag::new("colleagues").unwrap()])
            .build();
        let merged = merge(&p, &d).unwrap();
        let names: Vec<&str> = merged.tags().iter().map(Tag::as_str).collect();
        assert_eq!(names, vec!["colleagues"]);
    }

    #[test]
    fn role_edit_applies_to_original_roles() {
        let p = original();
        let d = EditDescriptor::builder()
            .role_edit(RoleEditOperation::add([RoleTarget::new(
                code("MA1521"),
                Some(RoleType::Tutor),
            )]))
            .build();
        let merged = merge(&p, &d).unwrap();
        assert_eq!(merged.roles().to_string(), "CS1101S-Student MA1521-Tutor");
        // The original is untouched.
        assert_eq!(p.roles().len(), 1);
    }

    #[test]
    fn invalid_role_edit_is_wrapped() {
        let p = original();
        let d = EditDescriptor::builder()
            .role_edit(RoleEditOperation::delete([RoleTarget::new(
                code("CS1101S"),
                Some(RoleType::Tutor),
            )]))
            .build();
        let err = merge(&p, &d).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Edit failed due to invalid values provided: \n\
             Module role CS1101S-Tutor does not exist for this person."
        );
        assert!(err.to_string().starts_with(MESSAGE_INVALID_VALUES));
    }

    #[test]
    fn delete_all_roles_leaves_empty_map() {
        let p = original();
        let d = EditDescriptor::builder()
            .role_edit(RoleEditOperation::delete([RoleTarget::new(code("CS1101S"), None)]))
            .build();
        let merged = merge(&p, &d).unwrap();
        assert_eq!(merged.roles(), &ModuleRoleMap::new());
    }
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------
