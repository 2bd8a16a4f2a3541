//! Core domain logic for modbook.
//!
//! Everything here is a pure value transformation: no store, no I/O.
//!
//! - [`model`]: contact records, module role maps, edit descriptors
//! - [`role_edit`]: add/delete operations on a role map
//! - [`merge`]: apply an edit descriptor to a record
//! - [`uniqueness`]: phone/email collision priority for an edited record
//! - [`diff`]: human-readable change summary between two records

pub mod diff;
pub mod merge;
pub mod model;
pub mod role_edit;
pub mod uniqueness;

pub use diff::{Field, FieldChange, describe_changes};
pub use merge::{MergeError, merge};
pub use model::descriptor::{EditDescriptor, EditDescriptorBuilder, Patch, TagsPatch};
pub use model::record::{ContactRecord, Tags};
pub use model::roles::{ModuleRoleMap, ModuleRolePair};
pub use model::types::{
    Address, Description, Email, ErrorKind, ModuleCode, Name, Phone, RoleType, Tag,
    ValidationError,
};
pub use role_edit::{
    InvalidRoleEdit, RoleEditFailure, RoleEditOperation, RoleTarget, describe_role_changes,
};
pub use uniqueness::{
    CollisionLookup, Identity, SameName, SamePhoneOrEmail, UniquenessViolation, check_uniqueness,
};
