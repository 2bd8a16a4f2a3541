//! Contact data model: field values, role maps, records, and edit descriptors.

pub mod descriptor;
pub mod record;
pub mod roles;
pub mod types;
