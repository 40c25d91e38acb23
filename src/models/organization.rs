//! Organization model and mutation inputs.

use serde::{Deserialize, Serialize};

/// Maximum organization name length accepted on create/update.
pub(crate) const MAX_NAME_LEN: usize = 500;

/// An organization: a named tenant of one building, tagged with activities.
///
/// Phone numbers persist as a JSON array in a single TEXT column; the
/// repository encodes and decodes at the storage boundary so the domain type
/// only ever sees the list form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Database row ID.
    pub id: i64,
    /// Organization name.
    pub name: String,
    /// Contact phone numbers, at least one.
    pub phone_numbers: Vec<String>,
    /// The building this organization occupies.
    pub building_id: i64,
    /// Attached activity IDs, sorted ascending, no duplicates.
    pub activity_ids: Vec<i64>,
}

/// Input for creating an organization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub phone_numbers: Vec<String>,
    pub building_id: i64,
    #[serde(default)]
    pub activity_ids: Vec<i64>,
}

/// Partial update for an organization; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationPatch {
    pub name: Option<String>,
    pub phone_numbers: Option<Vec<String>>,
    pub building_id: Option<i64>,
    pub activity_ids: Option<Vec<i64>>,
}
