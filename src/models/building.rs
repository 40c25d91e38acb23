//! Building model: an address with geographic coordinates.

use serde::{Deserialize, Serialize};

/// Maximum address length accepted on create.
pub(crate) const MAX_ADDRESS_LEN: usize = 500;

/// A building housing zero or more organizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Database row ID.
    pub id: i64,
    /// Street address.
    pub address: String,
    /// Latitude in decimal degrees, -90 to 90.
    pub latitude: f64,
    /// Longitude in decimal degrees, -180 to 180.
    pub longitude: f64,
}
