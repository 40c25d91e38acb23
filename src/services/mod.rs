//! Domain services: validation and cross-entity assembly.
//!
//! Services own every precondition check. Repositories answer "what is
//! there"; services decide whether an absence is a typed failure, and no
//! mutation is attempted until all referenced IDs have been validated.

mod activity;
mod building;
mod organization;

pub use activity::ActivityService;
pub use building::BuildingService;
pub use organization::{OrganizationService, MIN_SEARCH_LEN};

use thiserror::Error;

use crate::repository::RepoError;

/// Typed domain failure reported to the boundary layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("building with id {0} not found")]
    BuildingNotFound(i64),

    #[error("activity with id {0} not found")]
    ActivityNotFound(i64),

    #[error("organization with id {0} not found")]
    OrganizationNotFound(i64),

    #[error("parent activity with id {0} not found")]
    ParentNotFound(i64),

    #[error("maximum activity nesting level (3) exceeded")]
    MaxDepthExceeded,

    #[error("some activity IDs are invalid")]
    InvalidActivityIds,

    #[error("search query must be at least 2 characters long")]
    QueryTooShort,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

/// Service result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Largest radius accepted by geo queries, in kilometers.
pub const MAX_RADIUS_KM: f64 = 1000.0;

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidInput(msg.into())
}

pub(crate) fn validate_point(lat: f64, lon: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid(format!("latitude {lat} out of range [-90, 90]")));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(invalid(format!("longitude {lon} out of range [-180, 180]")));
    }
    Ok(())
}

pub(crate) fn validate_radius(radius_km: f64) -> Result<()> {
    if !(radius_km > 0.0 && radius_km <= MAX_RADIUS_KM) {
        return Err(invalid(format!(
            "radius {radius_km} km out of range (0, {MAX_RADIUS_KM}]"
        )));
    }
    Ok(())
}

pub(crate) fn validate_box(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<()> {
    validate_point(min_lat, min_lon)?;
    validate_point(max_lat, max_lon)?;
    if max_lat < min_lat {
        return Err(invalid("max_lat must be >= min_lat"));
    }
    if max_lon < min_lon {
        return Err(invalid("max_lon must be >= min_lon"));
    }
    Ok(())
}

pub(crate) fn validate_name(name: &str, max_len: usize, what: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(format!("{what} must not be empty")));
    }
    if name.chars().count() > max_len {
        return Err(invalid(format!("{what} must be at most {max_len} characters")));
    }
    Ok(())
}
