//! Building service: coordinate validation and geo lookups.

use std::path::Path;

use super::{validate_box, validate_name, validate_point, validate_radius, Error, Result};
use crate::models::{Building, MAX_ADDRESS_LEN};
use crate::repository::BuildingRepository;

/// Business logic for buildings.
#[derive(Clone)]
pub struct BuildingService {
    repo: BuildingRepository,
}

impl BuildingService {
    pub fn new(db_path: &Path) -> Self {
        Self {
            repo: BuildingRepository::new(db_path),
        }
    }

    /// Create a building after validating the address and coordinates.
    pub fn create(&self, address: &str, latitude: f64, longitude: f64) -> Result<Building> {
        validate_name(address, MAX_ADDRESS_LEN, "building address")?;
        validate_point(latitude, longitude)?;
        Ok(self.repo.create(address, latitude, longitude)?)
    }

    /// Get a building, escalating absence to a typed failure.
    pub fn get(&self, id: i64) -> Result<Building> {
        self.repo.get(id)?.ok_or(Error::BuildingNotFound(id))
    }

    /// All buildings, ordered by ID.
    pub fn list(&self) -> Result<Vec<Building>> {
        Ok(self.repo.get_all()?)
    }

    /// Buildings within a radius of a point.
    pub fn in_radius(&self, lat: f64, lon: f64, radius_km: f64) -> Result<Vec<Building>> {
        validate_point(lat, lon)?;
        validate_radius(radius_km)?;
        Ok(self.repo.in_radius(lat, lon, radius_km)?)
    }

    /// Buildings within an inclusive rectangle.
    pub fn in_bounding_box(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Vec<Building>> {
        validate_box(min_lat, max_lat, min_lon, max_lon)?;
        Ok(self.repo.in_bounding_box(min_lat, max_lat, min_lon, max_lon)?)
    }
}
