//! Building repository: CRUD plus geospatial lookups.

use std::path::{Path, PathBuf};

use rusqlite::{params, OptionalExtension, Row};

use super::Result;
use crate::geo;
use crate::models::Building;

/// SQLite-backed building repository.
#[derive(Clone)]
pub struct BuildingRepository {
    db_path: PathBuf,
}

fn row_to_building(row: &Row<'_>) -> rusqlite::Result<Building> {
    Ok(Building {
        id: row.get("id")?,
        address: row.get("address")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    })
}

impl BuildingRepository {
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
        }
    }

    fn connect(&self) -> Result<rusqlite::Connection> {
        super::connect(&self.db_path)
    }

    /// Get a building by ID.
    pub fn get(&self, id: i64) -> Result<Option<Building>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT * FROM buildings WHERE id = ?")?;
        Ok(stmt.query_row(params![id], row_to_building).optional()?)
    }

    /// Get all buildings, ordered by ID.
    pub fn get_all(&self) -> Result<Vec<Building>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT * FROM buildings ORDER BY id")?;
        let buildings = stmt
            .query_map([], row_to_building)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(buildings)
    }

    /// Insert a building and return it with its assigned ID.
    pub fn create(&self, address: &str, latitude: f64, longitude: f64) -> Result<Building> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO buildings (address, latitude, longitude) VALUES (?, ?, ?)",
            params![address, latitude, longitude],
        )?;
        Ok(Building {
            id: conn.last_insert_rowid(),
            address: address.to_string(),
            latitude,
            longitude,
        })
    }

    /// Buildings within `radius_km` of a point.
    ///
    /// Two-phase: a rectangular SQL pre-filter using the 111 km/degree
    /// approximation, then an exact haversine test over the candidates.
    /// The longitude delta degenerates toward infinity near the poles;
    /// that limitation is inherited and left uncorrected.
    pub fn in_radius(&self, lat: f64, lon: f64, radius_km: f64) -> Result<Vec<Building>> {
        let lat_delta = radius_km / geo::KM_PER_DEGREE;
        let lon_delta = radius_km / (geo::KM_PER_DEGREE * lat.to_radians().cos());

        let candidates = self.in_bounding_box(
            lat - lat_delta,
            lat + lat_delta,
            lon - lon_delta,
            lon + lon_delta,
        )?;

        Ok(candidates
            .into_iter()
            .filter(|b| geo::distance_km(lat, lon, b.latitude, b.longitude) <= radius_km)
            .collect())
    }

    /// Buildings within an inclusive latitude/longitude rectangle.
    pub fn in_bounding_box(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Vec<Building>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT * FROM buildings
             WHERE latitude >= ? AND latitude <= ?
               AND longitude >= ? AND longitude <= ?",
        )?;
        let buildings = stmt
            .query_map(params![min_lat, max_lat, min_lon, max_lon], row_to_building)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(buildings)
    }
}
