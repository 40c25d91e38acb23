//! Organization service: cross-entity validation and query assembly.
//!
//! Create and update validate every referenced building and activity ID
//! before any write; a request with a single bad reference is rejected
//! whole rather than partially applied.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use super::{validate_box, validate_name, validate_point, validate_radius, Error, Result};
use crate::models::{
    NewOrganization, Organization, OrganizationPatch, MAX_ORGANIZATION_NAME_LEN,
};
use crate::repository::{ActivityRepository, BuildingRepository, OrganizationRepository};

/// Minimum effective length of a name-search query, in characters.
pub const MIN_SEARCH_LEN: usize = 2;

/// Business logic for organizations.
#[derive(Clone)]
pub struct OrganizationService {
    orgs: OrganizationRepository,
    buildings: BuildingRepository,
    activities: ActivityRepository,
}

impl OrganizationService {
    pub fn new(db_path: &Path) -> Self {
        Self {
            orgs: OrganizationRepository::new(db_path),
            buildings: BuildingRepository::new(db_path),
            activities: ActivityRepository::new(db_path),
        }
    }

    /// Get an organization, escalating absence to a typed failure.
    pub fn get(&self, id: i64) -> Result<Organization> {
        self.orgs.get(id)?.ok_or(Error::OrganizationNotFound(id))
    }

    /// All organizations, ordered by ID.
    pub fn list(&self) -> Result<Vec<Organization>> {
        Ok(self.orgs.get_all()?)
    }

    /// Organizations housed in a building. The building must exist.
    pub fn by_building(&self, building_id: i64) -> Result<Vec<Organization>> {
        if self.buildings.get(building_id)?.is_none() {
            return Err(Error::BuildingNotFound(building_id));
        }
        Ok(self.orgs.by_building(building_id)?)
    }

    /// Organizations tagged with an activity.
    ///
    /// With `include_children`, the activity's whole subtree counts; without,
    /// only direct tags. The activity must exist either way.
    pub fn by_activity(&self, activity_id: i64, include_children: bool) -> Result<Vec<Organization>> {
        if self.activities.get(activity_id)?.is_none() {
            return Err(Error::ActivityNotFound(activity_id));
        }
        if include_children {
            let ids = self.activities.subtree_ids(activity_id)?;
            Ok(self.orgs.by_activity_ids(&ids)?)
        } else {
            Ok(self.orgs.by_activity(activity_id)?)
        }
    }

    /// Organizations whose building lies within a radius of a point.
    pub fn in_radius(&self, lat: f64, lon: f64, radius_km: f64) -> Result<Vec<Organization>> {
        validate_point(lat, lon)?;
        validate_radius(radius_km)?;
        let buildings = self.buildings.in_radius(lat, lon, radius_km)?;
        let ids: Vec<i64> = buildings.iter().map(|b| b.id).collect();
        Ok(self.orgs.by_building_ids(&ids)?)
    }

    /// Organizations whose building lies within an inclusive rectangle.
    pub fn in_bounding_box(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Vec<Organization>> {
        validate_box(min_lat, max_lat, min_lon, max_lon)?;
        let buildings = self
            .buildings
            .in_bounding_box(min_lat, max_lat, min_lon, max_lon)?;
        let ids: Vec<i64> = buildings.iter().map(|b| b.id).collect();
        Ok(self.orgs.by_building_ids(&ids)?)
    }

    /// Case-insensitive substring search on the organization name.
    pub fn search_by_name(&self, query: &str) -> Result<Vec<Organization>> {
        if query.chars().count() < MIN_SEARCH_LEN {
            return Err(Error::QueryTooShort);
        }
        Ok(self.orgs.search_by_name(query)?)
    }

    /// Create an organization after validating every reference.
    pub fn create(&self, input: &NewOrganization) -> Result<Organization> {
        validate_name(&input.name, MAX_ORGANIZATION_NAME_LEN, "organization name")?;
        if input.phone_numbers.is_empty() {
            return Err(Error::InvalidInput(
                "at least one phone number is required".into(),
            ));
        }
        if self.buildings.get(input.building_id)?.is_none() {
            return Err(Error::BuildingNotFound(input.building_id));
        }
        let activity_ids = self.resolve_activity_ids(&input.activity_ids)?;

        let org = self.orgs.create(
            &input.name,
            &input.phone_numbers,
            input.building_id,
            &activity_ids,
        )?;
        debug!(id = org.id, "created organization");
        Ok(org)
    }

    /// Apply a partial update after re-validating any replaced references.
    /// All-or-nothing: a failed check leaves the organization untouched.
    pub fn update(&self, id: i64, patch: &OrganizationPatch) -> Result<Organization> {
        if self.orgs.get(id)?.is_none() {
            return Err(Error::OrganizationNotFound(id));
        }
        if let Some(name) = &patch.name {
            validate_name(name, MAX_ORGANIZATION_NAME_LEN, "organization name")?;
        }
        if let Some(phones) = &patch.phone_numbers {
            if phones.is_empty() {
                return Err(Error::InvalidInput(
                    "at least one phone number is required".into(),
                ));
            }
        }
        if let Some(building_id) = patch.building_id {
            if self.buildings.get(building_id)?.is_none() {
                return Err(Error::BuildingNotFound(building_id));
            }
        }
        let patch = match &patch.activity_ids {
            Some(ids) => {
                let resolved = self.resolve_activity_ids(ids)?;
                OrganizationPatch {
                    activity_ids: Some(resolved),
                    ..patch.clone()
                }
            }
            None => patch.clone(),
        };

        self.orgs
            .update(id, &patch)?
            .ok_or(Error::OrganizationNotFound(id))
    }

    /// Delete an organization. Buildings and activities are independent
    /// lifecycles and are never touched.
    pub fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.orgs.delete(id)?)
    }

    /// Resolve requested activity IDs against storage, rejecting the whole
    /// set if any ID is unknown. Duplicates in the request collapse.
    fn resolve_activity_ids(&self, requested: &[i64]) -> Result<Vec<i64>> {
        if requested.is_empty() {
            return Ok(Vec::new());
        }
        let unique: HashSet<i64> = requested.iter().copied().collect();
        let unique: Vec<i64> = unique.into_iter().collect();
        let found = self.activities.get_by_ids(&unique)?;
        if found.len() != unique.len() {
            return Err(Error::InvalidActivityIds);
        }
        Ok(found.into_iter().map(|a| a.id).collect())
    }
}
