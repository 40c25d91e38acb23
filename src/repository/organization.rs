//! Organization repository: CRUD, reference queries, name search.
//!
//! Phone numbers are stored as a JSON array in a TEXT column; encoding and
//! decoding happen here so the domain type only carries the list form.
//! Activity links live in the organization_activities junction table and are
//! bulk-loaded per query to avoid N+1 lookups.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, params_from_iter, Connection, Row};

use super::Result;
use crate::models::{Organization, OrganizationPatch};

/// SQLite-backed organization repository.
#[derive(Clone)]
pub struct OrganizationRepository {
    db_path: PathBuf,
}

/// Row data before phones are decoded and activity links attached.
struct OrgRow {
    id: i64,
    name: String,
    phone_numbers_json: String,
    building_id: i64,
}

fn row_to_org_row(row: &Row<'_>) -> rusqlite::Result<OrgRow> {
    Ok(OrgRow {
        id: row.get("id")?,
        name: row.get("name")?,
        phone_numbers_json: row.get("phone_numbers")?,
        building_id: row.get("building_id")?,
    })
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Load activity ID sets for the given organizations in one query.
fn load_activity_links(conn: &Connection, org_ids: &[i64]) -> Result<HashMap<i64, Vec<i64>>> {
    let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
    if org_ids.is_empty() {
        return Ok(map);
    }
    let sql = format!(
        "SELECT organization_id, activity_id FROM organization_activities
         WHERE organization_id IN ({})
         ORDER BY activity_id",
        placeholders(org_ids.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let links = stmt
        .query_map(params_from_iter(org_ids.iter()), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    for (org_id, activity_id) in links {
        map.entry(org_id).or_default().push(activity_id);
    }
    Ok(map)
}

fn assemble(conn: &Connection, rows: Vec<OrgRow>) -> Result<Vec<Organization>> {
    let org_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut links = load_activity_links(conn, &org_ids)?;
    rows.into_iter()
        .map(|r| {
            Ok(Organization {
                id: r.id,
                name: r.name,
                phone_numbers: serde_json::from_str(&r.phone_numbers_json)?,
                building_id: r.building_id,
                activity_ids: links.remove(&r.id).unwrap_or_default(),
            })
        })
        .collect()
}

/// Replace the activity link set for an organization inside a transaction.
/// INSERT OR IGNORE collapses duplicate IDs in the request.
fn write_activity_links(
    tx: &rusqlite::Transaction<'_>,
    org_id: i64,
    activity_ids: &[i64],
) -> Result<()> {
    tx.execute(
        "DELETE FROM organization_activities WHERE organization_id = ?",
        params![org_id],
    )?;
    let mut stmt = tx.prepare(
        "INSERT OR IGNORE INTO organization_activities (organization_id, activity_id)
         VALUES (?, ?)",
    )?;
    for activity_id in activity_ids {
        stmt.execute(params![org_id, activity_id])?;
    }
    Ok(())
}

impl OrganizationRepository {
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
        }
    }

    fn connect(&self) -> Result<rusqlite::Connection> {
        super::connect(&self.db_path)
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Organization>> {
        let conn = self.connect()?;
        let rows = {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt
                .query_map(params, row_to_org_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };
        assemble(&conn, rows)
    }

    /// Get an organization by ID.
    pub fn get(&self, id: i64) -> Result<Option<Organization>> {
        let orgs = self.query("SELECT * FROM organizations WHERE id = ?", params![id])?;
        Ok(orgs.into_iter().next())
    }

    /// All organizations, ordered by ID.
    pub fn get_all(&self) -> Result<Vec<Organization>> {
        self.query("SELECT * FROM organizations ORDER BY id", [])
    }

    /// Organizations housed in a specific building.
    pub fn by_building(&self, building_id: i64) -> Result<Vec<Organization>> {
        self.query(
            "SELECT * FROM organizations WHERE building_id = ? ORDER BY id",
            params![building_id],
        )
    }

    /// Organizations housed in any of the given buildings.
    /// An empty ID set short-circuits to an empty result.
    pub fn by_building_ids(&self, building_ids: &[i64]) -> Result<Vec<Organization>> {
        if building_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT * FROM organizations WHERE building_id IN ({}) ORDER BY id",
            placeholders(building_ids.len())
        );
        self.query(&sql, params_from_iter(building_ids.iter()))
    }

    /// Organizations directly tagged with an activity.
    pub fn by_activity(&self, activity_id: i64) -> Result<Vec<Organization>> {
        self.query(
            "SELECT o.* FROM organizations o
             JOIN organization_activities oa ON oa.organization_id = o.id
             WHERE oa.activity_id = ?
             ORDER BY o.id",
            params![activity_id],
        )
    }

    /// Organizations whose activity set intersects the given IDs.
    /// Used for subtree-expanded activity queries.
    pub fn by_activity_ids(&self, activity_ids: &[i64]) -> Result<Vec<Organization>> {
        if activity_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT DISTINCT o.* FROM organizations o
             JOIN organization_activities oa ON oa.organization_id = o.id
             WHERE oa.activity_id IN ({})
             ORDER BY o.id",
            placeholders(activity_ids.len())
        );
        self.query(&sql, params_from_iter(activity_ids.iter()))
    }

    /// Case-insensitive substring match on the name.
    ///
    /// SQLite's LIKE only folds case for ASCII, so the match runs in Rust
    /// with Unicode lowercasing; the directory's names are largely Cyrillic.
    pub fn search_by_name(&self, query: &str) -> Result<Vec<Organization>> {
        let needle = query.to_lowercase();
        let orgs = self.get_all()?;
        Ok(orgs
            .into_iter()
            .filter(|o| o.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Insert an organization with its activity links in one transaction.
    /// The caller has already validated every referenced ID.
    pub fn create(
        &self,
        name: &str,
        phone_numbers: &[String],
        building_id: i64,
        activity_ids: &[i64],
    ) -> Result<Organization> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO organizations (name, phone_numbers, building_id) VALUES (?, ?, ?)",
            params![name, serde_json::to_string(phone_numbers)?, building_id],
        )?;
        let id = tx.last_insert_rowid();
        write_activity_links(&tx, id, activity_ids)?;
        tx.commit()?;

        // Re-read so the returned row reflects exactly what was stored.
        let org = self.get(id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        Ok(org)
    }

    /// Apply a partial update in one transaction.
    ///
    /// Only supplied fields change; a supplied activity set fully replaces
    /// the existing links. Returns the updated row, or `None` if the
    /// organization does not exist.
    pub fn update(&self, id: i64, patch: &OrganizationPatch) -> Result<Option<Organization>> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let exists: bool = tx
            .query_row(
                "SELECT COUNT(*) FROM organizations WHERE id = ?",
                params![id],
                |row| row.get::<_, i64>(0),
            )
            .map(|n| n > 0)?;
        if !exists {
            return Ok(None);
        }

        if let Some(name) = &patch.name {
            tx.execute(
                "UPDATE organizations SET name = ? WHERE id = ?",
                params![name, id],
            )?;
        }
        if let Some(phones) = &patch.phone_numbers {
            tx.execute(
                "UPDATE organizations SET phone_numbers = ? WHERE id = ?",
                params![serde_json::to_string(phones)?, id],
            )?;
        }
        if let Some(building_id) = patch.building_id {
            tx.execute(
                "UPDATE organizations SET building_id = ? WHERE id = ?",
                params![building_id, id],
            )?;
        }
        if let Some(activity_ids) = &patch.activity_ids {
            write_activity_links(&tx, id, activity_ids)?;
        }
        tx.commit()?;

        self.get(id)
    }

    /// Delete an organization; activity links cascade, buildings and
    /// activities are untouched. Returns whether a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM organizations WHERE id = ?", params![id])?;
        Ok(removed > 0)
    }
}
