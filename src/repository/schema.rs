//! Database schema creation.

use std::path::Path;

use super::{connect, Result};

/// Create all tables and indexes if they do not exist yet.
pub fn init_schema(db_path: &Path) -> Result<()> {
    let conn = connect(db_path)?;
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS buildings (
            id INTEGER PRIMARY KEY,
            address TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_building_coordinates
            ON buildings(latitude, longitude);

        CREATE TABLE IF NOT EXISTS activities (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            parent_id INTEGER
                REFERENCES activities(id) ON DELETE CASCADE,
            level INTEGER NOT NULL
                CHECK (level >= 1 AND level <= 3)
        );
        CREATE INDEX IF NOT EXISTS idx_activity_parent
            ON activities(parent_id);

        CREATE TABLE IF NOT EXISTS organizations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            phone_numbers TEXT NOT NULL,
            building_id INTEGER NOT NULL
                REFERENCES buildings(id) ON DELETE RESTRICT
        );
        CREATE INDEX IF NOT EXISTS idx_organization_building
            ON organizations(building_id);
        CREATE INDEX IF NOT EXISTS idx_organization_name
            ON organizations(name);

        CREATE TABLE IF NOT EXISTS organization_activities (
            organization_id INTEGER NOT NULL
                REFERENCES organizations(id) ON DELETE CASCADE,
            activity_id INTEGER NOT NULL
                REFERENCES activities(id) ON DELETE CASCADE,
            PRIMARY KEY (organization_id, activity_id)
        );
        "#,
    )?;
    Ok(())
}

/// Remove all rows, preserving the schema. Used by forced reseeding.
pub fn clear_data(db_path: &Path) -> Result<()> {
    let conn = connect(db_path)?;
    conn.execute_batch(
        "DELETE FROM organization_activities;
         DELETE FROM organizations;
         DELETE FROM activities;
         DELETE FROM buildings;",
    )?;
    Ok(())
}
