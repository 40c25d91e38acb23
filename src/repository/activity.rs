//! Activity repository: the flat arena behind the activity tree.
//!
//! Nodes reference their parent by ID; subtree traversal walks
//! parent->children edges on demand. Depth is capped at three levels by the
//! service layer (and by a CHECK constraint), so traversals stay shallow.

use std::path::{Path, PathBuf};

use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::Result;
use crate::models::Activity;

/// SQLite-backed activity repository.
#[derive(Clone)]
pub struct ActivityRepository {
    db_path: PathBuf,
}

fn row_to_activity(row: &Row<'_>) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get("id")?,
        name: row.get("name")?,
        parent_id: row.get("parent_id")?,
        level: row.get("level")?,
    })
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

impl ActivityRepository {
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
        }
    }

    fn connect(&self) -> Result<rusqlite::Connection> {
        super::connect(&self.db_path)
    }

    /// Get an activity by ID.
    pub fn get(&self, id: i64) -> Result<Option<Activity>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT * FROM activities WHERE id = ?")?;
        Ok(stmt.query_row(params![id], row_to_activity).optional()?)
    }

    /// All activities, ordered by ID.
    pub fn get_all(&self) -> Result<Vec<Activity>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT * FROM activities ORDER BY id")?;
        let activities = stmt
            .query_map([], row_to_activity)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activities)
    }

    /// Root activities (no parent), ordered by ID for determinism.
    pub fn roots(&self) -> Result<Vec<Activity>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT * FROM activities WHERE parent_id IS NULL ORDER BY id")?;
        let activities = stmt
            .query_map([], row_to_activity)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activities)
    }

    /// Direct children of a node, ordered by ID.
    pub fn children(&self, parent_id: i64) -> Result<Vec<Activity>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT * FROM activities WHERE parent_id = ? ORDER BY id")?;
        let activities = stmt
            .query_map(params![parent_id], row_to_activity)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activities)
    }

    /// Insert an activity. The level is computed by the caller from the
    /// parent; this layer just persists it.
    pub fn create(&self, name: &str, parent_id: Option<i64>, level: i32) -> Result<Activity> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO activities (name, parent_id, level) VALUES (?, ?, ?)",
            params![name, parent_id, level],
        )?;
        Ok(Activity {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            parent_id,
            level,
        })
    }

    /// IDs of a node and all its descendants, depth-first.
    ///
    /// Returns just `[id]` when the node is a leaf or does not exist.
    /// Termination is guaranteed by construction: children are only ever
    /// created under pre-existing parents, and the level cap bounds depth.
    pub fn subtree_ids(&self, id: i64) -> Result<Vec<i64>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id FROM activities WHERE parent_id = ?")?;

        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            let children = stmt
                .query_map(params![current], |row| row.get::<_, i64>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            stack.extend(children);
        }
        Ok(result)
    }

    /// Activities matching the given IDs; unknown IDs are silently dropped.
    /// Callers compare cardinality against the request to detect bad refs.
    pub fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<Activity>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.connect()?;
        let sql = format!(
            "SELECT * FROM activities WHERE id IN ({}) ORDER BY id",
            placeholders(ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let activities = stmt
            .query_map(params_from_iter(ids.iter()), row_to_activity)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activities)
    }

    /// Delete a node and its whole subtree in one transaction.
    ///
    /// Returns whether the root of the subtree existed. Junction rows in
    /// organization_activities go away via the FK cascade.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let ids = self.subtree_ids(id)?;
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let sql = format!(
            "DELETE FROM activities WHERE id IN ({})",
            placeholders(ids.len())
        );
        let removed = tx.execute(&sql, params_from_iter(ids.iter()))?;
        tx.commit()?;
        Ok(removed > 0)
    }
}
