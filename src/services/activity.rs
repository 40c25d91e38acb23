//! Activity service: tree construction under the depth cap.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::{validate_name, Error, Result};
use crate::models::{Activity, ActivityNode, MAX_ACTIVITY_NAME_LEN};
use crate::repository::ActivityRepository;

/// Business logic for the activity hierarchy.
#[derive(Clone)]
pub struct ActivityService {
    repo: ActivityRepository,
}

impl ActivityService {
    pub fn new(db_path: &Path) -> Self {
        Self {
            repo: ActivityRepository::new(db_path),
        }
    }

    /// Create an activity, computing its level from the parent.
    ///
    /// The parent must exist and sit above the depth cap; both checks run
    /// before anything is written.
    pub fn create(&self, name: &str, parent_id: Option<i64>) -> Result<Activity> {
        validate_name(name, MAX_ACTIVITY_NAME_LEN, "activity name")?;

        let level = match parent_id {
            None => 1,
            Some(pid) => {
                let parent = self.repo.get(pid)?.ok_or(Error::ParentNotFound(pid))?;
                if !parent.accepts_children() {
                    return Err(Error::MaxDepthExceeded);
                }
                parent.level + 1
            }
        };

        let activity = self.repo.create(name, parent_id, level)?;
        debug!(id = activity.id, level, "created activity");
        Ok(activity)
    }

    /// Get an activity, escalating absence to a typed failure.
    pub fn get(&self, id: i64) -> Result<Activity> {
        self.repo.get(id)?.ok_or(Error::ActivityNotFound(id))
    }

    /// Flat list of all activities.
    pub fn list(&self) -> Result<Vec<Activity>> {
        Ok(self.repo.get_all()?)
    }

    /// Root activities, ordered by ID.
    pub fn roots(&self) -> Result<Vec<Activity>> {
        Ok(self.repo.roots()?)
    }

    /// The node's ID plus all descendant IDs.
    pub fn subtree_ids(&self, id: i64) -> Result<Vec<i64>> {
        Ok(self.repo.subtree_ids(id)?)
    }

    /// The full hierarchy as nested root->children nodes, assembled from
    /// the flat arena in one pass.
    pub fn tree(&self) -> Result<Vec<ActivityNode>> {
        let all = self.repo.get_all()?;

        let mut children_of: HashMap<Option<i64>, Vec<Activity>> = HashMap::new();
        for activity in all {
            children_of.entry(activity.parent_id).or_default().push(activity);
        }

        fn build(
            parent: Option<i64>,
            children_of: &mut HashMap<Option<i64>, Vec<Activity>>,
        ) -> Vec<ActivityNode> {
            children_of
                .remove(&parent)
                .unwrap_or_default()
                .into_iter()
                .map(|activity| {
                    let children = build(Some(activity.id), children_of);
                    ActivityNode { activity, children }
                })
                .collect()
        }

        Ok(build(None, &mut children_of))
    }

    /// Delete an activity and its whole subtree.
    pub fn delete(&self, id: i64) -> Result<bool> {
        debug!(id, "deleting activity subtree");
        Ok(self.repo.delete(id)?)
    }
}
