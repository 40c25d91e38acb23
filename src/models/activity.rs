//! Activity taxonomy model.
//!
//! Activities form a forest of at most three levels. Nodes reference their
//! parent by ID only; the tree shape is reconstructed on demand from the
//! flat arena, so there are no ownership cycles to manage.

use serde::{Deserialize, Serialize};

/// Maximum nesting depth of the activity tree.
pub const MAX_ACTIVITY_LEVEL: i32 = 3;

/// Maximum activity name length accepted on create.
pub(crate) const MAX_NAME_LEN: usize = 255;

/// A node in the business-activity hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Database row ID.
    pub id: i64,
    /// Category name.
    pub name: String,
    /// Parent activity ID, `None` for roots.
    pub parent_id: Option<i64>,
    /// Depth in the tree: 1 for roots, up to [`MAX_ACTIVITY_LEVEL`].
    pub level: i32,
}

impl Activity {
    /// Whether this node can accept children without breaching the depth cap.
    pub fn accepts_children(&self) -> bool {
        self.level < MAX_ACTIVITY_LEVEL
    }
}

/// An activity with its children nested, for tree-shaped views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityNode {
    #[serde(flatten)]
    pub activity: Activity,
    pub children: Vec<ActivityNode>,
}
