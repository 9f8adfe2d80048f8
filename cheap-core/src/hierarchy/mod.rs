mod aspect_map;
mod entity_directory;
mod entity_list;
mod entity_set;
mod entity_tree;

pub use aspect_map::AspectMap;
pub use entity_directory::EntityDirectory;
pub use entity_list::EntityList;
pub use entity_set::EntitySet;
pub use entity_tree::{EntityTree, TreeNode};

use crate::model::HierarchyKind;

///
/// Hierarchy
///
/// The one polymorphic interface unifying the five collection variants,
/// so client code addresses all five through one surface. A tagged
/// union rather than a trait object —
/// the variants differ enough in their operations (path addressing vs.
/// index addressing vs. key lookup) that a shared vtable would either
/// dilute each variant's real API or force awkward downcasting; match
/// on `Hierarchy` to recover the concrete type's full surface, and use
/// the methods below for the handful of operations every variant
/// supports uniformly.
///
#[derive(Clone, Debug)]
pub enum Hierarchy {
    EntityList(EntityList),
    EntitySet(EntitySet),
    EntityDirectory(EntityDirectory),
    EntityTree(EntityTree),
    AspectMap(AspectMap),
}

impl Hierarchy {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::EntityList(h) => h.name(),
            Self::EntitySet(h) => h.name(),
            Self::EntityDirectory(h) => h.name(),
            Self::EntityTree(h) => h.name(),
            Self::AspectMap(h) => h.name(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> HierarchyKind {
        match self {
            Self::EntityList(_) => HierarchyKind::EntityList,
            Self::EntitySet(_) => HierarchyKind::EntitySet,
            Self::EntityDirectory(_) => HierarchyKind::EntityDirectory,
            Self::EntityTree(_) => HierarchyKind::EntityTree,
            Self::AspectMap(_) => HierarchyKind::AspectMap,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::EntityList(h) => h.len(),
            Self::EntitySet(h) => h.len(),
            Self::EntityDirectory(h) => h.len(),
            Self::EntityTree(h) => h.leaf_count(),
            Self::AspectMap(h) => h.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_reports_the_right_kind() {
        let h = Hierarchy::EntitySet(EntitySet::new("members"));
        assert_eq!(h.kind(), HierarchyKind::EntitySet);
        assert_eq!(h.name(), "members");
        assert!(h.is_empty());
    }
}
