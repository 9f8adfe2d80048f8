use crate::entity::Entity;
use crate::error::HierarchyError;

///
/// TreeNode
///
/// A node in an `EntityTree` is either a leaf entity or a branch holding
/// further named children — a tagged sum, never both at once (spec
/// §4.2.4). Children are kept in insertion order, not key order: spec
/// §5 requires tree iteration in "document order... children in
/// insertion order", so the branch is a `Vec` of pairs rather than a
/// sorted map.
///
#[derive(Clone, Debug)]
pub enum TreeNode {
    Leaf(Entity),
    Branch(Vec<(String, TreeNode)>),
}

impl TreeNode {
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    #[must_use]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }

    fn node_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(children) => 1 + children.iter().map(|(_, node)| node.node_count()).sum::<usize>(),
        }
    }
}

///
/// EntityTree
///
/// A rooted, path-addressed tree of entities. The root is
/// always a branch; paths are sequences of string segments walked from
/// the root, with `/` as the segment separator and `/` alone addressing
/// the root itself.
///
#[derive(Clone, Debug, Default)]
pub struct EntityTree {
    name: String,
    root: Vec<(String, TreeNode)>,
}

impl EntityTree {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        Self::count_leaves(&self.root)
    }

    /// The root's direct children, in insertion order. `get`/`insert`/
    /// `remove_subtree` are path-addressed and so cannot express "the
    /// root itself"; callers that need to walk the whole tree (e.g. the
    /// serializer) start here.
    #[must_use]
    pub fn root_children(&self) -> &[(String, TreeNode)] {
        &self.root
    }

    fn count_leaves(children: &[(String, TreeNode)]) -> usize {
        children
            .iter()
            .map(|(_, node)| match node {
                TreeNode::Leaf(_) => 1,
                TreeNode::Branch(inner) => Self::count_leaves(inner),
            })
            .sum()
    }

    fn find<'a>(children: &'a [(String, TreeNode)], key: &str) -> Option<&'a TreeNode> {
        children.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    #[must_use]
    pub fn get(&self, path: &[&str]) -> Option<&TreeNode> {
        let (last, parents) = path.split_last()?;
        let mut children = self.root.as_slice();
        for segment in parents {
            children = match Self::find(children, segment)? {
                TreeNode::Branch(inner) => inner,
                TreeNode::Leaf(_) => return None,
            };
        }
        Self::find(children, last)
    }

    /// Insert a leaf entity at `path`, creating intermediate branches as
    /// needed. Overwrites an existing leaf at that path; refuses to
    /// overwrite an existing non-empty branch.
    pub fn insert(&mut self, path: &[&str], entity: Entity) -> Result<(), HierarchyError> {
        let (last, parents) = path.split_last().ok_or(HierarchyError::NotFound)?;
        let mut children = &mut self.root;
        for segment in parents {
            children = Self::branch_entry(children, segment)?;
        }
        match children.iter().find(|(k, _)| k == last) {
            Some((_, TreeNode::Branch(inner))) if !inner.is_empty() => return Err(HierarchyError::TypeMismatch),
            _ => {}
        }
        if let Some(slot) = children.iter_mut().find(|(k, _)| k == last) {
            slot.1 = TreeNode::Leaf(entity);
        } else {
            children.push(((*last).to_string(), TreeNode::Leaf(entity)));
        }
        Ok(())
    }

    /// Attach a batch of leaf children directly under the branch at
    /// `path` (`path` empty means the root), creating `path` itself as an
    /// empty branch if it doesn't exist yet. Fails if a segment along
    /// `path` addresses an existing leaf — it cannot resolve to a branch
    /// — or if any of `new_children`'s names already exist under it;
    /// unlike [`Self::insert`], this operation never silently overwrites
    /// an existing child.
    pub fn add_children(&mut self, path: &[&str], new_children: Vec<(String, Entity)>) -> Result<(), HierarchyError> {
        let mut children = &mut self.root;
        for segment in path {
            children = Self::branch_entry(children, segment)?;
        }
        for (key, _) in &new_children {
            if children.iter().any(|(k, _)| k == key) {
                return Err(HierarchyError::DuplicateKey);
            }
        }
        for (key, entity) in new_children {
            children.push((key, TreeNode::Leaf(entity)));
        }
        Ok(())
    }

    /// Walk to (creating if absent) the branch named `segment` under
    /// `children`, failing if that name already addresses a leaf.
    fn branch_entry<'a>(
        children: &'a mut Vec<(String, TreeNode)>,
        segment: &str,
    ) -> Result<&'a mut Vec<(String, TreeNode)>, HierarchyError> {
        if !children.iter().any(|(k, _)| k == segment) {
            children.push((segment.to_string(), TreeNode::Branch(Vec::new())));
        }
        let node = children
            .iter_mut()
            .find(|(k, _)| k == segment)
            .map(|(_, node)| node)
            .expect("just inserted or already present");
        match node {
            TreeNode::Branch(inner) => Ok(inner),
            TreeNode::Leaf(_) => Err(HierarchyError::TypeMismatch),
        }
    }

    /// Remove the node (leaf or whole subtree) at `path`, cascading to
    /// every descendant. Returns the total number of nodes removed,
    /// counting `path` itself. A `path` that does not resolve is a
    /// no-op returning `0`, not an error.
    pub fn remove_subtree(&mut self, path: &[&str]) -> Result<usize, HierarchyError> {
        let Some((last, parents)) = path.split_last() else {
            return Ok(0);
        };
        let mut children = &mut self.root;
        for segment in parents {
            let Some(node) = children.iter_mut().find(|(k, _)| k == segment).map(|(_, node)| node) else {
                return Ok(0);
            };
            children = match node {
                TreeNode::Branch(inner) => inner,
                TreeNode::Leaf(_) => return Ok(0),
            };
        }
        let Some(index) = children.iter().position(|(k, _)| k == last) else {
            return Ok(0);
        };
        let (_, removed) = children.remove(index);
        Ok(removed.node_count())
    }
}
