use std::collections::HashSet;

use crate::entity::Entity;

///
/// EntitySet
///
/// Unique membership, insertion order preserved. A second
/// `insert` of an already-present entity is a no-op, not an error — the
/// caller asked for membership, and membership already held.
///
#[derive(Clone, Debug, Default)]
pub struct EntitySet {
    name: String,
    order: Vec<Entity>,
    members: HashSet<Entity>,
}

impl EntitySet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: Vec::new(),
            members: HashSet::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    /// Returns `true` if the entity was newly inserted, `false` if it
    /// was already a member.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.members.insert(entity) {
            self.order.push(entity);
            true
        } else {
            false
        }
    }

    /// Returns `true` if the entity was present and removed.
    pub fn remove(&mut self, entity: Entity) -> bool {
        if self.members.remove(&entity) {
            self.order.retain(|e| *e != entity);
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }
}
