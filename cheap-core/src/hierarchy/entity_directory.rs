use crate::entity::Entity;

///
/// EntityDirectory
///
/// String key to entity: each key maps to exactly one entity, but an
/// entity may be filed under multiple keys. `put` overwrites whatever
/// entity previously held that key. Backed by a `Vec` of pairs, not a
/// sorted map — iteration must preserve insertion order, and a key's
/// position doesn't move when `put` overwrites its value.
///
#[derive(Clone, Debug, Default)]
pub struct EntityDirectory {
    name: String,
    entries: Vec<(String, Entity)>,
}

impl EntityDirectory {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), *e))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Entity> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| *e)
    }

    /// File `entity` under `key`, overwriting whatever entity was there.
    /// A fresh key is appended at the end of iteration order; an
    /// existing key keeps its position.
    pub fn put(&mut self, key: impl Into<String>, entity: Entity) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = entity;
        } else {
            self.entries.push((key, entity));
        }
    }

    /// Remove the entry for `key`, if any, returning the entity it held.
    pub fn remove(&mut self, key: &str) -> Option<Entity> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Remove every key currently mapped to `entity`. Returns the count
    /// of keys removed.
    pub fn remove_by_entity(&mut self, entity: Entity) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, e)| *e != entity);
        before - self.entries.len()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_overwrites_the_existing_entity_for_a_key() {
        let e1 = Entity::new_v4();
        let e2 = Entity::new_v4();
        let mut dir = EntityDirectory::new("by-slug");
        dir.put("alice", e1);
        dir.put("alice", e2);
        assert_eq!(dir.get("alice"), Some(e2));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn entity_may_be_filed_under_multiple_keys() {
        let e = Entity::new_v4();
        let mut dir = EntityDirectory::new("by-tag");
        dir.put("red", e);
        dir.put("round", e);
        assert_eq!(dir.get("red"), Some(e));
        assert_eq!(dir.get("round"), Some(e));
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn remove_drops_the_key() {
        let e = Entity::new_v4();
        let mut dir = EntityDirectory::new("by-tag");
        dir.put("red", e);
        assert_eq!(dir.remove("red"), Some(e));
        assert!(!dir.contains_key("red"));
    }

    #[test]
    fn remove_by_entity_drops_every_key_for_it_and_counts_them() {
        let a = Entity::new_v4();
        let b = Entity::new_v4();
        let mut dir = EntityDirectory::new("by-tag");
        dir.put("red", a);
        dir.put("round", a);
        dir.put("blue", b);
        assert_eq!(dir.remove_by_entity(a), 2);
        assert!(!dir.is_empty());
        assert_eq!(dir.get("blue"), Some(b));
    }

    #[test]
    fn iteration_is_insertion_order_not_key_order() {
        let e = Entity::new_v4();
        let mut dir = EntityDirectory::new("by-tag");
        dir.put("zebra", e);
        dir.put("apple", e);
        assert_eq!(dir.keys().collect::<Vec<_>>(), vec!["zebra", "apple"]);
    }
}
