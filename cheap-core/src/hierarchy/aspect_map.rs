use std::collections::HashMap;

use crate::aspect::Aspect;
use crate::entity::Entity;
use crate::error::HierarchyError;

///
/// AspectMap
///
/// Entity to aspect, scoped to a single `AspectDef` by name. Every
/// aspect stored here must be an instance of that same def — `put`
/// refuses one whose def name differs. Iteration follows insertion
/// order, so membership is tracked by a separate order vector rather
/// than the backing map's own key order — the same order/lookup split
/// `EntitySet` uses.
///
#[derive(Clone, Debug)]
pub struct AspectMap {
    name: String,
    aspect_def_name: String,
    order: Vec<Entity>,
    entries: HashMap<Entity, Aspect>,
}

impl AspectMap {
    #[must_use]
    pub fn new(name: impl Into<String>, aspect_def_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aspect_def_name: aspect_def_name.into(),
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn aspect_def_name(&self) -> &str {
        &self.aspect_def_name
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
    pub fn get(&self, entity: Entity) -> Option<&Aspect> {
        self.entries.get(&entity)
    }

    /// Put an aspect for `entity`. A second `put` for an entity already
    /// present overwrites its aspect in place, keeping its original
    /// position in iteration order.
    pub fn put(&mut self, entity: Entity, aspect: Aspect) -> Result<(), HierarchyError> {
        if aspect.def().name != self.aspect_def_name {
            return Err(HierarchyError::TypeMismatch);
        }
        if self.entries.insert(entity, aspect).is_none() {
            self.order.push(entity);
        }
        Ok(())
    }

    pub fn remove(&mut self, entity: Entity) -> Option<Aspect> {
        let removed = self.entries.remove(&entity);
        if removed.is_some() {
            self.order.retain(|e| *e != entity);
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.contains_key(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &Aspect)> {
        self.order.iter().filter_map(move |e| self.entries.get(e).map(|a| (*e, a)))
    }
}
