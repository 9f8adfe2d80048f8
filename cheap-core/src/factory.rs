use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use uuid::Uuid;

use crate::entity::Entity;
use crate::error::{FactoryError, InternalError};
use crate::model::{AspectDef, HierarchyDef};

///
/// Factory
///
/// The one thread-safe, process-scoped structure in the kernel (spec
/// §3.5, §9): a compare-and-set-keyed registry of `AspectDef`s and
/// `HierarchyDef`s, plus the canonical pool of entity UUIDs seen this
/// process. Everything downstream of the factory — catalogs,
/// hierarchies, aspects — is `!Sync` by convention; only the factory
/// itself needs to coordinate across threads.
///
pub struct Factory {
    aspect_defs: Mutex<HashMap<String, AspectDef>>,
    hierarchy_defs: Mutex<HashMap<String, HierarchyDef>>,
    entities: Mutex<HashSet<Uuid>>,
}

impl Factory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            aspect_defs: Mutex::new(HashMap::new()),
            hierarchy_defs: Mutex::new(HashMap::new()),
            entities: Mutex::new(HashSet::new()),
        }
    }

    /// Register `def`, or confirm an identical prior registration.
    /// Compare-and-set: a name collision with differing content is a
    /// `DefinitionConflict`, never a silent overwrite.
    pub fn register_aspect_def(&self, def: AspectDef) -> Result<(), InternalError> {
        let mut defs = self.aspect_defs.lock().expect("factory lock poisoned");
        match defs.get(&def.name) {
            Some(existing) if existing.structurally_equal(&def) => Ok(()),
            Some(_) => Err(FactoryError::DefinitionConflict { name: def.name }.into()),
            None => {
                defs.insert(def.name.clone(), def);
                Ok(())
            }
        }
    }

    pub fn aspect_def(&self, name: &str) -> Result<AspectDef, InternalError> {
        self.aspect_defs
            .lock()
            .expect("factory lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| FactoryError::UnknownAspectDef { name: name.to_string() }.into())
    }

    pub fn register_hierarchy_def(&self, def: HierarchyDef) -> Result<(), InternalError> {
        let mut defs = self.hierarchy_defs.lock().expect("factory lock poisoned");
        if defs.contains_key(&def.name) {
            return Err(FactoryError::DefinitionConflict { name: def.name }.into());
        }
        defs.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn hierarchy_def(&self, name: &str) -> Result<HierarchyDef, InternalError> {
        self.hierarchy_defs
            .lock()
            .expect("factory lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| FactoryError::UnknownHierarchyDef { name: name.to_string() }.into())
    }

    /// Canonicalize a UUID into the process-wide `Entity` pool. Two
    /// calls with the same UUID, from any thread, observe the same pool
    /// membership.
    pub fn get_or_register_entity(&self, id: Uuid) -> Entity {
        self.entities.lock().expect("factory lock poisoned").insert(id);
        Entity::from_uuid(id)
    }

    #[must_use]
    pub fn contains_entity(&self, id: Uuid) -> bool {
        self.entities.lock().expect("factory lock poisoned").contains(&id)
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyDef;
    use crate::value::ValueType;

    #[test]
    fn reregistering_identical_def_is_ok() {
        let factory = Factory::new();
        let def = AspectDef::new("person").with_property(PropertyDef::new("name", ValueType::String));
        factory.register_aspect_def(def.clone()).unwrap();
        assert!(factory.register_aspect_def(def).is_ok());
    }

    #[test]
    fn reregistering_conflicting_def_fails() {
        let factory = Factory::new();
        factory.register_aspect_def(AspectDef::new("person")).unwrap();
        let changed = AspectDef::new("person").with_property(PropertyDef::new("name", ValueType::String));
        assert!(factory.register_aspect_def(changed).is_err());
    }

    #[test]
    fn entity_pool_is_stable_across_calls() {
        let factory = Factory::new();
        let id = Uuid::new_v4();
        let a = factory.get_or_register_entity(id);
        let b = factory.get_or_register_entity(id);
        assert_eq!(a, b);
        assert!(factory.contains_entity(id));
    }

    #[test]
    fn unknown_aspect_def_lookup_fails() {
        let factory = Factory::new();
        assert!(factory.aspect_def("nope").is_err());
    }
}
