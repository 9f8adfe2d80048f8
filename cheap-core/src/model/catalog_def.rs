use super::{AspectDef, HierarchyDef};
use crate::error::{CatalogError, InternalError};
use uuid::Uuid;

///
/// CatalogDef
///
/// The schema of a catalog: its aspectage (the set of `AspectDef`s it
/// recognizes, keyed by name) and its hierarchy definitions. A
/// catalog's global identity is optional — only catalogs registered in
/// the factory's cross-process namespace carry one.
///
/// Aspect defs are kept in a `Vec` rather than a sorted map: the
/// serializer emits definitions in registration order, so the
/// lookup-by-name used for conflict checks and `aspect_def` must not
/// reorder them.
///
#[derive(Clone, Debug, Default)]
pub struct CatalogDef {
    pub global_id: Option<Uuid>,
    aspect_defs: Vec<(String, AspectDef)>,
    hierarchy_defs: Vec<HierarchyDef>,
}

impl CatalogDef {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aspect_defs(&self) -> impl Iterator<Item = &AspectDef> {
        self.aspect_defs.iter().map(|(_, def)| def)
    }

    #[must_use]
    pub fn aspect_def(&self, name: &str) -> Option<&AspectDef> {
        self.aspect_defs.iter().find(|(n, _)| n == name).map(|(_, def)| def)
    }

    #[must_use]
    pub fn hierarchy_defs(&self) -> &[HierarchyDef] {
        &self.hierarchy_defs
    }

    #[must_use]
    pub fn hierarchy_def(&self, name: &str) -> Option<&HierarchyDef> {
        self.hierarchy_defs.iter().find(|h| h.name == name)
    }

    /// Extend the aspectage with a new `AspectDef`. Registering the same
    /// name twice with differing content is a `DefinitionConflict`;
    /// registering it twice with identical content is a no-op (spec
    /// §4.3, idempotent extension).
    pub fn extend_aspectage(&mut self, def: AspectDef) -> Result<(), InternalError> {
        match self.aspect_defs.iter().find(|(n, _)| *n == def.name) {
            Some((_, existing)) if existing.structurally_equal(&def) => Ok(()),
            Some(_) => Err(CatalogError::DefinitionConflict { name: def.name }.into()),
            None => {
                self.aspect_defs.push((def.name.clone(), def));
                Ok(())
            }
        }
    }

    /// Add a hierarchy definition. The name must be unique within the
    /// catalog; an `AspectMap` must bind to an already-registered
    /// `AspectDef`.
    pub fn add_hierarchy_def(&mut self, def: HierarchyDef) -> Result<(), InternalError> {
        if self.hierarchy_defs.iter().any(|h| h.name == def.name) {
            return Err(CatalogError::DefinitionConflict { name: def.name }.into());
        }
        if let Some(aspect_name) = &def.aspect_def_name {
            if !self.aspect_defs.iter().any(|(n, _)| n == aspect_name) {
                return Err(CatalogError::UnknownAspectDef {
                    name: aspect_name.clone(),
                }
                .into());
            }
        }
        self.hierarchy_defs.push(def);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HierarchyKind, PropertyDef};
    use crate::value::ValueType;

    fn person() -> AspectDef {
        AspectDef::new("person").with_property(PropertyDef::new("name", ValueType::String))
    }

    #[test]
    fn idempotent_reextension_is_ok() {
        let mut def = CatalogDef::new();
        def.extend_aspectage(person()).unwrap();
        assert!(def.extend_aspectage(person()).is_ok());
    }

    #[test]
    fn conflicting_reextension_is_rejected() {
        let mut def = CatalogDef::new();
        def.extend_aspectage(person()).unwrap();
        let changed = AspectDef::new("person")
            .with_property(PropertyDef::new("name", ValueType::String))
            .with_property(PropertyDef::new("age", ValueType::Integer));
        assert!(def.extend_aspectage(changed).is_err());
    }

    #[test]
    fn aspect_map_requires_known_aspect_def() {
        let mut def = CatalogDef::new();
        let result = def.add_hierarchy_def(HierarchyDef::aspect_map("profiles", "person"));
        assert!(result.is_err());

        def.extend_aspectage(person()).unwrap();
        def.add_hierarchy_def(HierarchyDef::aspect_map("profiles", "person"))
            .unwrap();
        assert_eq!(def.hierarchy_defs().len(), 1);
    }

    #[test]
    fn duplicate_hierarchy_name_is_conflict() {
        let mut def = CatalogDef::new();
        def.add_hierarchy_def(HierarchyDef::new("members", HierarchyKind::EntitySet))
            .unwrap();
        let dup = def.add_hierarchy_def(HierarchyDef::new("members", HierarchyKind::EntityList));
        assert!(dup.is_err());
    }
}
