use std::rc::Rc;

use uuid::Uuid;

use crate::error::{CatalogError, InternalError};
use crate::hierarchy::{AspectMap, Hierarchy};
use crate::model::{AspectDef, CatalogDef, HierarchyDef};
use crate::obs::{Event, NullSink, Sink};

///
/// Species
///
/// Every catalog plays exactly one role in the propagation graph (spec
/// §3.2, §4.1). The species fixes whether the catalog accepts local
/// writes, whether it requires an upstream, and whether writes
/// propagate to that upstream.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Species {
    /// Authoritative origin. Writable, no upstream.
    Source,
    /// Terminal destination. Writable locally; writes propagate to its
    /// upstream and are not expected to flow back.
    Sink,
    /// Read-only reflection of an upstream; local writes are rejected.
    Mirror,
    /// Read-mostly local copy of an upstream, may go stale between
    /// refreshes; local writes are rejected.
    Cache,
    /// A detached, writable copy with no upstream relation at all.
    Clone,
    /// A writable snapshot initially tied to an upstream, able to
    /// detach into an independent `Sink` via [`Catalog::fork_to_sink`].
    Fork,
}

impl Species {
    /// Local writes are disallowed for `source` and `mirror` (spec
    /// §3.4's lattice table); `cache` is writable and write-through,
    /// not read-only.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Source | Self::Mirror)
    }

    /// Every catalog carries exactly one upstream reference, never both
    /// and never neither — `source`/`sink` catalogs
    /// carry an [`Upstream::External`] descriptor of the system they
    /// back; the other four carry an [`Upstream::Catalog`] reference.
    #[must_use]
    pub const fn requires_upstream(self) -> bool {
        true
    }

    /// Whether this species' single upstream must be an
    /// [`Upstream::External`] descriptor (`true`, for `source`/`sink`,
    /// which back an external source) or an [`Upstream::Catalog`]
    /// reference (`false`, for the other four, which back another
    /// catalog).
    #[must_use]
    pub const fn backs_external(self) -> bool {
        matches!(self, Self::Source | Self::Sink)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Sink => "sink",
            Self::Mirror => "mirror",
            Self::Cache => "cache",
            Self::Clone => "clone",
            Self::Fork => "fork",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

///
/// Upstream
///
/// Exactly one relation, never both: a catalog's upstream is either an
/// external system descriptor or another catalog by its global id.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Upstream {
    External(String),
    Catalog(Uuid),
}

///
/// Catalog
///
/// A named collection of hierarchies sharing an aspectage. Owns its
/// schema (`CatalogDef`), its concrete `Hierarchy`
/// instances, its `Species`/`Upstream` relation, and a monotonic version
/// counter bumped on every structural mutation (extending the aspectage,
/// adding a hierarchy, or a species transition).
///
pub struct Catalog {
    global_id: Uuid,
    def: CatalogDef,
    hierarchies: Vec<(String, Hierarchy)>,
    species: Species,
    upstream: Option<Upstream>,
    strict: bool,
    version: u64,
    sink: Rc<dyn Sink>,
}

impl Catalog {
    /// Construct a catalog with a freshly minted global id. `upstream`
    /// must be present and its kind must agree with
    /// `species.backs_external()` — mismatches are a structural error
    /// rather than silently tolerated.
    pub fn new(
        def: CatalogDef,
        species: Species,
        upstream: Option<Upstream>,
        strict: bool,
    ) -> Result<Self, InternalError> {
        Self::with_global_id(Uuid::new_v4(), def, species, upstream, strict)
    }

    /// Construct a catalog with an explicit global id, for deserializing
    /// (or otherwise reconstituting) a catalog whose identity is already
    /// fixed.
    pub fn with_global_id(
        global_id: Uuid,
        def: CatalogDef,
        species: Species,
        upstream: Option<Upstream>,
        strict: bool,
    ) -> Result<Self, InternalError> {
        Self::validate_upstream(species, upstream.as_ref())?;
        Ok(Self {
            global_id,
            def,
            hierarchies: Vec::new(),
            species,
            upstream,
            strict,
            version: 0,
            sink: Rc::new(NullSink),
        })
    }

    #[must_use]
    pub const fn global_id(&self) -> Uuid {
        self.global_id
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Rc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    fn validate_upstream(species: Species, upstream: Option<&Upstream>) -> Result<(), InternalError> {
        let invalid = || {
            CatalogError::InvalidUpstream {
                species: species.label().to_string(),
                expected: if species.backs_external() {
                    "an external source descriptor"
                } else {
                    "another catalog"
                },
            }
            .into()
        };
        match upstream {
            None => Err(invalid()),
            Some(Upstream::External(_)) if !species.backs_external() => Err(invalid()),
            Some(Upstream::Catalog(_)) if species.backs_external() => Err(invalid()),
            Some(_) => Ok(()),
        }
    }

    #[must_use]
    pub const fn species(&self) -> Species {
        self.species
    }

    #[must_use]
    pub fn upstream(&self) -> Option<&Upstream> {
        self.upstream.as_ref()
    }

    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.species.is_read_only()
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn def(&self) -> &CatalogDef {
        &self.def
    }

    /// The set of `AspectDef`s this catalog's aspectage currently
    /// reaches.
    #[must_use]
    pub fn aspectage(&self) -> impl Iterator<Item = &AspectDef> {
        self.def.aspect_defs()
    }

    /// The catalog's `AspectMap` hierarchy for `name`'s `AspectDef`, if
    /// one exists — spec §4.1's `aspects(name)` lookup. Returns
    /// `None` both when no hierarchy of that name is present and when
    /// a hierarchy of that name exists but is not an `AspectMap`.
    #[must_use]
    pub fn aspects(&self, name: &str) -> Option<&AspectMap> {
        match self.hierarchy(name)? {
            Hierarchy::AspectMap(map) => Some(map),
            _ => None,
        }
    }

    /// Equivalent to [`Self::aspects`], addressed by `AspectDef` rather
    /// than by name — spec §4.1's `aspects(def)` lookup.
    #[must_use]
    pub fn aspects_for(&self, def: &AspectDef) -> Option<&AspectMap> {
        self.aspects(&def.name)
    }

    /// Register `def` with this catalog. A companion `AspectMap`
    /// hierarchy named identically to `def` is created automatically if
    /// one is not already present (spec §3.3, §4.1) — callers never
    /// construct that hierarchy by hand.
    pub fn extend_aspectage(&mut self, def: AspectDef) -> Result<(), InternalError> {
        if self.strict && self.def.aspect_def(&def.name).is_none() {
            return Err(CatalogError::StrictViolation {
                name: def.name.clone(),
            }
            .into());
        }
        let name = def.name.clone();
        self.def.extend_aspectage(def)?;
        if self.hierarchy(&name).is_none() {
            let hierarchy_def = HierarchyDef::aspect_map(name.clone(), name.clone());
            self.restore_hierarchy(hierarchy_def, Hierarchy::AspectMap(AspectMap::new(name.clone(), name.clone())))?;
        }
        self.bump_version();
        self.sink.record(&Event::AspectageExtended {
            catalog: self.label(),
            aspect_def: name,
        });
        Ok(())
    }

    pub fn add_hierarchy(&mut self, hierarchy_def: HierarchyDef, hierarchy: Hierarchy) -> Result<(), InternalError> {
        if self.is_read_only() {
            return Err(CatalogError::ReadOnly {
                species: self.species.label().to_string(),
            }
            .into());
        }
        if self.hierarchies.iter().any(|(name, _)| *name == hierarchy_def.name) {
            return Err(CatalogError::DuplicateName {
                name: hierarchy_def.name,
            }
            .into());
        }
        self.restore_hierarchy(hierarchy_def, hierarchy)?;
        self.bump_version();
        Ok(())
    }

    /// Attach a hierarchy and register its def without the
    /// `is_read_only` check `add_hierarchy` enforces for runtime
    /// mutation. Used by the deserializer to reconstitute a catalog's
    /// hierarchies regardless of species — a `Source`/`Mirror` catalog
    /// loaded from the wire already has the content `add_hierarchy`
    /// would otherwise refuse to accept.
    pub(crate) fn restore_hierarchy(&mut self, hierarchy_def: HierarchyDef, hierarchy: Hierarchy) -> Result<(), InternalError> {
        if self.hierarchies.iter().any(|(name, _)| *name == hierarchy_def.name) {
            return Err(CatalogError::DuplicateName {
                name: hierarchy_def.name,
            }
            .into());
        }
        let name = hierarchy_def.name.clone();
        self.def.add_hierarchy_def(hierarchy_def)?;
        self.hierarchies.push((name.clone(), hierarchy));
        self.sink.record(&Event::HierarchyAdded {
            catalog: self.label(),
            hierarchy: name,
        });
        Ok(())
    }

    #[must_use]
    pub fn hierarchy(&self, name: &str) -> Option<&Hierarchy> {
        self.hierarchies.iter().find(|(n, _)| n == name).map(|(_, h)| h)
    }

    pub fn hierarchy_mut(&mut self, name: &str) -> Result<&mut Hierarchy, InternalError> {
        if self.is_read_only() {
            return Err(CatalogError::ReadOnly {
                species: self.species.label().to_string(),
            }
            .into());
        }
        self.hierarchies
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, h)| h)
            .ok_or_else(|| CatalogError::NotFound { name: name.to_string() }.into())
    }

    pub fn hierarchies(&self) -> impl Iterator<Item = &Hierarchy> {
        self.hierarchies.iter().map(|(_, h)| h)
    }

    /// Produce a new, independent `Sink` catalog copying this one's
    /// entire content graph, with the upstream linkage cleared (spec
    /// §4.1: "produces a new catalog of species sink, copying the
    /// content graph and clearing the upstream linkage"). Valid for any
    /// derivative species backing another catalog (`Mirror`, `Cache`,
    /// `Clone`, `Fork`) — the one-way transition that severs a
    /// read-only or upstream-tracking derivative into an independent
    /// working copy (spec §3.4).
    pub fn fork_to_sink(&self) -> Result<Self, InternalError> {
        if self.species.backs_external() {
            return Err(CatalogError::StrictViolation {
                name: self.species.label().to_string(),
            }
            .into());
        }
        let forked = Self {
            global_id: Uuid::new_v4(),
            def: self.def.clone(),
            hierarchies: self.hierarchies.clone(),
            species: Species::Sink,
            upstream: None,
            strict: self.strict,
            version: 0,
            sink: Rc::clone(&self.sink),
        };
        forked.sink.record(&Event::SpeciesTransition {
            catalog: forked.label(),
            from: self.species.label(),
            to: Species::Sink.label(),
        });
        Ok(forked)
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }

    fn label(&self) -> String {
        format!("catalog@v{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::EntitySet;
    use crate::model::HierarchyKind;

    fn sink_catalog() -> Catalog {
        Catalog::new(
            CatalogDef::new(),
            Species::Sink,
            Some(Upstream::External("origin".into())),
            false,
        )
        .unwrap()
    }

    #[test]
    fn upstream_must_be_present_and_of_the_right_kind() {
        assert!(Catalog::new(CatalogDef::new(), Species::Sink, None, false).is_err());
        // source/sink back an external source; a catalog reference is the wrong kind.
        assert!(Catalog::new(
            CatalogDef::new(),
            Species::Source,
            Some(Upstream::Catalog(Uuid::nil())),
            false
        )
        .is_err());
        // mirror/cache/clone/fork back another catalog; an external descriptor is the wrong kind.
        assert!(Catalog::new(
            CatalogDef::new(),
            Species::Mirror,
            Some(Upstream::External("origin".into())),
            false
        )
        .is_err());
        assert!(Catalog::new(
            CatalogDef::new(),
            Species::Mirror,
            Some(Upstream::Catalog(Uuid::nil())),
            false
        )
        .is_ok());
    }

    #[test]
    fn source_is_read_only_and_cache_is_writable() {
        assert!(Species::Source.is_read_only());
        assert!(!Species::Cache.is_read_only());
    }

    #[test]
    fn mirror_is_read_only() {
        let catalog = Catalog::new(CatalogDef::new(), Species::Mirror, Some(Upstream::Catalog(Uuid::nil())), false)
            .unwrap();
        assert!(catalog.is_read_only());
        assert!(matches!(catalog.species(), Species::Mirror));
    }

    #[test]
    fn adding_hierarchy_bumps_version() {
        let mut catalog = sink_catalog();
        let def = HierarchyDef::new("members", HierarchyKind::EntitySet);
        catalog
            .add_hierarchy(def, Hierarchy::EntitySet(EntitySet::new("members")))
            .unwrap();
        assert_eq!(catalog.version(), 1);
        assert!(catalog.hierarchy("members").is_some());
    }

    #[test]
    fn fork_to_sink_drops_upstream() {
        let catalog =
            Catalog::new(CatalogDef::new(), Species::Fork, Some(Upstream::Catalog(Uuid::nil())), false).unwrap();
        let forked = catalog.fork_to_sink().unwrap();
        assert_eq!(forked.species(), Species::Sink);
        assert!(forked.upstream().is_none());
        // the pre-fork catalog is untouched — fork_to_sink produces a new catalog.
        assert_eq!(catalog.species(), Species::Fork);
    }

    #[test]
    fn fork_to_sink_rejects_source_and_sink_species() {
        let source = Catalog::new(
            CatalogDef::new(),
            Species::Source,
            Some(Upstream::External("origin".into())),
            false,
        )
        .unwrap();
        assert!(source.fork_to_sink().is_err());
    }

    #[test]
    fn strict_catalog_rejects_undeclared_aspect_def() {
        let mut catalog = Catalog::new(
            CatalogDef::new(),
            Species::Sink,
            Some(Upstream::External("origin".into())),
            true,
        )
        .unwrap();
        let def = AspectDef::new("person");
        assert!(catalog.extend_aspectage(def).is_err());
    }

    #[test]
    fn read_only_species_rejects_hierarchy_writes() {
        let mut catalog = Catalog::new(CatalogDef::new(), Species::Source, Some(Upstream::External("origin".into())), false)
            .unwrap();
        let def = HierarchyDef::new("members", HierarchyKind::EntitySet);
        assert!(catalog
            .add_hierarchy(def, Hierarchy::EntitySet(EntitySet::new("members")))
            .is_err());
    }

    #[test]
    fn extend_aspectage_auto_creates_the_companion_aspect_map() {
        let mut catalog = sink_catalog();
        let person = AspectDef::new("person").with_property(crate::model::PropertyDef::new(
            "name",
            crate::value::ValueType::String,
        ));
        catalog.extend_aspectage(person.clone()).unwrap();

        assert!(matches!(catalog.hierarchy("person"), Some(Hierarchy::AspectMap(_))));
        assert!(catalog.aspects("person").is_some());
        assert!(catalog.aspects_for(&person).is_some());
        assert!(catalog.aspects("nonexistent").is_none());
    }

    #[test]
    fn reextending_the_same_aspect_def_does_not_duplicate_the_hierarchy() {
        let mut catalog = sink_catalog();
        let person = AspectDef::new("person");
        catalog.extend_aspectage(person.clone()).unwrap();
        catalog.extend_aspectage(person).unwrap();
        assert_eq!(catalog.hierarchies().count(), 1);
    }
}
