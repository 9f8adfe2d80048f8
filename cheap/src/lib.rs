//! CHEAP — a structured-data caching kernel.
//!
//! Five tiers, strictly layered: Catalog, Hierarchy, Entity, Aspect,
//! Property. A [`Catalog`](prelude::Catalog) owns a set of
//! [`Hierarchy`](prelude::Hierarchy) collections and a shared aspectage;
//! each hierarchy addresses [`Entity`](prelude::Entity) handles; each
//! entity's data lives in an [`Aspect`](prelude::Aspect) keyed by typed
//! [`PropertyDef`](prelude::PropertyDef)s.
//!
//! This crate is the small, curated public surface over
//! [`cheap_core`], which carries the actual engine and is free to
//! change shape between patch releases. Use the [`prelude`] for the
//! common path.

pub mod error;

pub use error::{Error, ErrorClass, ErrorOrigin};

pub mod prelude {
    pub use crate::error::{Error, ErrorClass, ErrorOrigin};
    pub use cheap_core::aspect::Aspect;
    pub use cheap_core::catalog::{Catalog, Species, Upstream};
    pub use cheap_core::dao::{Dao, MemoryDao};
    pub use cheap_core::entity::Entity;
    pub use cheap_core::factory::Factory;
    pub use cheap_core::hierarchy::{
        AspectMap, EntityDirectory, EntityList, EntitySet, EntityTree, Hierarchy, TreeNode,
    };
    pub use cheap_core::model::{AspectDef, CatalogDef, HierarchyDef, HierarchyKind, PropertyDef};
    pub use cheap_core::serialize::cbor::{decode as value_from_cbor, encode as value_to_cbor};
    pub use cheap_core::serialize::{
        catalog_def_from_json, catalog_def_to_json, catalog_from_json, catalog_to_json, hierarchy_from_json,
        hierarchy_to_json, value_from_json, value_to_json, DeserializeContext,
    };
    pub use cheap_core::value::{Value, ValueType};
}
