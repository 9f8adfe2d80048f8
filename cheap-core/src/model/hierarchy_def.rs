///
/// HierarchyKind
///
/// The five collection variants unified under one polymorphic hierarchy
/// interface. Each variant has its own membership rule and
/// ordering guarantee; `HierarchyKind` is the tag the engine dispatches
/// on when a `Hierarchy` value is constructed from a `HierarchyDef`.
///
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HierarchyKind {
    /// Ordered, duplicates allowed.
    EntityList,
    /// Unique membership, insertion order preserved.
    EntitySet,
    /// String key to entity, a key may map to multiple entities.
    EntityDirectory,
    /// Rooted, path-addressed tree; nodes are leaves or branches.
    EntityTree,
    /// Entity to aspect, scoped to a single `AspectDef`.
    AspectMap,
}

impl HierarchyKind {
    #[must_use]
    pub const fn code2(self) -> &'static str {
        match self {
            Self::EntityList => "EL",
            Self::EntitySet => "ES",
            Self::EntityDirectory => "ED",
            Self::EntityTree => "ET",
            Self::AspectMap => "AM",
        }
    }

    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::EntityList => "EntityList",
            Self::EntitySet => "EntitySet",
            Self::EntityDirectory => "EntityDirectory",
            Self::EntityTree => "EntityTree",
            Self::AspectMap => "AspectMap",
        }
    }

    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "EntityList" => Some(Self::EntityList),
            "EntitySet" => Some(Self::EntitySet),
            "EntityDirectory" => Some(Self::EntityDirectory),
            "EntityTree" => Some(Self::EntityTree),
            "AspectMap" => Some(Self::AspectMap),
            _ => None,
        }
    }
}

impl std::fmt::Display for HierarchyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

///
/// HierarchyDef
///
/// Names and types a hierarchy within a catalog. An
/// `AspectMap` additionally binds to a single `AspectDef` by name — the
/// aspect it maps entities onto.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HierarchyDef {
    pub name: String,
    pub kind: HierarchyKind,
    /// Populated only for `HierarchyKind::AspectMap`: the name of the
    /// `AspectDef` every member's aspect must conform to.
    pub aspect_def_name: Option<String>,
}

impl HierarchyDef {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: HierarchyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            aspect_def_name: None,
        }
    }

    #[must_use]
    pub fn aspect_map(name: impl Into<String>, aspect_def_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: HierarchyKind::AspectMap,
            aspect_def_name: Some(aspect_def_name.into()),
        }
    }
}
