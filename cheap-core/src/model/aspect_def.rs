use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PropertyDef;
use crate::hash::{ContentHash, ContentHasher};

///
/// Mutability
///
/// The three mutability flavors an `AspectDef` can take on, derived from
/// its four booleans rather than expressed as three separate types —
/// the choice of storage is an internal optimization, not part of the
/// public contract.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mutability {
    /// `writable == false`: no add, no remove, no rewrite. Reads always succeed.
    Immutable,
    /// `writable == true`, fixed shape: slots may be rewritten but not
    /// added or removed.
    Mutable,
    /// `writable == true`, `can_add_properties == true`,
    /// `can_remove_properties == true`: slots may be added, removed, and
    /// rewritten.
    FullyMutable,
}

///
/// AspectDef
///
/// A globally-named, content-addressable schema for an aspect. Fixes
/// the ordered property set and the mutability
/// profile. Two `AspectDef`s sharing a name must share a content hash —
/// a registry enforces that (see `Factory::extend_aspectage`).
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AspectDef {
    pub name: String,
    pub global_id: Option<Uuid>,
    pub uri: Option<String>,
    pub version: Option<u32>,
    pub is_readable: bool,
    pub is_writable: bool,
    pub can_add_properties: bool,
    pub can_remove_properties: bool,
    properties: Vec<PropertyDef>,
}

impl AspectDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global_id: None,
            uri: None,
            version: None,
            is_readable: true,
            is_writable: true,
            can_add_properties: false,
            can_remove_properties: false,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub const fn immutable(mut self) -> Self {
        self.is_writable = false;
        self.can_add_properties = false;
        self.can_remove_properties = false;
        self
    }

    #[must_use]
    pub const fn fully_mutable(mut self) -> Self {
        self.is_writable = true;
        self.can_add_properties = true;
        self.can_remove_properties = true;
        self
    }

    /// Append a property definition, assigning it the next declaration
    /// index (definition order).
    #[must_use]
    pub fn with_property(mut self, mut property: PropertyDef) -> Self {
        property.declaration_index = self.properties.len();
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub const fn mutability(&self) -> Mutability {
        if !self.is_writable {
            Mutability::Immutable
        } else if self.can_add_properties && self.can_remove_properties {
            Mutability::FullyMutable
        } else {
            Mutability::Mutable
        }
    }

    /// Order-sensitive SHA-256 content hash over the name and every
    /// property definition, in declaration order.
    #[must_use]
    pub fn content_hash(&self) -> ContentHash {
        let mut hasher = ContentHasher::new();
        hasher.update_str(&self.name);
        hasher
            .update_bool(self.is_readable)
            .update_bool(self.is_writable)
            .update_bool(self.can_add_properties)
            .update_bool(self.can_remove_properties);
        for p in &self.properties {
            hasher
                .update_str(&p.name)
                .update_u8(property_type_tag(p))
                .update_bool(p.is_multivalued)
                .update_bool(p.is_nullable)
                .update_bool(p.is_readable)
                .update_bool(p.is_writable)
                .update_bool(p.is_removable);
        }
        hasher.finish()
    }

    /// Two `AspectDef`s are structurally interchangeable iff they share
    /// the same name and content hash.
    #[must_use]
    pub fn structurally_equal(&self, other: &Self) -> bool {
        self.name == other.name && self.content_hash() == other.content_hash()
    }
}

fn property_type_tag(p: &PropertyDef) -> u8 {
    use crate::value::ValueType;
    match p.value_type {
        ValueType::Integer => 0,
        ValueType::Float => 1,
        ValueType::Boolean => 2,
        ValueType::String => 3,
        ValueType::Text => 4,
        ValueType::BigInteger => 5,
        ValueType::BigDecimal => 6,
        ValueType::DateTime => 7,
        ValueType::Uri => 8,
        ValueType::Uuid => 9,
        ValueType::Clob => 10,
        ValueType::Blob => 11,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    fn person_def() -> AspectDef {
        AspectDef::new("person")
            .with_property(PropertyDef::new("name", ValueType::String))
            .with_property(PropertyDef::new("age", ValueType::Integer))
    }

    #[test]
    fn declaration_order_is_preserved() {
        let def = person_def();
        assert_eq!(def.properties()[0].name, "name");
        assert_eq!(def.properties()[1].name, "age");
        assert_eq!(def.properties()[0].declaration_index, 0);
        assert_eq!(def.properties()[1].declaration_index, 1);
    }

    #[test]
    fn identical_defs_share_content_hash() {
        assert_eq!(person_def().content_hash(), person_def().content_hash());
    }

    #[test]
    fn reordering_properties_changes_hash() {
        let reordered = AspectDef::new("person")
            .with_property(PropertyDef::new("age", ValueType::Integer))
            .with_property(PropertyDef::new("name", ValueType::String));
        assert_ne!(person_def().content_hash(), reordered.content_hash());
    }

    #[test]
    fn mutability_flavors() {
        assert_eq!(person_def().immutable().mutability(), Mutability::Immutable);
        assert_eq!(person_def().mutability(), Mutability::Mutable);
        assert_eq!(
            person_def().fully_mutable().mutability(),
            Mutability::FullyMutable
        );
    }
}
