use serde::{Deserialize, Serialize};

use crate::value::{Value, ValueType};

///
/// PropertyDef
///
/// A named, typed property slot declared by an `AspectDef`. Identity is
/// `(aspect-def, name)` — a `PropertyDef` is never globally identified on
/// its own. Immutable once published: an `AspectDef` is
/// never edited in place, only replaced wholesale (and a replacement with
/// different property definitions is a `DefinitionConflict`, not a
/// mutation).
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub value_type: ValueType,
    pub is_multivalued: bool,
    pub is_nullable: bool,
    pub is_readable: bool,
    pub is_writable: bool,
    pub is_removable: bool,
    pub default_value: Option<Value>,
    /// Position in the owning `AspectDef`'s property list. Drives
    /// definition-order iteration and the serializer's `propertyDefs`
    /// array order.
    pub(crate) declaration_index: usize,
    pub doc: Option<String>,
}

impl PropertyDef {
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            is_multivalued: false,
            is_nullable: false,
            is_readable: true,
            is_writable: true,
            is_removable: false,
            default_value: None,
            declaration_index: 0,
            doc: None,
        }
    }

    #[must_use]
    pub const fn multivalued(mut self) -> Self {
        self.is_multivalued = true;
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub const fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let p = PropertyDef::new("age", ValueType::Integer);
        assert!(!p.is_multivalued);
        assert!(!p.is_nullable);
        assert!(p.is_readable && p.is_writable);
        assert!(!p.has_default_value());
    }
}
