use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{AspectError, InternalError};
use crate::model::{AspectDef, PropertyDef};
use crate::value::{read_as, Value, ValueType};

///
/// Aspect
///
/// A property-value store bound to a single `AspectDef`. What
/// operations are permitted is entirely a function of the def's four
/// mutability booleans — `Aspect` itself has no separate "kind"; it is
/// the same type whether the def is immutable, fixed-shape mutable, or
/// fully mutable.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Aspect {
    def: Rc<AspectDef>,
    values: BTreeMap<String, Value>,
}

impl Aspect {
    /// Construct an aspect for `def`, seeding every declared property
    /// with its default value (or a typed null when no default is
    /// declared and the property is nullable).
    #[must_use]
    pub fn new(def: Rc<AspectDef>) -> Self {
        let mut values = BTreeMap::new();
        for prop in def.properties() {
            let initial = prop
                .default_value
                .clone()
                .unwrap_or(Value::Null(prop.value_type));
            values.insert(prop.name.clone(), initial);
        }
        Self { def, values }
    }

    #[must_use]
    pub fn def(&self) -> &AspectDef {
        &self.def
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Raw, unchecked access to a property's current value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Checked read: fails if the aspect is not readable or the
    /// property is not declared.
    pub fn read(&self, name: &str) -> Result<&Value, InternalError> {
        if !self.def.is_readable {
            return Err(AspectError::NotFound {
                name: name.to_string(),
            }
            .into());
        }
        self.values
            .get(name)
            .ok_or_else(|| AspectError::NotFound { name: name.to_string() }.into())
    }

    /// Checked, coerced read against an expected `ValueType`.
    pub fn read_as(&self, name: &str, expected: ValueType) -> Result<Value, InternalError> {
        let value = self.read(name)?;
        read_as(value, expected)
    }

    /// Checked whole-value replace. Enforces writability, nullability,
    /// and coerces/type-checks against the declared `ValueType` (spec
    /// §4.3: multi-valued properties replace the entire sequence, never
    /// append-in-place).
    pub fn put(&mut self, name: &str, value: Value) -> Result<(), InternalError> {
        if !self.def.is_writable {
            return Err(AspectError::NotWritable.into());
        }
        let prop = self.property_def(name)?;
        if !prop.is_writable {
            return Err(AspectError::NotWritable.into());
        }
        let checked = self.check_value(prop, value)?;
        self.values.insert(name.to_string(), checked);
        Ok(())
    }

    /// Alias for [`Aspect::put`], for call sites that prefer the verb
    /// "write" over "put".
    pub fn write(&mut self, name: &str, value: Value) -> Result<(), InternalError> {
        self.put(name, value)
    }

    /// Add a new, previously-undeclared property slot. Only permitted
    /// when `can_add_properties` is set (fully-mutable aspects).
    pub fn add(&mut self, prop: &PropertyDef, value: Value) -> Result<(), InternalError> {
        if !self.def.can_add_properties {
            return Err(AspectError::NotAddable.into());
        }
        let checked = self.check_value(prop, value)?;
        self.values.insert(prop.name.clone(), checked);
        Ok(())
    }

    /// Remove a property slot. Only permitted when
    /// `can_remove_properties` is set.
    pub fn remove(&mut self, name: &str) -> Result<Value, InternalError> {
        if !self.def.can_remove_properties {
            return Err(AspectError::NotRemovable.into());
        }
        self.values
            .remove(name)
            .ok_or_else(|| AspectError::NotFound { name: name.to_string() }.into())
    }

    /// Iterate `(name, value)` pairs in the owning `AspectDef`'s
    /// declaration order, falling back to lexical order for slots added
    /// dynamically beyond the original definition.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        let mut ordered: Vec<&str> = self.def.properties().iter().map(|p| p.name.as_str()).collect();
        for name in self.values.keys() {
            if !ordered.contains(&name.as_str()) {
                ordered.push(name.as_str());
            }
        }
        ordered
            .into_iter()
            .filter_map(move |name| self.values.get_key_value(name).map(|(k, v)| (k.as_str(), v)))
    }

    fn property_def(&self, name: &str) -> Result<&PropertyDef, InternalError> {
        self.def
            .property(name)
            .ok_or_else(|| AspectError::NotFound { name: name.to_string() }.into())
    }

    fn check_value(&self, prop: &PropertyDef, value: Value) -> Result<Value, InternalError> {
        if value.is_null() {
            if !prop.is_nullable {
                return Err(AspectError::NullNotAllowed {
                    name: prop.name.clone(),
                }
                .into());
            }
            return Ok(Value::Null(prop.value_type));
        }

        if value.is_list() {
            if !prop.is_multivalued {
                return Err(AspectError::TypeMismatch {
                    name: prop.name.clone(),
                }
                .into());
            }
            return Ok(value);
        }

        if prop.is_multivalued {
            return Err(AspectError::TypeMismatch {
                name: prop.name.clone(),
            }
            .into());
        }

        if value.value_type() == prop.value_type {
            return Ok(value);
        }

        crate::value::coerce(&value, prop.value_type).map_err(|()| {
            AspectError::TypeMismatch {
                name: prop.name.clone(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_aspect() -> Aspect {
        let def = AspectDef::new("person")
            .with_property(PropertyDef::new("name", ValueType::String))
            .with_property(PropertyDef::new("age", ValueType::Integer).nullable());
        Aspect::new(Rc::new(def))
    }

    #[test]
    fn defaults_are_null_without_declared_default() {
        let aspect = person_aspect();
        assert_eq!(aspect.get("age"), Some(&Value::Null(ValueType::Integer)));
    }

    #[test]
    fn put_rejects_null_on_non_nullable_property() {
        let mut aspect = person_aspect();
        let err = aspect.put("name", Value::Null(ValueType::String));
        assert!(err.is_err());
    }

    #[test]
    fn put_coerces_string_to_integer() {
        let mut aspect = person_aspect();
        aspect.put("age", Value::String("42".into())).unwrap();
        assert_eq!(aspect.get("age"), Some(&Value::Integer(42)));
    }

    #[test]
    fn fixed_shape_aspect_rejects_add_and_remove() {
        let mut aspect = person_aspect();
        let prop = PropertyDef::new("nickname", ValueType::String).nullable();
        assert!(aspect.add(&prop, Value::Null(ValueType::String)).is_err());
        assert!(aspect.remove("name").is_err());
    }

    #[test]
    fn fully_mutable_aspect_allows_add_and_remove() {
        let def = AspectDef::new("tags")
            .with_property(PropertyDef::new("label", ValueType::String))
            .fully_mutable();
        let mut aspect = Aspect::new(Rc::new(def));
        let extra = PropertyDef::new("color", ValueType::String).nullable();
        aspect.add(&extra, Value::String("red".into())).unwrap();
        assert_eq!(aspect.get("color"), Some(&Value::String("red".into())));
        aspect.remove("color").unwrap();
        assert!(!aspect.contains("color"));
    }

    #[test]
    fn immutable_aspect_rejects_put() {
        let def = AspectDef::new("const")
            .with_property(PropertyDef::new("value", ValueType::Integer))
            .immutable();
        let mut aspect = Aspect::new(Rc::new(def));
        assert!(aspect.put("value", Value::Integer(2)).is_err());
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let aspect = person_aspect();
        let names: Vec<&str> = aspect.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "age"]);
    }
}
