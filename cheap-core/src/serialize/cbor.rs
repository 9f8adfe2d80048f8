use serde::{Deserialize, Serialize};

use crate::error::{InternalError, SerializeError};
use crate::value::Value;

///
/// Atom-level CBOR codec.
///
/// The JSON module owns the full catalog wire protocol and its ordering
/// laws; this module only needs to get a single `Value` atom in and out
/// of CBOR bytes for callers storing property values in a binary form
/// (e.g. a DAO backend that prefers CBOR over JSON text for its
/// `property_value` column). `Value` already derives `Serialize`/
/// `Deserialize`, so this is a thin wrapper, not a parallel protocol.
///
pub fn encode(value: &Value) -> Result<Vec<u8>, InternalError> {
    serde_cbor::to_vec(value).map_err(|e| SerializeError::Encode(e.to_string()).into())
}

pub fn decode(bytes: &[u8]) -> Result<Value, InternalError> {
    serde_cbor::from_slice(bytes).map_err(|e| SerializeError::MalformedInput(e.to_string()).into())
}

/// Round-trip any CBOR-serializable atom, used by the DAO layer for
/// definition records it chooses to persist in binary form.
pub fn encode_atom<T: Serialize>(value: &T) -> Result<Vec<u8>, InternalError> {
    serde_cbor::to_vec(value).map_err(|e| SerializeError::Encode(e.to_string()).into())
}

pub fn decode_atom<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, InternalError> {
    serde_cbor::from_slice(bytes).map_err(|e| SerializeError::MalformedInput(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::aspect::Aspect;
    use crate::model::{AspectDef, HierarchyDef, PropertyDef};
    use crate::value::ValueType;

    #[test]
    fn value_round_trips_through_cbor() {
        let value = Value::String("hello".into());
        let bytes = encode(&value).unwrap();
        assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn list_round_trips_through_cbor() {
        let value = Value::List(ValueType::Integer, vec![Value::Integer(1), Value::Integer(2)]);
        let bytes = encode(&value).unwrap();
        assert_eq!(decode(&bytes).unwrap(), value);
    }

    /// Standalone atom: a single `PropertyDef`, per spec §4.4's "smaller
    /// atoms ... may be serialized and deserialized standalone."
    #[test]
    fn property_def_round_trips_as_a_standalone_atom() {
        let prop = PropertyDef::new("age", ValueType::Integer).nullable();
        let bytes = encode_atom(&prop).unwrap();
        let back: PropertyDef = decode_atom(&bytes).unwrap();
        assert_eq!(back.name, prop.name);
        assert_eq!(back.value_type, prop.value_type);
        assert_eq!(back.is_nullable, prop.is_nullable);
    }

    #[test]
    fn hierarchy_def_round_trips_as_a_standalone_atom() {
        let def = HierarchyDef::aspect_map("people", "person");
        let bytes = encode_atom(&def).unwrap();
        let back: HierarchyDef = decode_atom(&bytes).unwrap();
        assert_eq!(back.name, def.name);
        assert_eq!(back.kind, def.kind);
        assert_eq!(back.aspect_def_name, def.aspect_def_name);
    }

    #[test]
    fn aspect_round_trips_as_a_standalone_atom() {
        let def = Rc::new(AspectDef::new("person").with_property(PropertyDef::new("name", ValueType::String)));
        let mut aspect = Aspect::new(def);
        aspect.put("name", Value::string("Alice").unwrap()).unwrap();

        let bytes = encode_atom(&aspect).unwrap();
        let back: Aspect = decode_atom(&bytes).unwrap();
        assert_eq!(back.get("name"), aspect.get("name"));
    }
}
