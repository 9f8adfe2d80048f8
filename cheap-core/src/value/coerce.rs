use super::{Value, ValueType};

///
/// Constrained value coercion.
///
/// When a raw input value does not match a `PropertyDef`'s declared type,
/// the engine attempts a constrained conversion:
/// - string → Integer/Float/Boolean via strict parse
/// - numeric zero/one → Boolean
/// - anything else is a hard mismatch
///
/// Coercion never crosses into the bigger numeric types (`BigInteger`,
/// `BigDecimal`) or the opaque ones (`Uri`, `Uuid`, `Clob`, `Blob`,
/// `DateTime`) — those must already be the declared type, because no
/// lossless textual round trip is guaranteed for them without knowing the
/// exchange format up front (the serializer, not this helper, owns that).
///
pub fn coerce(value: &Value, target: ValueType) -> Result<Value, ()> {
    if value.value_type() == target {
        return Ok(value.clone());
    }

    match (value, target) {
        (Value::Null(_), _) => Ok(Value::Null(target)),

        (Value::String(s), ValueType::Integer) => s.trim().parse::<i64>().map(Value::Integer).map_err(|_| ()),
        (Value::String(s), ValueType::Float) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| ()),
        (Value::String(s), ValueType::Boolean) => parse_bool(s).map(Value::Boolean).ok_or(()),

        (Value::Integer(0), ValueType::Boolean) => Ok(Value::Boolean(false)),
        (Value::Integer(1), ValueType::Boolean) => Ok(Value::Boolean(true)),

        (Value::Integer(i), ValueType::Float) => Ok(Value::Float(*i as f64)),

        _ => Err(()),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_to_integer() {
        assert_eq!(
            coerce(&Value::String("42".into()), ValueType::Integer),
            Ok(Value::Integer(42))
        );
    }

    #[test]
    fn string_to_integer_rejects_garbage() {
        assert!(coerce(&Value::String("abc".into()), ValueType::Integer).is_err());
    }

    #[test]
    fn numeric_zero_one_to_boolean() {
        assert_eq!(
            coerce(&Value::Integer(0), ValueType::Boolean),
            Ok(Value::Boolean(false))
        );
        assert_eq!(
            coerce(&Value::Integer(1), ValueType::Boolean),
            Ok(Value::Boolean(true))
        );
        assert!(coerce(&Value::Integer(2), ValueType::Boolean).is_err());
    }

    #[test]
    fn null_coerces_to_any_target() {
        assert_eq!(
            coerce(&Value::Null(ValueType::Integer), ValueType::String),
            Ok(Value::Null(ValueType::String))
        );
    }

    #[test]
    fn no_coercion_between_opaque_types() {
        assert!(coerce(&Value::String("not-a-uuid".into()), ValueType::Uuid).is_err());
    }
}
