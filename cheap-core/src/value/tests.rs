use super::{read_as, Value, ValueType, MAX_STRING_CODEPOINTS};

#[test]
fn string_rejects_over_budget() {
    let too_long = "x".repeat(MAX_STRING_CODEPOINTS + 1);
    assert!(Value::string(too_long).is_err());
}

#[test]
fn string_accepts_at_budget() {
    let exact = "x".repeat(MAX_STRING_CODEPOINTS);
    assert!(Value::string(exact).is_ok());
}

#[test]
fn list_rejects_nested_list() {
    let inner = Value::List(ValueType::Integer, vec![Value::Integer(1)]);
    let err = Value::list(ValueType::Integer, vec![inner]);
    assert!(err.is_err());
}

#[test]
fn list_preserves_order() {
    let v = Value::list(
        ValueType::Integer,
        vec![Value::Integer(3), Value::Integer(1), Value::Integer(2)],
    )
    .unwrap();
    match v {
        Value::List(ValueType::Integer, items) => {
            assert_eq!(items, vec![Value::Integer(3), Value::Integer(1), Value::Integer(2)]);
        }
        _ => panic!("expected list"),
    }
}

#[test]
fn read_as_matching_type_is_passthrough() {
    let v = Value::Integer(7);
    assert_eq!(read_as(&v, ValueType::Integer).unwrap(), Value::Integer(7));
}

#[test]
fn read_as_mismatch_without_coercion_fails() {
    let v = Value::Uuid(uuid::Uuid::nil());
    assert!(read_as(&v, ValueType::Integer).is_err());
}

#[test]
fn float_nan_equality_is_bitwise() {
    let a = Value::Float(f64::NAN);
    let b = Value::Float(f64::NAN);
    assert_eq!(a, b);
}
