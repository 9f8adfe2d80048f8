mod coerce;

#[cfg(test)]
mod tests;

pub use coerce::coerce;

use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

///
/// ValueType
///
/// The twelve-member primitive value lattice. Every type
/// supports an explicit null (`Value::Null(ValueType)`) rather than a
/// sentinel; every type may additionally be declared multi-valued on a
/// `PropertyDef`, in which case a property holds `Value::List` of this
/// type and mutation replaces the whole sequence.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Integer,
    Float,
    Boolean,
    String,
    Text,
    BigInteger,
    BigDecimal,
    DateTime,
    Uri,
    Uuid,
    Clob,
    Blob,
}

impl ValueType {
    /// Stable three-letter code used in the relational schema.
    #[must_use]
    pub const fn code3(self) -> &'static str {
        match self {
            Self::Integer => "INT",
            Self::Float => "FLT",
            Self::Boolean => "BLN",
            Self::String => "STR",
            Self::Text => "TXT",
            Self::BigInteger => "BGI",
            Self::BigDecimal => "BGF",
            Self::DateTime => "DAT",
            Self::Uri => "URI",
            Self::Uuid => "UID",
            Self::Clob => "CLB",
            Self::Blob => "BLB",
        }
    }

    /// Enum name used on the wire (`Integer`, `Float`, ...).
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::Text => "Text",
            Self::BigInteger => "BigInteger",
            Self::BigDecimal => "BigDecimal",
            Self::DateTime => "DateTime",
            Self::Uri => "URI",
            Self::Uuid => "UUID",
            Self::Clob => "CLOB",
            Self::Blob => "BLOB",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Some(match name {
            "Integer" => Self::Integer,
            "Float" => Self::Float,
            "Boolean" => Self::Boolean,
            "String" => Self::String,
            "Text" => Self::Text,
            "BigInteger" => Self::BigInteger,
            "BigDecimal" => Self::BigDecimal,
            "DateTime" => Self::DateTime,
            "URI" => Self::Uri,
            "UUID" => Self::Uuid,
            "CLOB" => Self::Clob,
            "BLOB" => Self::Blob,
            _ => return None,
        })
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Maximum code-point length for `Value::String`.
pub const MAX_STRING_CODEPOINTS: usize = 8192;

///
/// Value
///
/// A single scalar from the twelve-type lattice, or a list of them for a
/// multi-valued property — an ordered sequence of that type, never a
/// set.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
    Null(ValueType),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Text(String),
    BigInteger(BigInt),
    BigDecimal(Decimal),
    DateTime(DateTime<Utc>),
    Uri(Url),
    Uuid(Uuid),
    Clob(String),
    Blob(Vec<u8>),
    /// Multi-valued property contents: an ordered sequence of one scalar
    /// type. Never itself nested (a `List` of `List` is rejected at
    /// construction).
    List(ValueType, Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null(ty) => *ty,
            Self::Integer(_) => ValueType::Integer,
            Self::Float(_) => ValueType::Float,
            Self::Boolean(_) => ValueType::Boolean,
            Self::String(_) => ValueType::String,
            Self::Text(_) => ValueType::Text,
            Self::BigInteger(_) => ValueType::BigInteger,
            Self::BigDecimal(_) => ValueType::BigDecimal,
            Self::DateTime(_) => ValueType::DateTime,
            Self::Uri(_) => ValueType::Uri,
            Self::Uuid(_) => ValueType::Uuid,
            Self::Clob(_) => ValueType::Clob,
            Self::Blob(_) => ValueType::Blob,
            Self::List(ty, _) => *ty,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }

    /// Construct a `String` value, rejecting anything over the
    /// code-point budget.
    pub fn string(s: impl Into<String>) -> Result<Self, InternalError> {
        let s = s.into();
        if s.chars().count() > MAX_STRING_CODEPOINTS {
            return Err(InternalError::new(
                ErrorClass::TypedValue,
                ErrorOrigin::Aspect,
                format!(
                    "String value exceeds {MAX_STRING_CODEPOINTS} code points ({} given)",
                    s.chars().count()
                ),
            ));
        }
        Ok(Self::String(s))
    }

    /// Build a `List` value, rejecting nested lists.
    pub fn list(element_type: ValueType, values: Vec<Self>) -> Result<Self, InternalError> {
        for v in &values {
            if v.is_list() {
                return Err(InternalError::new(
                    ErrorClass::TypedValue,
                    ErrorOrigin::Aspect,
                    "multi-valued properties cannot nest lists",
                ));
            }
        }
        Ok(Self::List(element_type, values))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null(a), Self::Null(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(a), Self::String(b))
            | (Self::Text(a), Self::Text(b))
            | (Self::Clob(a), Self::Clob(b)) => a == b,
            (Self::BigInteger(a), Self::BigInteger(b)) => a == b,
            (Self::BigDecimal(a), Self::BigDecimal(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Uri(a), Self::Uri(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            (Self::Blob(a), Self::Blob(b)) => a == b,
            (Self::List(ta, a), Self::List(tb, b)) => ta == tb && a == b,
            _ => false,
        }
    }
}

/// Helper used by `Aspect::read_as` for a typed, coerced read.
pub fn read_as(value: &Value, expected: ValueType) -> Result<Value, InternalError> {
    if value.value_type() == expected {
        return Ok(value.clone());
    }
    coerce(value, expected).map_err(|_| {
        InternalError::new(
            ErrorClass::TypedValue,
            ErrorOrigin::Aspect,
            format!(
                "cannot coerce {:?} value to {expected}",
                value.value_type()
            ),
        )
    })
}

