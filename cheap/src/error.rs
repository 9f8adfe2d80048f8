use cheap_core::error::{ErrorClass as CoreErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable class + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Serialize, ThisError)]
#[error("{origin}:{class}: {message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
    pub subject: Option<String>,
}

impl Error {
    #[must_use]
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            subject: None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::Lookup)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Self {
            class: err.class.into(),
            origin: err.origin.into(),
            message: err.message,
            subject: err.subject,
        }
    }
}

///
/// ErrorClass
/// Public mirror of [`cheap_core::error::ErrorClass`].
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorClass {
    Structural,
    Access,
    TypedValue,
    Lookup,
    Parse,
    Persistence,
}

impl From<CoreErrorClass> for ErrorClass {
    fn from(class: CoreErrorClass) -> Self {
        match class {
            CoreErrorClass::Structural => Self::Structural,
            CoreErrorClass::Access => Self::Access,
            CoreErrorClass::TypedValue => Self::TypedValue,
            CoreErrorClass::Lookup => Self::Lookup,
            CoreErrorClass::Parse => Self::Parse,
            CoreErrorClass::Persistence => Self::Persistence,
        }
    }
}

///
/// ErrorOrigin
/// Public mirror of [`cheap_core::error::ErrorOrigin`].
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Catalog,
    Hierarchy,
    Aspect,
    Factory,
    Serialize,
    Dao,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Catalog => Self::Catalog,
            CoreErrorOrigin::Hierarchy => Self::Hierarchy,
            CoreErrorOrigin::Aspect => Self::Aspect,
            CoreErrorOrigin::Factory => Self::Factory,
            CoreErrorOrigin::Serialize => Self::Serialize,
            CoreErrorOrigin::Dao => Self::Dao,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheap_core::error::{ErrorClass as CoreClass, ErrorOrigin as CoreOrigin};

    #[test]
    fn internal_error_converts_into_public_error() {
        let internal = InternalError::new(CoreClass::Lookup, CoreOrigin::Catalog, "not found").with_subject("members");
        let public: Error = internal.into();
        assert_eq!(public.class, ErrorClass::Lookup);
        assert_eq!(public.origin, ErrorOrigin::Catalog);
        assert!(public.is_not_found());
        assert_eq!(public.subject.as_deref(), Some("members"));
    }
}
