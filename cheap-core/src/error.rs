use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
/// Structured runtime error with a stable class × origin classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Clone, Debug, ThisError)]
#[error("{origin}:{class}: {message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
    /// Identifier of the offending element (aspect-def name, hierarchy name,
    /// property name, entity UUID, or stream offset).
    pub subject: Option<String>,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            subject: None,
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::Lookup)
    }
}

///
/// ErrorClass
/// Public error taxonomy.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorClass {
    /// DefinitionConflict, DuplicateName, UnknownAspectDef, UnknownHierarchyDef, StrictViolation.
    Structural,
    /// ReadOnly, NotWritable, NotRemovable, NotAddable.
    Access,
    /// TypeMismatch, NullNotAllowed, OutOfRange.
    TypedValue,
    /// NotFound, IndexOutOfBounds.
    Lookup,
    /// MalformedInput, MissingRequiredField, OrderingViolation.
    Parse,
    /// StorageUnavailable, SchemaIncompatible, TransactionAborted.
    Persistence,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Structural => "structural",
            Self::Access => "access",
            Self::TypedValue => "typed_value",
            Self::Lookup => "lookup",
            Self::Parse => "parse",
            Self::Persistence => "persistence",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Which layer raised the error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorOrigin {
    Catalog,
    Hierarchy,
    Aspect,
    Factory,
    Serialize,
    Dao,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Catalog => "catalog",
            Self::Hierarchy => "hierarchy",
            Self::Aspect => "aspect",
            Self::Factory => "factory",
            Self::Serialize => "serialize",
            Self::Dao => "dao",
        };
        write!(f, "{label}")
    }
}

///
/// Per-layer error enums
///
/// Each carries `thiserror` messages and a `From` impl into `InternalError`.
///

#[derive(Clone, Debug, ThisError)]
pub enum CatalogError {
    #[error("aspect-def '{name}' already registered with different contents")]
    DefinitionConflict { name: String },
    #[error("hierarchy '{name}' already registered")]
    DuplicateName { name: String },
    #[error("catalog is read-only for species {species}")]
    ReadOnly { species: String },
    #[error("aspect-def '{name}' is not declared in this strict catalog's CatalogDef")]
    StrictViolation { name: String },
    #[error("hierarchy '{name}' not found")]
    NotFound { name: String },
    #[error("aspect-def '{name}' not registered")]
    UnknownAspectDef { name: String },
    #[error("species '{species}' requires an upstream of kind {expected}")]
    InvalidUpstream { species: String, expected: &'static str },
}

impl From<CatalogError> for InternalError {
    fn from(err: CatalogError) -> Self {
        let subject = match &err {
            CatalogError::DefinitionConflict { name }
            | CatalogError::DuplicateName { name }
            | CatalogError::StrictViolation { name }
            | CatalogError::NotFound { name }
            | CatalogError::UnknownAspectDef { name } => Some(name.clone()),
            CatalogError::ReadOnly { species } | CatalogError::InvalidUpstream { species, .. } => {
                Some(species.clone())
            }
        };
        let class = match err {
            CatalogError::DefinitionConflict { .. }
            | CatalogError::DuplicateName { .. }
            | CatalogError::StrictViolation { .. }
            | CatalogError::UnknownAspectDef { .. }
            | CatalogError::InvalidUpstream { .. } => ErrorClass::Structural,
            CatalogError::ReadOnly { .. } => ErrorClass::Access,
            CatalogError::NotFound { .. } => ErrorClass::Lookup,
        };
        let mut internal = Self::new(class, ErrorOrigin::Catalog, err.to_string());
        internal.subject = subject;
        internal
    }
}

#[derive(Clone, Debug, ThisError)]
pub enum HierarchyError {
    #[error("no entry found")]
    NotFound,
    #[error("key already present")]
    DuplicateKey,
    #[error("aspect does not match this hierarchy's (entity, aspect-def)")]
    TypeMismatch,
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("hierarchy is read-only")]
    ReadOnly,
}

impl From<HierarchyError> for InternalError {
    fn from(err: HierarchyError) -> Self {
        let class = match err {
            HierarchyError::NotFound => ErrorClass::Lookup,
            HierarchyError::DuplicateKey | HierarchyError::TypeMismatch => ErrorClass::Structural,
            HierarchyError::IndexOutOfBounds { .. } => ErrorClass::Lookup,
            HierarchyError::ReadOnly => ErrorClass::Access,
        };
        Self::new(class, ErrorOrigin::Hierarchy, err.to_string())
    }
}

#[derive(Clone, Debug, ThisError)]
pub enum AspectError {
    #[error("property '{name}' not found")]
    NotFound { name: String },
    #[error("aspect does not permit adding property slots")]
    NotAddable,
    #[error("aspect does not permit removing property slots")]
    NotRemovable,
    #[error("aspect is not writable")]
    NotWritable,
    #[error("value for '{name}' cannot be coerced to the declared type")]
    TypeMismatch { name: String },
    #[error("property '{name}' is not nullable")]
    NullNotAllowed { name: String },
}

impl From<AspectError> for InternalError {
    fn from(err: AspectError) -> Self {
        let subject = match &err {
            AspectError::NotFound { name }
            | AspectError::TypeMismatch { name }
            | AspectError::NullNotAllowed { name } => Some(name.clone()),
            AspectError::NotAddable | AspectError::NotRemovable | AspectError::NotWritable => None,
        };
        let class = match err {
            AspectError::NotFound { .. } => ErrorClass::Lookup,
            AspectError::NotAddable | AspectError::NotRemovable | AspectError::NotWritable => {
                ErrorClass::Access
            }
            AspectError::TypeMismatch { .. } => ErrorClass::TypedValue,
            AspectError::NullNotAllowed { .. } => ErrorClass::TypedValue,
        };
        let mut internal = Self::new(class, ErrorOrigin::Aspect, err.to_string());
        internal.subject = subject;
        internal
    }
}

#[derive(Clone, Debug, ThisError)]
pub enum FactoryError {
    #[error("aspect-def '{name}' already registered with different contents")]
    DefinitionConflict { name: String },
    #[error("aspect-def '{name}' not registered")]
    UnknownAspectDef { name: String },
    #[error("hierarchy-def for '{name}' not registered")]
    UnknownHierarchyDef { name: String },
}

impl From<FactoryError> for InternalError {
    fn from(err: FactoryError) -> Self {
        let subject = match &err {
            FactoryError::DefinitionConflict { name }
            | FactoryError::UnknownAspectDef { name }
            | FactoryError::UnknownHierarchyDef { name } => Some(name.clone()),
        };
        let mut internal = Self::new(ErrorClass::Structural, ErrorOrigin::Factory, err.to_string());
        internal.subject = subject;
        internal
    }
}

#[derive(Clone, Debug, ThisError)]
pub enum SerializeError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),
    #[error("aspect-def '{0}' referenced before its definition")]
    OrderingViolationAspect(String),
    #[error("hierarchy '{0}' referenced before its hierarchy-def")]
    OrderingViolationHierarchy(String),
    #[error("aspect-def '{0}' referenced but not registered")]
    UnknownAspectDef(String),
    #[error("hierarchy-def for '{0}' referenced but not registered")]
    UnknownHierarchyDef(String),
    #[error("duplicate name '{0}'")]
    DuplicateName(String),
    #[error("aspect-def '{0}' redefined with different contents")]
    AspectDefConflict(String),
    #[error("value for '{field}' has the wrong type")]
    TypeMismatch { field: String },
    #[error("serialize error: {0}")]
    Encode(String),
}

impl From<SerializeError> for InternalError {
    fn from(err: SerializeError) -> Self {
        let class = match err {
            SerializeError::OrderingViolationAspect(_)
            | SerializeError::OrderingViolationHierarchy(_)
            | SerializeError::MalformedInput(_)
            | SerializeError::MissingRequiredField(_) => ErrorClass::Parse,
            SerializeError::UnknownAspectDef(_)
            | SerializeError::UnknownHierarchyDef(_)
            | SerializeError::DuplicateName(_)
            | SerializeError::AspectDefConflict(_) => ErrorClass::Structural,
            SerializeError::TypeMismatch { .. } => ErrorClass::TypedValue,
            SerializeError::Encode(_) => ErrorClass::Parse,
        };
        Self::new(class, ErrorOrigin::Serialize, err.to_string())
    }
}

#[derive(Clone, Debug, ThisError)]
pub enum DaoError {
    #[error("catalog {0} not found")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("schema incompatible: {0}")]
    SchemaIncompatible(String),
    #[error("transaction aborted: {0}")]
    TransactionAborted(String),
}

impl From<DaoError> for InternalError {
    fn from(err: DaoError) -> Self {
        let class = match err {
            DaoError::NotFound(_) => ErrorClass::Lookup,
            DaoError::StorageUnavailable(_)
            | DaoError::SchemaIncompatible(_)
            | DaoError::TransactionAborted(_) => ErrorClass::Persistence,
        };
        Self::new(class, ErrorOrigin::Dao, err.to_string())
    }
}
