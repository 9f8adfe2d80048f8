mod memory;
pub mod schema;

pub use memory::MemoryDao;

use uuid::Uuid;

use crate::error::InternalError;

///
/// Dao
///
/// The abstract, dialect-independent persistence contract:
/// `save`/`load`/`exists`/`delete` against a document keyed by
/// catalog id. Deliberately synchronous — the kernel is single-writer
/// and cooperative by design, and an async runtime is the host
/// application's concern, not this contract's.
///
/// A `document` is whatever the caller's serializer produced (the JSON
/// tree from [`crate::serialize::json::catalog_def_to_json`] plus its
/// hierarchy contents, or a dialect-specific encoding of the same
/// shape) — the `Dao` trait itself is blind to the payload's structure.
///
/// An implementation is expected to report `Event::DaoSave`/`DaoLoad`/
/// `DaoDelete` through an [`crate::obs::Sink`] on every successful
/// round trip, the same way `Catalog` reports its own structural
/// events — see [`MemoryDao::with_sink`].
///
pub trait Dao {
    fn save(&self, catalog_id: Uuid, document: &[u8]) -> Result<(), InternalError>;
    fn load(&self, catalog_id: Uuid) -> Result<Vec<u8>, InternalError>;
    fn exists(&self, catalog_id: Uuid) -> Result<bool, InternalError>;
    fn delete(&self, catalog_id: Uuid) -> Result<(), InternalError>;
}
