use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use super::Dao;
use crate::error::{DaoError, InternalError};
use crate::obs::{Event, NullSink, Sink};

///
/// MemoryDao
///
/// An in-process reference `Dao` implementation backed by a `RefCell`
/// map, used internally for round-trip tests and as a worked example of
/// the trait's contract. Not `Sync` — matches the kernel's
/// single-writer-per-catalog model, where only the factory needs
/// cross-thread coordination. Reports `DaoSave`/`DaoLoad`/`DaoDelete`
/// through its configured sink (default: a no-op sink) on every
/// successful round trip, the same seam `Catalog` reports its own
/// structural events through.
///
pub struct MemoryDao {
    documents: RefCell<HashMap<Uuid, Vec<u8>>>,
    sink: Rc<dyn Sink>,
}

impl Default for MemoryDao {
    fn default() -> Self {
        Self {
            documents: RefCell::new(HashMap::new()),
            sink: Rc::new(NullSink),
        }
    }
}

impl MemoryDao {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Rc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }
}

impl Dao for MemoryDao {
    fn save(&self, catalog_id: Uuid, document: &[u8]) -> Result<(), InternalError> {
        self.documents.borrow_mut().insert(catalog_id, document.to_vec());
        self.sink.record(&Event::DaoSave {
            catalog: catalog_id.to_string(),
        });
        Ok(())
    }

    fn load(&self, catalog_id: Uuid) -> Result<Vec<u8>, InternalError> {
        let document = self
            .documents
            .borrow()
            .get(&catalog_id)
            .cloned()
            .ok_or_else(|| DaoError::NotFound(catalog_id.to_string()).into())?;
        self.sink.record(&Event::DaoLoad {
            catalog: catalog_id.to_string(),
        });
        Ok(document)
    }

    fn exists(&self, catalog_id: Uuid) -> Result<bool, InternalError> {
        Ok(self.documents.borrow().contains_key(&catalog_id))
    }

    fn delete(&self, catalog_id: Uuid) -> Result<(), InternalError> {
        self.documents
            .borrow_mut()
            .remove(&catalog_id)
            .ok_or_else(|| DaoError::NotFound(catalog_id.to_string()).into())?;
        self.sink.record(&Event::DaoDelete {
            catalog: catalog_id.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dao = MemoryDao::new();
        let id = Uuid::new_v4();
        dao.save(id, b"payload").unwrap();
        assert_eq!(dao.load(id).unwrap(), b"payload");
        assert!(dao.exists(id).unwrap());
    }

    #[test]
    fn load_missing_catalog_is_not_found() {
        let dao = MemoryDao::new();
        let err = dao.load(Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_then_exists_is_false() {
        let dao = MemoryDao::new();
        let id = Uuid::new_v4();
        dao.save(id, b"payload").unwrap();
        dao.delete(id).unwrap();
        assert!(!dao.exists(id).unwrap());
    }

    #[test]
    fn delete_missing_catalog_is_an_error() {
        let dao = MemoryDao::new();
        assert!(dao.delete(Uuid::new_v4()).is_err());
    }

    #[derive(Default)]
    struct RecordingSink(RefCell<Vec<String>>);

    impl Sink for RecordingSink {
        fn record(&self, event: &Event) {
            self.0.borrow_mut().push(format!("{event:?}"));
        }
    }

    #[test]
    fn save_load_and_delete_report_through_the_configured_sink() {
        let sink = Rc::new(RecordingSink::default());
        let dao = MemoryDao::new().with_sink(sink.clone());
        let id = Uuid::new_v4();

        dao.save(id, b"payload").unwrap();
        dao.load(id).unwrap();
        dao.delete(id).unwrap();

        let events = sink.0.borrow();
        assert_eq!(events.len(), 3);
        assert!(events[0].starts_with("DaoSave"));
        assert!(events[1].starts_with("DaoLoad"));
        assert!(events[2].starts_with("DaoDelete"));
    }
}
