//! ConfigService: the create/update/delete/reorder operations on the
//! dashboard configuration document.
//!
//! Every mutating operation is the same four steps:
//!
//! ```text
//! validate input ─► store.read() ─► one positional edit ─► store.write()
//! ```
//!
//! Validation runs before the document is loaded, so a rejected input never
//! touches the file.  An edit whose position does not resolve reports
//! `Ok(false)` and skips the write entirely.
//!
//! # Concurrency
//!
//! The document is loaded fresh for every operation and overwritten whole on
//! save (last writer wins).  Within one process the read-modify-write
//! sequence is serialized by a mutex; two manager processes pointed at the
//! same file can still race.

use std::sync::{Mutex, PoisonError};

use homer_core::{
    CategoryInput, ConfigDocument, Direction, GlobalSettingsInput, ItemUpdateInput, NewItemInput,
    ServiceCategory, ServiceItem,
};
use tracing::{debug, info};

use super::error::{ManagerError, StoreError};

/// Persistence seam for the configuration document.
///
/// The production implementation is the YAML file store; tests may use any
/// implementation that round-trips a [`ConfigDocument`].
pub trait DocumentStore: Send + Sync {
    /// Loads the whole document.
    fn read(&self) -> Result<ConfigDocument, StoreError>;
    /// Replaces the whole document.
    fn write(&self, document: &ConfigDocument) -> Result<(), StoreError>;
}

/// Configuration operations over an injected [`DocumentStore`].
pub struct ConfigService {
    store: Box<dyn DocumentStore>,
    write_lock: Mutex<()>,
}

impl ConfigService {
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            write_lock: Mutex::new(()),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn get_config(&self) -> Result<ConfigDocument, ManagerError> {
        Ok(self.store.read()?)
    }

    /// Returns the category at `index`, or `None` if out of range.
    pub fn get_category(&self, index: usize) -> Result<Option<ServiceCategory>, ManagerError> {
        Ok(self.store.read()?.category(index).cloned())
    }

    /// Returns the item at `(category, item)`, or `None` if either is out of range.
    pub fn get_item(
        &self,
        category: usize,
        item: usize,
    ) -> Result<Option<ServiceItem>, ManagerError> {
        Ok(self.store.read()?.item(category, item).cloned())
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    pub fn update_global_settings(&self, input: GlobalSettingsInput) -> Result<bool, ManagerError> {
        input.validate()?;
        self.mutate("update_global_settings", |doc| doc.apply_global_settings(input))
    }

    pub fn add_category(&self, input: CategoryInput) -> Result<bool, ManagerError> {
        input.validate()?;
        self.mutate("add_category", |doc| doc.push_category(input))
    }

    pub fn update_category(&self, index: usize, input: CategoryInput) -> Result<bool, ManagerError> {
        input.validate()?;
        self.mutate("update_category", |doc| doc.update_category(index, input))
    }

    pub fn delete_category(&self, index: usize) -> Result<bool, ManagerError> {
        self.mutate("delete_category", |doc| doc.remove_category(index))
    }

    pub fn move_category(&self, index: usize, direction: Direction) -> Result<bool, ManagerError> {
        self.mutate("move_category", |doc| doc.move_category(index, direction))
    }

    pub fn add_item(&self, category: usize, input: NewItemInput) -> Result<bool, ManagerError> {
        input.validate()?;
        self.mutate("add_item", |doc| doc.push_item(category, input))
    }

    pub fn update_item(
        &self,
        category: usize,
        item: usize,
        input: ItemUpdateInput,
    ) -> Result<bool, ManagerError> {
        input.validate()?;
        self.mutate("update_item", |doc| doc.update_item(category, item, input))
    }

    pub fn delete_item(&self, category: usize, item: usize) -> Result<bool, ManagerError> {
        self.mutate("delete_item", |doc| doc.remove_item(category, item))
    }

    pub fn move_item(
        &self,
        category: usize,
        item: usize,
        direction: Direction,
    ) -> Result<bool, ManagerError> {
        self.mutate("move_item", |doc| doc.move_item(category, item, direction))
    }

    /// Runs one read → edit → write cycle under the process-local write lock.
    fn mutate<F>(&self, operation: &'static str, edit: F) -> Result<bool, ManagerError>
    where
        F: FnOnce(&mut ConfigDocument) -> bool,
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut document = self.store.read()?;
        if !edit(&mut document) {
            debug!(operation, "position did not resolve; document unchanged");
            return Ok(false);
        }
        self.store.write(&document)?;
        info!(operation, "configuration updated");
        Ok(true)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use homer_core::Columns;

    // ── Test doubles ──────────────────────────────────────────────────────────

    /// In-memory store that counts reads and writes.
    #[derive(Default)]
    struct MemoryStore {
        document: Mutex<Option<ConfigDocument>>,
        reads: Mutex<u32>,
        writes: Mutex<u32>,
        fail_writes: bool,
    }

    impl MemoryStore {
        fn with(document: ConfigDocument) -> Self {
            Self {
                document: Mutex::new(Some(document)),
                ..Self::default()
            }
        }
    }

    impl DocumentStore for Arc<MemoryStore> {
        fn read(&self) -> Result<ConfigDocument, StoreError> {
            *self.reads.lock().unwrap() += 1;
            self.document
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| StoreError::NotFound {
                    path: PathBuf::from("memory://config.yml"),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
        }

        fn write(&self, document: &ConfigDocument) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Write {
                    path: PathBuf::from("memory://config.yml"),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                });
            }
            *self.writes.lock().unwrap() += 1;
            *self.document.lock().unwrap() = Some(document.clone());
            Ok(())
        }
    }

    fn seeded() -> (ConfigService, Arc<MemoryStore>) {
        let mut doc = ConfigDocument::default();
        for name in ["A", "B", "C"] {
            doc.push_category(CategoryInput {
                name: name.to_string(),
                icon: "fas fa-cube".to_string(),
            });
        }
        let store = Arc::new(MemoryStore::with(doc));
        (ConfigService::new(Arc::clone(&store)), store)
    }

    fn stored(store: &MemoryStore) -> ConfigDocument {
        store.document.lock().unwrap().clone().unwrap()
    }

    fn writes(store: &MemoryStore) -> u32 {
        *store.writes.lock().unwrap()
    }

    fn category(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            icon: "fas fa-star".to_string(),
        }
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn test_update_category_with_empty_name_leaves_document_unchanged() {
        // Arrange
        let (service, store) = seeded();
        let before = stored(&store);

        // Act
        let result = service.update_category(0, category(""));

        // Assert
        assert!(matches!(result, Err(ManagerError::Validation(_))));
        assert_eq!(stored(&store), before);
        assert_eq!(writes(&store), 0);
        assert_eq!(*store.reads.lock().unwrap(), 0, "validation runs before read");
    }

    #[test]
    fn test_update_item_with_empty_name_is_rejected() {
        let (service, store) = seeded();
        let result = service.update_item(
            0,
            0,
            ItemUpdateInput {
                name: String::new(),
                url: "http://x".to_string(),
                ..ItemUpdateInput::default()
            },
        );
        assert_eq!(result.unwrap_err().kind(), "validation_error");
        assert_eq!(writes(&store), 0);
    }

    #[test]
    fn test_global_settings_with_empty_title_is_rejected() {
        let (service, store) = seeded();
        let result = service.update_global_settings(GlobalSettingsInput {
            title: "  ".to_string(),
            subtitle: String::new(),
            columns: Columns::Two,
            theme: String::new(),
        });
        assert!(result.is_err());
        assert_eq!(writes(&store), 0);
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    #[test]
    fn test_add_category_persists() {
        let (service, store) = seeded();
        assert!(service.add_category(category("D")).unwrap());
        assert_eq!(stored(&store).services[3].name, "D");
        assert_eq!(writes(&store), 1);
    }

    #[test]
    fn test_move_first_category_up_does_not_write() {
        // Arrange
        let (service, store) = seeded();
        let before = stored(&store);

        // Act
        let changed = service.move_category(0, Direction::Up).unwrap();

        // Assert
        assert!(!changed);
        assert_eq!(stored(&store), before);
        assert_eq!(writes(&store), 0);
    }

    #[test]
    fn test_move_last_category_down_does_not_write() {
        let (service, store) = seeded();
        assert!(!service.move_category(2, Direction::Down).unwrap());
        assert_eq!(writes(&store), 0);
    }

    #[test]
    fn test_delete_then_move_addresses_by_position() {
        let (service, store) = seeded();

        assert!(service.delete_category(0).unwrap());
        assert!(service.move_category(0, Direction::Down).unwrap());

        let names: Vec<_> = stored(&store)
            .services
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["C", "B"]);
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let (service, store) = seeded();
        assert!(!service.delete_category(10).unwrap());
        assert_eq!(writes(&store), 0);
    }

    #[test]
    fn test_item_lifecycle() {
        let (service, store) = seeded();
        let new_item = |name: &str| NewItemInput {
            name: name.to_string(),
            url: format!("http://{name}"),
            ..NewItemInput::default()
        };

        assert!(service.add_item(1, new_item("x")).unwrap());
        assert!(service.add_item(1, new_item("y")).unwrap());
        assert!(service.move_item(1, 1, Direction::Up).unwrap());
        assert!(service
            .update_item(
                1,
                0,
                ItemUpdateInput {
                    name: "y2".to_string(),
                    url: "http://y2".to_string(),
                    ..ItemUpdateInput::default()
                },
            )
            .unwrap());
        assert!(service.delete_item(1, 1).unwrap());

        let item = service.get_item(1, 0).unwrap().expect("item present");
        assert_eq!(item.name, "y2");
        assert!(service.get_item(1, 1).unwrap().is_none());
        assert_eq!(writes(&store), 5);
    }

    #[test]
    fn test_add_item_to_missing_category_is_noop() {
        let (service, store) = seeded();
        let changed = service
            .add_item(
                9,
                NewItemInput {
                    name: "x".to_string(),
                    url: "http://x".to_string(),
                    ..NewItemInput::default()
                },
            )
            .unwrap();
        assert!(!changed);
        assert_eq!(writes(&store), 0);
    }

    #[test]
    fn test_get_category_out_of_range_is_none() {
        let (service, _) = seeded();
        assert_eq!(service.get_category(1).unwrap().unwrap().name, "B");
        assert!(service.get_category(3).unwrap().is_none());
    }

    // ── Store failures ────────────────────────────────────────────────────────

    #[test]
    fn test_missing_document_aborts_operation() {
        let store = Arc::new(MemoryStore::default());
        let service = ConfigService::new(Arc::clone(&store));

        let err = service.add_category(category("A")).unwrap_err();

        assert_eq!(err.kind(), "not_found");
        assert_eq!(writes(&store), 0);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let store = Arc::new(MemoryStore {
            document: Mutex::new(Some(ConfigDocument::default())),
            fail_writes: true,
            ..MemoryStore::default()
        });
        let service = ConfigService::new(Arc::clone(&store));

        let err = service.add_category(category("A")).unwrap_err();

        assert_eq!(err.kind(), "write_error");
    }
}
