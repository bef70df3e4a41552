use std::sync::Arc;
use tracing::{debug, info, instrument};

use common::metrics;

use crate::errors::ServiceError;
use crate::items::domain::{Item, ItemInput};
use crate::items::repository::ItemRepository;

/// Item endpoint logic, independent of the web framework.
///
/// Id-addressed operations look the record up first and report absence as
/// `None`/`false` rather than as an error. Nothing here spans the lookup and
/// the write, so concurrent update/delete on one id is last-write-wins.
#[derive(Clone)]
pub struct ItemService {
    repo: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self { Self { repo } }

    /// Persist a new item; the store assigns the id.
    ///
    /// # Examples
    /// ```
    /// use service::items::{ItemService, ItemInput, repository::memory::InMemoryItemRepository};
    /// use std::sync::Arc;
    /// let svc = ItemService::new(Arc::new(InMemoryItemRepository::default()));
    /// let input = ItemInput { name: "Laptop".into(), description: "Gaming Laptop".into() };
    /// let item = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(item.id, Some(1));
    /// assert_eq!(item.name, "Laptop");
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ItemInput) -> Result<Item, ServiceError> {
        metrics::record_operation("create");
        let saved = self.repo.save(Item::new(input.name, input.description)).await?;
        info!(id = ?saved.id, "item_created");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Item>, ServiceError> {
        metrics::record_operation("list");
        let items = self.repo.find_all().await?;
        debug!(count = items.len(), "items_listed");
        Ok(items)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Item>, ServiceError> {
        metrics::record_operation("get");
        let found = self.repo.find_by_id(id).await?;
        if found.is_none() {
            metrics::record_not_found();
        }
        Ok(found)
    }

    /// Overwrite name and description of an existing item.
    ///
    /// Returns `Ok(None)` without writing when the id does not exist.
    ///
    /// # Examples
    /// ```
    /// use service::items::{ItemService, ItemInput, repository::memory::InMemoryItemRepository};
    /// use std::sync::Arc;
    /// let svc = ItemService::new(Arc::new(InMemoryItemRepository::default()));
    /// let input = ItemInput { name: "Laptop Pro".into(), description: "Updated".into() };
    /// assert!(tokio_test::block_on(svc.update(99, input)).unwrap().is_none());
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update(&self, id: i64, input: ItemInput) -> Result<Option<Item>, ServiceError> {
        metrics::record_operation("update");
        let Some(mut existing) = self.repo.find_by_id(id).await? else {
            metrics::record_not_found();
            return Ok(None);
        };
        existing.name = input.name;
        existing.description = input.description;
        match self.repo.save(existing).await {
            Ok(updated) => {
                info!(id, "item_updated");
                Ok(Some(updated))
            }
            // Row vanished between lookup and write.
            Err(ServiceError::NotFound(_)) => {
                metrics::record_not_found();
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Delete an item; returns whether it existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        metrics::record_operation("delete");
        let Some(existing) = self.repo.find_by_id(id).await? else {
            metrics::record_not_found();
            return Ok(false);
        };
        self.repo.delete(existing).await?;
        info!(id, "item_deleted");
        Ok(true)
    }
}
