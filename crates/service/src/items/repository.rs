use async_trait::async_trait;

use super::domain::Item;
use crate::errors::ServiceError;

/// Persistence interface for items.
///
/// `save` inserts when `id` is `None` and overwrites the stored row otherwise;
/// an `id` with no stored row is `ServiceError::NotFound`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn save(&self, item: Item) -> Result<Item, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Item>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, ServiceError>;
    async fn delete(&self, item: Item) -> Result<(), ServiceError>;
}

/// In-memory repository, used by tests and by `ITEM_STORE=memory`.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct State {
        last_id: i64,
        items: BTreeMap<i64, Item>, // key: item id
    }

    #[derive(Default)]
    pub struct InMemoryItemRepository {
        state: Mutex<State>,
    }

    impl InMemoryItemRepository {
        fn lock(&self) -> Result<MutexGuard<'_, State>, ServiceError> {
            self.state.lock().map_err(|_| ServiceError::Db("item store lock poisoned".into()))
        }
    }

    #[async_trait]
    impl ItemRepository for InMemoryItemRepository {
        async fn save(&self, mut item: Item) -> Result<Item, ServiceError> {
            let mut state = self.lock()?;
            let id = match item.id {
                // Only existing rows are overwritten, matching the SeaORM store.
                Some(id) if state.items.contains_key(&id) => id,
                Some(_) => return Err(ServiceError::not_found("item")),
                None => {
                    state.last_id = state
                        .last_id
                        .checked_add(1)
                        .ok_or_else(|| ServiceError::Db("item id space exhausted".into()))?;
                    state.last_id
                }
            };
            item.id = Some(id);
            state.items.insert(id, item.clone());
            Ok(item)
        }

        async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
            Ok(self.lock()?.items.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Item>, ServiceError> {
            Ok(self.lock()?.items.get(&id).cloned())
        }

        async fn delete(&self, item: Item) -> Result<(), ServiceError> {
            if let Some(id) = item.id {
                self.lock()?.items.remove(&id);
            }
            Ok(())
        }
    }

}
