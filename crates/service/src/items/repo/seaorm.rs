use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::items::domain::Item;
use crate::items::repository::ItemRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmItemRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn save(&self, item: Item) -> Result<Item, ServiceError> {
        let saved = match item.id {
            None => models::item::create(&self.db, &item.name, &item.description).await?,
            Some(id) => models::item::update(&self.db, id, &item.name, &item.description)
                .await
                .map_err(|e| match e {
                    models::errors::ModelError::NotFound(_) => ServiceError::not_found("item"),
                    other => ServiceError::Model(other),
                })?,
        };
        Ok(saved.into())
    }

    async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
        let rows = models::item::find_all(&self.db).await?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, ServiceError> {
        let found = models::item::find_by_id(&self.db, id).await?;
        Ok(found.map(Item::from))
    }

    async fn delete(&self, item: Item) -> Result<(), ServiceError> {
        if let Some(id) = item.id {
            models::item::delete(&self.db, id).await?;
        }
        Ok(())
    }
}
