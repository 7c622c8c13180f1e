use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait,
};

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::{List, Todo};
use crate::db::entities::{list, todo};

#[derive(Clone)]
pub struct ListDao {
    db: DatabaseConnection,
}

impl DaoBase for ListDao {
    type Entity = List;
    const ENTITY_NAME: &'static str = "List";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ListDao {
    pub async fn create_list(&self, id: Option<i64>, name: &str) -> DaoResult<list::Model> {
        let model = list::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        self.create_with_id(id, model).await
    }

    pub async fn list_lists(&self) -> DaoResult<Vec<list::Model>> {
        self.find_all(|query| query).await
    }

    pub async fn count_lists(&self) -> DaoResult<u64> {
        self.count(|query| query).await
    }

    pub async fn find_list(&self, id: i64) -> DaoResult<list::Model> {
        self.find_by_id(id).await
    }

    pub async fn rename_list(&self, id: i64, name: &str) -> DaoResult<list::Model> {
        let name = name.to_string();
        self.update(id, move |active| {
            active.name = Set(name);
        })
        .await
    }

    /// Deletes the list and every todo that references it in one transaction.
    pub async fn delete_list(&self, id: i64) -> DaoResult<i64> {
        let txn = self.db.begin().await?;

        let todos = Todo::delete_many()
            .filter(todo::Column::ListId.eq(id))
            .exec(&txn)
            .await?;
        let lists = List::delete_by_id(id).exec(&txn).await?;

        if lists.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DaoLayerError::NotFound {
                entity: Self::ENTITY_NAME,
                id,
            });
        }

        txn.commit().await?;
        tracing::debug!(list_id = id, todos = todos.rows_affected, "deleted list");
        Ok(id)
    }
}
