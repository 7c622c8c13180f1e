use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityName,
    EntityTrait, FromQueryResult, IdenStatic, IntoActiveModel, Order, PaginatorTrait,
    PrimaryKeyTrait, QueryOrder, QuerySelect, Select,
};

use super::base_traits::{HasIdActiveModel, HasIdColumn};
use super::error::{DaoLayerError, DaoResult};

#[derive(Debug, serde::Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub has_next: bool,
}

pub(crate) fn id_sequence_sql(table: &str, column: &str) -> String {
    format!(
        "SELECT setval(pg_get_serial_sequence('{table}', '{column}'), \
         GREATEST((SELECT MAX({column}) FROM {table}), 1))"
    )
}

/// Generic CRUD over an entity with an integer primary key.
///
/// Unless an explicit order is given, rows come back by ascending id.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        FromQueryResult
            + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel>
            + Send
            + Sync
            + 'static,
    <Self::Entity as EntityTrait>::ActiveModel:
        ActiveModelTrait<Entity = Self::Entity> + HasIdActiveModel + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<i64> + Send + Sync,
    Self::Entity: HasIdColumn,
{
    type Entity: EntityTrait + Send + Sync;
    /// Name used in error messages.
    const ENTITY_NAME: &'static str;
    const MAX_PAGE_SIZE: u64 = 100;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        self.create_with_id(None, data).await
    }

    /// Inserts `data`, keeping `id` when given and letting the database pick one otherwise.
    async fn create_with_id(
        &self,
        id: Option<i64>,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let mut active = data.into_active_model();
        if let Some(id) = id {
            if self.exists(id).await? {
                return Err(DaoLayerError::DuplicateId {
                    entity: Self::ENTITY_NAME,
                    id,
                });
            }
            active.set_id(id);
        }

        let model = active.insert(self.db()).await.map_err(|err| {
            let err = DaoLayerError::Db(err);
            match id {
                Some(id) if err.is_unique_violation() => DaoLayerError::DuplicateId {
                    entity: Self::ENTITY_NAME,
                    id,
                },
                _ => err,
            }
        })?;

        if id.is_some() {
            self.sync_id_sequence().await?;
        }
        Ok(model)
    }

    /// Postgres sequences ignore explicit ids; moves the id sequence up to `MAX(id)`.
    async fn sync_id_sequence(&self) -> DaoResult<()> {
        if self.db().get_database_backend() != DatabaseBackend::Postgres {
            return Ok(());
        }

        let sql = id_sequence_sql(
            Self::Entity::default().table_name(),
            Self::Entity::id_column().as_str(),
        );
        self.db().execute_unprepared(&sql).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let model = Self::Entity::find_by_id(id).one(self.db()).await?;

        model.ok_or(DaoLayerError::NotFound {
            entity: Self::ENTITY_NAME,
            id,
        })
    }

    async fn exists(&self, id: i64) -> DaoResult<bool> {
        let model = Self::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.is_some())
    }

    async fn find(
        &self,
        page: u64,
        page_size: u64,
        order: Option<(<Self::Entity as EntityTrait>::Column, Order)>,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<PaginatedResponse<<Self::Entity as EntityTrait>::Model>> {
        if page == 0 || page_size == 0 || page_size > Self::MAX_PAGE_SIZE {
            return Err(DaoLayerError::InvalidPagination { page, page_size });
        }

        let filtered = apply(Self::Entity::find());
        let ordered = match order {
            Some((column, order)) => filtered.order_by(column, order),
            None => filtered.order_by_asc(Self::Entity::id_column()),
        };
        let fetch_size = page_size.saturating_add(1);
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let mut data = ordered
            .limit(fetch_size)
            .offset(offset)
            .all(self.db())
            .await?;

        let has_next = data.len() > page_size as usize;
        if has_next {
            data.truncate(page_size as usize);
        }

        Ok(PaginatedResponse {
            data,
            page,
            page_size,
            has_next,
        })
    }

    /// Walks every page of `apply`'s selection and collects the rows.
    async fn find_all(
        &self,
        apply: impl Fn(Select<Self::Entity>) -> Select<Self::Entity> + Clone + Send,
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        let mut rows = Vec::new();
        let mut page = 1;
        loop {
            let mut response = self
                .find(page, Self::MAX_PAGE_SIZE, None, apply.clone())
                .await?;
            rows.append(&mut response.data);
            if !response.has_next {
                return Ok(rows);
            }
            page += 1;
        }
    }

    async fn count(
        &self,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<u64> {
        Ok(apply(Self::Entity::find()).count(self.db()).await?)
    }

    async fn update<F>(&self, id: i64, apply: F) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let model = self.find_by_id(id).await?;

        let mut active = model.into_active_model();
        apply(&mut active);

        Ok(active.update(self.db()).await?)
    }

    async fn delete(&self, id: i64) -> DaoResult<i64> {
        let result = Self::Entity::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: Self::ENTITY_NAME,
                id,
            });
        }

        Ok(id)
    }
}
