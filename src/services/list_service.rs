use crate::{
    db::dao::ListDao,
    db::entities::list,
    error::AppError,
    services::crud_service::{CrudOp, CrudService, normalize_required},
};

#[derive(Clone)]
pub struct ListService {
    list_dao: ListDao,
}

impl ListService {
    pub fn new(list_dao: ListDao) -> Self {
        Self { list_dao }
    }

    pub async fn create_list(&self, id: Option<i64>, name: &str) -> Result<list::Model, AppError> {
        let name = normalize_required(name, "Name")?;
        self.list_dao
            .create_list(id, name)
            .await
            .map_err(|err| self.map_error(CrudOp::Create, err))
    }

    pub async fn list_lists(&self) -> Result<Vec<list::Model>, AppError> {
        self.list_dao
            .list_lists()
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    pub async fn count_lists(&self) -> Result<u64, AppError> {
        self.list_dao
            .count_lists()
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    pub async fn rename_list(&self, list_id: i64, name: &str) -> Result<list::Model, AppError> {
        let name = normalize_required(name, "Name")?;
        self.list_dao
            .rename_list(list_id, name)
            .await
            .map_err(|err| self.map_error(CrudOp::Update, err))
    }

    /// Removes the list together with its todos.
    pub async fn delete_list(&self, list_id: i64) -> Result<(), AppError> {
        self.list_dao
            .delete_list(list_id)
            .await
            .map(|_| ())
            .map_err(|err| self.map_error(CrudOp::Delete, err))
    }
}

impl CrudService for ListService {}
