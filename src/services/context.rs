use sea_orm::DatabaseConnection;

use crate::{
    db::dao::DaoContext,
    services::{list_service::ListService, todo_service::TodoService},
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn list(&self) -> ListService {
        ListService::new(self.daos.list())
    }

    pub fn todo(&self) -> TodoService {
        TodoService::new(self.daos.todo(), self.daos.list())
    }
}
