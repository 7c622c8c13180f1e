use sea_orm::DatabaseConnection;

use super::{DaoBase, ListDao, TodoDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn list(&self) -> ListDao {
        ListDao::new(&self.db)
    }

    pub fn todo(&self) -> TodoDao {
        TodoDao::new(&self.db)
    }
}
