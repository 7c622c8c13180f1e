use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, Set};

use super::{DaoBase, DaoLayerError, DaoResult, ListDao};
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todo;
    const ENTITY_NAME: &'static str = "Todo";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub id: Option<i64>,
    pub list_id: i64,
    pub text: String,
    /// Defaults to unchecked.
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub text: Option<String>,
    pub checked: Option<bool>,
    pub list_id: Option<i64>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.checked.is_none() && self.list_id.is_none()
    }
}

impl TodoDao {
    fn list_dao(&self) -> ListDao {
        ListDao::new(&self.db)
    }

    async fn require_list(&self, list_id: i64) -> DaoResult<()> {
        if self.list_dao().exists(list_id).await? {
            Ok(())
        } else {
            Err(missing_list(list_id))
        }
    }

    pub async fn create_todo(&self, new: NewTodo) -> DaoResult<todo::Model> {
        let NewTodo {
            id,
            list_id,
            text,
            checked,
        } = new;

        self.require_list(list_id).await?;

        let model = todo::ActiveModel {
            list_id: Set(list_id),
            text: Set(text),
            checked: Set(checked.unwrap_or(false)),
            ..Default::default()
        };
        self.create_with_id(id, model)
            .await
            .map_err(|err| reference_error(err, list_id))
    }

    pub async fn list_todos(&self, list_id: i64) -> DaoResult<Vec<todo::Model>> {
        self.find_all(move |query| query.filter(todo::Column::ListId.eq(list_id)))
            .await
    }

    pub async fn find_todo(&self, id: i64) -> DaoResult<todo::Model> {
        self.find_by_id(id).await
    }

    pub async fn update_todo(&self, id: i64, changes: TodoChanges) -> DaoResult<todo::Model> {
        let TodoChanges {
            text,
            checked,
            list_id,
        } = changes;

        if let Some(list_id) = list_id {
            self.require_list(list_id).await?;
        }

        self.update(id, move |active| {
            if let Some(text) = text {
                active.text = Set(text);
            }
            if let Some(checked) = checked {
                active.checked = Set(checked);
            }
            if let Some(list_id) = list_id {
                active.list_id = Set(list_id);
            }
        })
        .await
        .map_err(|err| match list_id {
            Some(list_id) => reference_error(err, list_id),
            None => err,
        })
    }

    pub async fn delete_todo(&self, id: i64) -> DaoResult<i64> {
        self.delete(id).await
    }

    pub async fn count_todos_by_list(&self, list_id: i64) -> DaoResult<u64> {
        self.count(move |query| query.filter(todo::Column::ListId.eq(list_id)))
            .await
    }
}

fn missing_list(list_id: i64) -> DaoLayerError {
    DaoLayerError::MissingReference {
        entity: ListDao::ENTITY_NAME,
        id: list_id,
    }
}

// The list can vanish between the existence check and the write.
fn reference_error(err: DaoLayerError, list_id: i64) -> DaoLayerError {
    if err.is_foreign_key_violation() {
        missing_list(list_id)
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use super::{NewTodo, TodoChanges, TodoDao};
    use crate::db::dao::{DaoBase, DaoLayerError};
    use crate::db::entities::{list, todo};

    fn list_model(id: i64) -> list::Model {
        list::Model {
            id,
            name: "Groceries".to_string(),
        }
    }

    fn todo_model(id: i64, list_id: i64, text: &str, checked: bool) -> todo::Model {
        todo::Model {
            id,
            text: text.to_string(),
            checked,
            list_id,
        }
    }

    #[tokio::test]
    async fn create_todo_fails_when_the_list_is_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<list::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao
            .create_todo(NewTodo {
                id: Some(2),
                list_id: 999,
                text: "Orphan".to_string(),
                checked: None,
            })
            .await
            .expect_err("orphan todo should be rejected");

        assert!(matches!(
            err,
            DaoLayerError::MissingReference {
                entity: "List",
                id: 999
            }
        ));
        assert_eq!(err.to_string(), "List 999 does not exist");
    }

    #[tokio::test]
    async fn create_todo_inserts_when_the_list_exists() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[list_model(1)]])
            .append_query_results([Vec::<todo::Model>::new()])
            .append_query_results([[todo_model(1, 1, "Milk", false)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let dao = TodoDao::new(&db);

        let todo = dao
            .create_todo(NewTodo {
                id: Some(1),
                list_id: 1,
                text: "Milk".to_string(),
                checked: None,
            })
            .await
            .expect("insert should succeed");

        assert_eq!(todo, todo_model(1, 1, "Milk", false));
    }

    #[tokio::test]
    async fn update_todo_checks_the_target_list() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<list::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao
            .update_todo(
                1,
                TodoChanges {
                    list_id: Some(999),
                    ..TodoChanges::default()
                },
            )
            .await
            .expect_err("moving to a missing list should fail");
        assert!(matches!(err, DaoLayerError::MissingReference { id: 999, .. }));
    }

    #[tokio::test]
    async fn update_todo_reports_missing_todos() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao
            .update_todo(
                3,
                TodoChanges {
                    checked: Some(true),
                    ..TodoChanges::default()
                },
            )
            .await
            .expect_err("todo should be missing");
        assert!(matches!(err, DaoLayerError::NotFound { entity: "Todo", id: 3 }));
    }

    #[tokio::test]
    async fn delete_todo_reports_missing_todos() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao.delete_todo(8).await.expect_err("todo should be missing");
        assert!(matches!(err, DaoLayerError::NotFound { id: 8, .. }));
    }

    #[tokio::test]
    async fn list_todos_returns_rows_for_the_list() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                todo_model(1, 4, "Milk", false),
                todo_model(2, 4, "Eggs", true),
            ]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let todos = dao.list_todos(4).await.expect("query should succeed");
        assert_eq!(
            todos.iter().map(|todo| todo.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn count_todos_by_list_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("count failed".to_string())])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao
            .count_todos_by_list(4)
            .await
            .expect_err("count should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }

    #[test]
    fn empty_changes_are_detected() {
        assert!(TodoChanges::default().is_empty());
        assert!(
            !TodoChanges {
                checked: Some(false),
                ..TodoChanges::default()
            }
            .is_empty()
        );
    }
}
