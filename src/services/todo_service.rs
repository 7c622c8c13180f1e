use crate::{
    db::dao::{ListDao, NewTodo, TodoChanges, TodoDao},
    db::entities::{list, todo},
    error::AppError,
    services::crud_service::{CrudErrors, CrudOp, CrudService, normalize_required},
};

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
    list_dao: ListDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao, list_dao: ListDao) -> Self {
        Self { todo_dao, list_dao }
    }

    pub async fn create_todo(&self, new: NewTodo) -> Result<todo::Model, AppError> {
        let text = normalize_required(&new.text, "Text")?.to_string();
        self.todo_dao
            .create_todo(NewTodo { text, ..new })
            .await
            .map_err(|err| self.map_error(CrudOp::Create, err))
    }

    /// Todos of an existing list, by ascending id. A missing list is a not-found error.
    pub async fn list_todos(&self, list_id: i64) -> Result<Vec<todo::Model>, AppError> {
        let (_, todos) = self.list_with_todos(list_id).await?;
        Ok(todos)
    }

    pub async fn list_with_todos(
        &self,
        list_id: i64,
    ) -> Result<(list::Model, Vec<todo::Model>), AppError> {
        let list = self
            .list_dao
            .find_list(list_id)
            .await
            .map_err(|err| self.map_error(CrudOp::Find, err))?;
        let todos = self
            .todo_dao
            .list_todos(list_id)
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))?;
        Ok((list, todos))
    }

    pub async fn count_todos_by_list(&self, list_id: i64) -> Result<u64, AppError> {
        self.todo_dao
            .count_todos_by_list(list_id)
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    pub async fn find_todo(&self, todo_id: i64) -> Result<todo::Model, AppError> {
        self.todo_dao
            .find_todo(todo_id)
            .await
            .map_err(|err| self.map_error(CrudOp::Find, err))
    }

    pub async fn update_todo(
        &self,
        todo_id: i64,
        changes: TodoChanges,
    ) -> Result<todo::Model, AppError> {
        if changes.is_empty() {
            return Err(AppError::bad_request("Text, checked or list_id required"));
        }
        let text = match changes.text.as_deref() {
            Some(value) => Some(normalize_required(value, "Text")?.to_string()),
            None => None,
        };

        self.todo_dao
            .update_todo(todo_id, TodoChanges { text, ..changes })
            .await
            .map_err(|err| self.map_error(CrudOp::Update, err))
    }

    pub async fn set_checked(&self, todo_id: i64, checked: bool) -> Result<todo::Model, AppError> {
        self.update_todo(
            todo_id,
            TodoChanges {
                checked: Some(checked),
                ..TodoChanges::default()
            },
        )
        .await
    }

    pub async fn delete_todo(&self, todo_id: i64) -> Result<(), AppError> {
        self.todo_dao
            .delete_todo(todo_id)
            .await
            .map(|_| ())
            .map_err(|err| self.map_error(CrudOp::Delete, err))
    }
}

impl CrudService for TodoService {
    fn errors(&self) -> CrudErrors {
        CrudErrors {
            create_failed: "Failed to create todo",
            update_failed: "Failed to update todo",
            ..CrudErrors::default()
        }
    }
}
