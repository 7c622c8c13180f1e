use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::dao::{NewTodo, TodoChanges},
    db::entities::todo,
    response::{ApiResult, JsonApiResponse},
    routes::api::lists::CountResponse,
    services::{ServiceContext, todo_service::TodoService},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub id: Option<i64>,
    pub text: String,
    pub checked: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub text: Option<String>,
    pub checked: Option<bool>,
    pub list_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub text: String,
    pub checked: bool,
    pub list_id: i64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lists/{list_id}/todos", get(list_todos).post(create_todo))
        .route("/lists/{list_id}/todos/count", get(count_todos))
        .route(
            "/todos/{todo_id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> ApiResult<Vec<TodoResponse>> {
    let todos = todo_service(&state).list_todos(list_id).await?;
    JsonApiResponse::ok(todos.into_iter().map(TodoResponse::from).collect())
}

async fn count_todos(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> ApiResult<CountResponse> {
    let count = todo_service(&state).count_todos_by_list(list_id).await?;
    JsonApiResponse::ok(CountResponse { count })
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
    Json(body): Json<CreateTodoRequest>,
) -> ApiResult<TodoResponse> {
    let todo = todo_service(&state)
        .create_todo(NewTodo {
            id: body.id,
            list_id,
            text: body.text,
            checked: body.checked,
        })
        .await?;
    tracing::debug!(todo_id = todo.id, list_id, "created todo");
    JsonApiResponse::created(todo.into())
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<i64>,
) -> ApiResult<TodoResponse> {
    let todo = todo_service(&state).find_todo(todo_id).await?;
    JsonApiResponse::ok(todo.into())
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<i64>,
    Json(body): Json<UpdateTodoRequest>,
) -> ApiResult<TodoResponse> {
    let UpdateTodoRequest {
        text,
        checked,
        list_id,
    } = body;
    let todo = todo_service(&state)
        .update_todo(
            todo_id,
            TodoChanges {
                text,
                checked,
                list_id,
            },
        )
        .await?;
    JsonApiResponse::ok(todo.into())
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<i64>,
) -> ApiResult<()> {
    todo_service(&state).delete_todo(todo_id).await?;
    JsonApiResponse::deleted()
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            checked: model.checked,
            list_id: model.list_id,
        }
    }
}

fn todo_service(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
