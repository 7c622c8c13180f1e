use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::entities::list,
    response::{ApiResult, JsonApiResponse},
    routes::api::todos::TodoResponse,
    services::{ServiceContext, list_service::ListService},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateListRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ListDetailResponse {
    pub list: ListResponse,
    pub todos: Vec<TodoResponse>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route("/lists/count", get(count_lists))
        .route(
            "/lists/{list_id}",
            get(get_list).patch(update_list).delete(delete_list),
        )
        .with_state(state)
}

async fn list_lists(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ListResponse>> {
    let lists = list_service(&state).list_lists().await?;
    JsonApiResponse::ok(lists.into_iter().map(ListResponse::from).collect())
}

async fn count_lists(State(state): State<Arc<AppState>>) -> ApiResult<CountResponse> {
    let count = list_service(&state).count_lists().await?;
    JsonApiResponse::ok(CountResponse { count })
}

async fn create_list(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateListRequest>,
) -> ApiResult<ListResponse> {
    let list = list_service(&state).create_list(body.id, &body.name).await?;
    tracing::debug!(list_id = list.id, "created list");
    JsonApiResponse::created(list.into())
}

async fn get_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> ApiResult<ListDetailResponse> {
    let (list, todos) = ServiceContext::from_state(state.as_ref())
        .todo()
        .list_with_todos(list_id)
        .await?;
    JsonApiResponse::ok(ListDetailResponse {
        list: list.into(),
        todos: todos.into_iter().map(TodoResponse::from).collect(),
    })
}

async fn update_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
    Json(body): Json<UpdateListRequest>,
) -> ApiResult<ListResponse> {
    let list = list_service(&state).rename_list(list_id, &body.name).await?;
    JsonApiResponse::ok(list.into())
}

async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i64>,
) -> ApiResult<()> {
    list_service(&state).delete_list(list_id).await?;
    JsonApiResponse::deleted()
}

impl From<list::Model> for ListResponse {
    fn from(model: list::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

fn list_service(state: &AppState) -> ListService {
    ServiceContext::from_state(state).list()
}
