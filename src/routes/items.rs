use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        entities::item::{self, ItemStatus},
        item_repo, list_repo,
    },
    error::AppError,
    state::AppState,
};

use super::{PageQuery, validate_description, validate_new_title, validate_title};

#[derive(Debug, Deserialize)]
pub struct NewTodoItem {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<DateTimeWithTimeZone>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoItem {
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<DateTimeWithTimeZone>,
    pub complete: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TodoItemResponse {
    pub id: i32,
    pub todo_list_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status_code: ItemStatus,
    pub due_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/lists/{list_id}/items",
            get(list_items).post(create_item),
        )
        .route(
            "/lists/{list_id}/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(state)
}

async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<TodoItemResponse>>, AppError> {
    let items = item_repo::list_items(&state.db, list_id, page.page, page.per_page).await?;
    Ok(Json(items.into_iter().map(TodoItemResponse::from).collect()))
}

async fn get_item(
    State(state): State<Arc<AppState>>,
    Path((list_id, item_id)): Path<(i32, i32)>,
) -> Result<Json<TodoItemResponse>, AppError> {
    let item = item_repo::find_item_by_id(&state.db, list_id, item_id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo item not found"))?;
    Ok(Json(item.into()))
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
    Json(body): Json<NewTodoItem>,
) -> Result<(StatusCode, Json<TodoItemResponse>), AppError> {
    require_list(&state, list_id).await?;
    validate_new_title(&body.title)?;
    if let Some(description) = body.description.as_deref() {
        validate_description(description)?;
    }
    let item =
        item_repo::create_item(&state.db, list_id, &body.title, body.description, body.due_at)
            .await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

async fn update_item(
    State(state): State<Arc<AppState>>,
    Path((list_id, item_id)): Path<(i32, i32)>,
    Json(body): Json<UpdateTodoItem>,
) -> Result<Json<TodoItemResponse>, AppError> {
    validate_title(&body.title)?;
    if let Some(description) = body.description.as_deref() {
        validate_description(description)?;
    }
    let item = item_repo::update_item(
        &state.db,
        list_id,
        item_id,
        body.title,
        body.description,
        body.due_at,
        body.complete,
    )
    .await?
    .ok_or_else(|| AppError::not_found("Todo item not found"))?;
    Ok(Json(item.into()))
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path((list_id, item_id)): Path<(i32, i32)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = item_repo::delete_item(&state.db, list_id, item_id).await?;
    if !deleted {
        return Err(AppError::not_found("Todo item not found"));
    }
    Ok(Json(serde_json::json!({})))
}

async fn require_list(state: &AppState, list_id: i32) -> Result<(), AppError> {
    list_repo::find_list_by_id(&state.db, list_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found("Todo list not found"))
}

impl From<item::Model> for TodoItemResponse {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            todo_list_id: model.todo_list_id,
            title: model.title,
            description: model.description,
            status_code: model.status_code,
            due_at: model.due_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
