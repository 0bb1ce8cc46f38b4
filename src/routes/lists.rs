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
    db::{entities::list, list_repo},
    error::AppError,
    state::AppState,
};

use super::{PageQuery, validate_description, validate_new_title, validate_title};

#[derive(Debug, Deserialize)]
pub struct NewTodoList {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoList {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/{list_id}",
            get(get_list).put(update_list).delete(delete_list),
        )
        .with_state(state)
}

async fn list_lists(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<TodoListResponse>>, AppError> {
    let lists = list_repo::list_lists(&state.db, page.page, page.per_page).await?;
    Ok(Json(lists.into_iter().map(TodoListResponse::from).collect()))
}

async fn get_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
) -> Result<Json<TodoListResponse>, AppError> {
    let list = list_repo::find_list_by_id(&state.db, list_id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo list not found"))?;
    Ok(Json(list.into()))
}

async fn create_list(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewTodoList>,
) -> Result<(StatusCode, Json<TodoListResponse>), AppError> {
    validate_new_title(&body.title)?;
    if let Some(description) = body.description.as_deref() {
        validate_description(description)?;
    }
    let list = list_repo::create_list(&state.db, &body.title, body.description).await?;
    Ok((StatusCode::CREATED, Json(list.into())))
}

async fn update_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
    Json(body): Json<UpdateTodoList>,
) -> Result<Json<TodoListResponse>, AppError> {
    if let Some(title) = body.title.as_deref() {
        validate_title(title)?;
    }
    if let Some(description) = body.description.as_deref() {
        validate_description(description)?;
    }
    let list = list_repo::update_list(&state.db, list_id, body.title, body.description)
        .await?
        .ok_or_else(|| AppError::not_found("Todo list not found"))?;
    Ok(Json(list.into()))
}

async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = list_repo::delete_list(&state.db, list_id).await?;
    if !deleted {
        return Err(AppError::not_found("Todo list not found"));
    }
    Ok(Json(serde_json::json!({})))
}

impl From<list::Model> for TodoListResponse {
    fn from(model: list::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
