use std::sync::Arc;

use axum::Router;
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

pub mod items;
pub mod lists;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(lists::router(state.clone()))
        .merge(items::router(state))
}

const TITLE_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 200;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    10
}

/// Create-time title check. An empty or missing title is reported as a
/// not-found outcome, matching the historical contract of this API.
fn validate_new_title(title: &str) -> Result<(), AppError> {
    if title.is_empty() {
        return Err(AppError::not_found("Title required"));
    }
    validate_title_length(title)
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.is_empty() {
        return Err(AppError::validation("Title must be 1 to 100 characters"));
    }
    validate_title_length(title)
}

fn validate_title_length(title: &str) -> Result<(), AppError> {
    if title.chars().count() > TITLE_MAX {
        return Err(AppError::validation("Title must be 1 to 100 characters"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(AppError::validation(
            "Description must be at most 200 characters",
        ));
    }
    Ok(())
}
