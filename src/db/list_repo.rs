use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::entities::prelude::{Item, List};
use super::entities::{item, list};

/// Lists are returned in insertion order. `page` is 1-indexed; a page of 0
/// saturates to the first page. Out-of-range pages come back empty.
pub async fn list_lists(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> Result<Vec<list::Model>, sea_orm::DbErr> {
    let offset = page.saturating_sub(1).saturating_mul(per_page);
    List::find()
        .order_by_asc(list::Column::Id)
        .offset(offset)
        .limit(per_page)
        .all(db)
        .await
}

pub async fn find_list_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<list::Model>, sea_orm::DbErr> {
    List::find_by_id(id).one(db).await
}

pub async fn create_list(
    db: &DatabaseConnection,
    title: &str,
    description: Option<String>,
) -> Result<list::Model, sea_orm::DbErr> {
    let now = Utc::now().fixed_offset();
    let model = list::ActiveModel {
        title: Set(title.to_string()),
        description: Set(description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await
}

/// Partial update: only supplied fields overwrite the stored row.
pub async fn update_list(
    db: &DatabaseConnection,
    id: i32,
    title: Option<String>,
    description: Option<String>,
) -> Result<Option<list::Model>, sea_orm::DbErr> {
    let Some(existing) = List::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut active: list::ActiveModel = existing.into();
    if let Some(title) = title {
        active.title = Set(title);
    }
    if let Some(description) = description {
        active.description = Set(Some(description));
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Some(active.update(db).await?))
}

/// Deletes the list and every item it owns. Items go first so no orphan
/// rows survive on backends that do not enforce the foreign key.
pub async fn delete_list(db: &DatabaseConnection, id: i32) -> Result<bool, sea_orm::DbErr> {
    Item::delete_many()
        .filter(item::Column::TodoListId.eq(id))
        .exec(db)
        .await?;
    let result = List::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
