use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
    prelude::DateTimeWithTimeZone,
};

use super::entities::item::{self, ItemStatus};
use super::entities::prelude::Item;

pub async fn list_items(
    db: &DatabaseConnection,
    list_id: i32,
    page: u64,
    per_page: u64,
) -> Result<Vec<item::Model>, sea_orm::DbErr> {
    let offset = page.saturating_sub(1).saturating_mul(per_page);
    Item::find()
        .filter(item::Column::TodoListId.eq(list_id))
        .order_by_asc(item::Column::Id)
        .offset(offset)
        .limit(per_page)
        .all(db)
        .await
}

/// Both conditions are required: the item id and the owning list id.
pub async fn find_item_by_id(
    db: &DatabaseConnection,
    list_id: i32,
    item_id: i32,
) -> Result<Option<item::Model>, sea_orm::DbErr> {
    Item::find()
        .filter(item::Column::Id.eq(item_id))
        .filter(item::Column::TodoListId.eq(list_id))
        .one(db)
        .await
}

pub async fn create_item(
    db: &DatabaseConnection,
    list_id: i32,
    title: &str,
    description: Option<String>,
    due_at: Option<DateTimeWithTimeZone>,
) -> Result<item::Model, sea_orm::DbErr> {
    let now = Utc::now().fixed_offset();
    let model = item::ActiveModel {
        todo_list_id: Set(list_id),
        title: Set(title.to_string()),
        description: Set(description),
        status_code: Set(ItemStatus::NotCompleted),
        due_at: Set(due_at),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await
}

/// Full overwrite: title, description and due_at always replace the stored
/// values, and the status is recomputed from the `complete` flag (absent
/// counts as not completed). Contrast with the partial list update.
pub async fn update_item(
    db: &DatabaseConnection,
    list_id: i32,
    item_id: i32,
    title: String,
    description: Option<String>,
    due_at: Option<DateTimeWithTimeZone>,
    complete: Option<bool>,
) -> Result<Option<item::Model>, sea_orm::DbErr> {
    let Some(existing) = find_item_by_id(db, list_id, item_id).await? else {
        return Ok(None);
    };
    let mut active: item::ActiveModel = existing.into();
    active.title = Set(title);
    active.description = Set(description);
    active.due_at = Set(due_at);
    active.status_code = Set(ItemStatus::from_complete(complete.unwrap_or(false)));
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Some(active.update(db).await?))
}

pub async fn delete_item(
    db: &DatabaseConnection,
    list_id: i32,
    item_id: i32,
) -> Result<bool, sea_orm::DbErr> {
    let Some(existing) = find_item_by_id(db, list_id, item_id).await? else {
        return Ok(false);
    };
    let result = Item::delete_by_id(existing.id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
