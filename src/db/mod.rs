use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

pub mod entities;
pub mod item_repo;
pub mod list_repo;

use entities::prelude::{Item, List};

/// Creates both tables from the entity definitions if they are not present.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut lists = schema.create_table_from_entity(List);
    lists.if_not_exists();
    db.execute(backend.build(&lists)).await?;

    let mut items = schema.create_table_from_entity(Item);
    items.if_not_exists();
    db.execute(backend.build(&items)).await?;

    Ok(())
}
