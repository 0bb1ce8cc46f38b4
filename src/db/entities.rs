#[allow(unused_imports)]
pub mod prelude {
    pub use super::item::Entity as Item;
    pub use super::list::Entity as List;
}

pub mod list {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "todo_lists")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub title: String,
        pub description: Option<String>,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::item::Entity")]
        Item,
    }

    impl Related<super::item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Item.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod item {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    /// Completion state of an item, persisted as its wire string.
    #[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
    #[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ItemStatus {
        #[sea_orm(string_value = "NOT_COMPLETED")]
        NotCompleted,
        #[sea_orm(string_value = "COMPLETED")]
        Completed,
    }

    impl ItemStatus {
        pub fn from_complete(complete: bool) -> Self {
            if complete {
                Self::Completed
            } else {
                Self::NotCompleted
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "todo_items")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(indexed)]
        pub todo_list_id: i32,
        pub title: String,
        pub description: Option<String>,
        pub status_code: ItemStatus,
        pub due_at: Option<DateTimeWithTimeZone>,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::list::Entity",
            from = "Column::TodoListId",
            to = "super::list::Column::Id",
            on_delete = "Cascade"
        )]
        List,
    }

    impl Related<super::list::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::List.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
