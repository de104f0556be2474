use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "replacement_periods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub oid: i64,
    pub route_id: Option<String>,
    /// Replacement service runs from ingestion until this instant.
    pub end: Option<DateTimeUtc>,
    pub message_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::messages::Entity",
        from = "Column::MessageId",
        to = "super::messages::Column::Oid",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Messages,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
