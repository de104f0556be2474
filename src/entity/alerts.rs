use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub oid: i64,
    /// First active period only; later periods are not archived.
    pub start: Option<DateTimeUtc>,
    pub end: Option<DateTimeUtc>,
    pub cause: Option<String>,
    pub effect: Option<String>,
    pub url: Option<String>,
    pub header_text: Option<String>,
    pub description_text: Option<String>,
    pub message_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entity_selectors::Entity")]
    EntitySelectors,
    #[sea_orm(
        belongs_to = "super::messages::Entity",
        from = "Column::MessageId",
        to = "super::messages::Column::Oid",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Messages,
}

impl Related<super::entity_selectors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntitySelectors.def()
    }
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
