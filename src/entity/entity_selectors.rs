use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entity_selectors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub oid: i64,
    pub agency_id: Option<String>,
    pub route_id: Option<String>,
    pub route_type: Option<i32>,
    pub stop_id: Option<String>,
    pub trip_id: Option<String>,
    pub trip_route_id: Option<String>,
    pub trip_start_time: Option<String>,
    pub trip_start_date: Option<Date>,
    pub alert_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::alerts::Entity",
        from = "Column::AlertId",
        to = "super::alerts::Column::Oid",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Alerts,
}

impl Related<super::alerts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alerts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
