use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trip_updates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub oid: i64,
    pub trip_id: Option<String>,
    pub route_id: Option<String>,
    pub trip_start_time: Option<String>,
    pub trip_start_date: Option<Date>,
    pub schedule_relationship: Option<String>,
    pub vehicle_id: Option<String>,
    pub vehicle_label: Option<String>,
    pub vehicle_license_plate: Option<String>,
    pub timestamp: Option<DateTimeUtc>,
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
    #[sea_orm(has_many = "super::stop_time_updates::Entity")]
    StopTimeUpdates,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl Related<super::stop_time_updates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StopTimeUpdates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
