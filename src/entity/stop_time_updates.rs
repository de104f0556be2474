use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stop_time_updates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub oid: i64,
    pub stop_sequence: Option<i32>,
    pub stop_id: Option<String>,
    pub arrival_delay: Option<i32>,
    pub arrival_time: Option<DateTimeUtc>,
    pub arrival_uncertainty: Option<i32>,
    pub departure_delay: Option<i32>,
    pub departure_time: Option<DateTimeUtc>,
    pub departure_uncertainty: Option<i32>,
    pub schedule_relationship: Option<String>,
    pub trip_update_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trip_updates::Entity",
        from = "Column::TripUpdateId",
        to = "super::trip_updates::Column::Oid",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    TripUpdates,
}

impl Related<super::trip_updates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripUpdates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
