//! One row per ingested feed message; its generated id anchors every other
//! row written from the same message.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub oid: i64,
    /// Feed header timestamp; unique, so re-ingesting the same snapshot is a
    /// no-op.
    pub timestamp: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::alerts::Entity")]
    Alerts,
    #[sea_orm(has_many = "super::replacement_periods::Entity")]
    ReplacementPeriods,
    #[sea_orm(has_many = "super::trip_updates::Entity")]
    TripUpdates,
}

impl Related<super::alerts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alerts.def()
    }
}

impl Related<super::replacement_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReplacementPeriods.def()
    }
}

impl Related<super::trip_updates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripUpdates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
