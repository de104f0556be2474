//! Point-in-time vehicle snapshots. Rows are never updated in place; identity
//! at the storage layer is the unique (timestamp, vehicle_id) pair.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle_positions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub oid: i64,
    pub timestamp: Option<DateTimeUtc>,
    pub trip_id: Option<String>,
    pub route_id: Option<String>,
    pub trip_start_time: Option<String>,
    pub trip_start_date: Option<Date>,
    pub vehicle_id: Option<String>,
    pub vehicle_label: Option<String>,
    pub vehicle_license_plate: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bearing: Option<f64>,
    pub speed: Option<f64>,
    pub stop_id: Option<String>,
    pub current_stop_sequence: Option<i32>,
    pub stop_status: Option<String>,
    pub occupancy_status: Option<String>,
    pub congestion_level: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
