use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Oid)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::Timestamp).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // One snapshot per header timestamp; conflicting inserts are skipped.
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_timestamp")
                    .table(Messages::Table)
                    .col(Messages::Timestamp)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReplacementPeriods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReplacementPeriods::Oid)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReplacementPeriods::RouteId).text())
                    .col(ColumnDef::new(ReplacementPeriods::End).timestamp_with_time_zone())
                    .col(ColumnDef::new(ReplacementPeriods::MessageId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_replacement_periods_message_id")
                            .from(ReplacementPeriods::Table, ReplacementPeriods::MessageId)
                            .to(Messages::Table, Messages::Oid),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alerts::Oid)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alerts::Start).timestamp_with_time_zone())
                    .col(ColumnDef::new(Alerts::End).timestamp_with_time_zone())
                    .col(ColumnDef::new(Alerts::Cause).text())
                    .col(ColumnDef::new(Alerts::Effect).text())
                    .col(ColumnDef::new(Alerts::Url).text())
                    .col(ColumnDef::new(Alerts::HeaderText).text())
                    .col(ColumnDef::new(Alerts::DescriptionText).text())
                    .col(ColumnDef::new(Alerts::MessageId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alerts_message_id")
                            .from(Alerts::Table, Alerts::MessageId)
                            .to(Messages::Table, Messages::Oid),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EntitySelectors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EntitySelectors::Oid)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EntitySelectors::AgencyId).text())
                    .col(ColumnDef::new(EntitySelectors::RouteId).text())
                    .col(ColumnDef::new(EntitySelectors::RouteType).integer())
                    .col(ColumnDef::new(EntitySelectors::StopId).text())
                    .col(ColumnDef::new(EntitySelectors::TripId).text())
                    .col(ColumnDef::new(EntitySelectors::TripRouteId).text())
                    .col(ColumnDef::new(EntitySelectors::TripStartTime).text())
                    .col(ColumnDef::new(EntitySelectors::TripStartDate).date())
                    .col(ColumnDef::new(EntitySelectors::AlertId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entity_selectors_alert_id")
                            .from(EntitySelectors::Table, EntitySelectors::AlertId)
                            .to(Alerts::Table, Alerts::Oid),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TripUpdates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TripUpdates::Oid)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TripUpdates::TripId).text())
                    .col(ColumnDef::new(TripUpdates::RouteId).text())
                    .col(ColumnDef::new(TripUpdates::TripStartTime).text())
                    .col(ColumnDef::new(TripUpdates::TripStartDate).date())
                    .col(ColumnDef::new(TripUpdates::ScheduleRelationship).text())
                    .col(ColumnDef::new(TripUpdates::VehicleId).text())
                    .col(ColumnDef::new(TripUpdates::VehicleLabel).text())
                    .col(ColumnDef::new(TripUpdates::VehicleLicensePlate).text())
                    .col(ColumnDef::new(TripUpdates::Timestamp).timestamp_with_time_zone())
                    .col(ColumnDef::new(TripUpdates::MessageId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_updates_message_id")
                            .from(TripUpdates::Table, TripUpdates::MessageId)
                            .to(Messages::Table, Messages::Oid),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StopTimeUpdates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StopTimeUpdates::Oid)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StopTimeUpdates::StopSequence).integer())
                    .col(ColumnDef::new(StopTimeUpdates::StopId).text())
                    .col(ColumnDef::new(StopTimeUpdates::ArrivalDelay).integer())
                    .col(ColumnDef::new(StopTimeUpdates::ArrivalTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(StopTimeUpdates::ArrivalUncertainty).integer())
                    .col(ColumnDef::new(StopTimeUpdates::DepartureDelay).integer())
                    .col(ColumnDef::new(StopTimeUpdates::DepartureTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(StopTimeUpdates::DepartureUncertainty).integer())
                    .col(ColumnDef::new(StopTimeUpdates::ScheduleRelationship).text())
                    .col(ColumnDef::new(StopTimeUpdates::TripUpdateId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stop_time_updates_trip_update_id")
                            .from(StopTimeUpdates::Table, StopTimeUpdates::TripUpdateId)
                            .to(TripUpdates::Table, TripUpdates::Oid),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehiclePositions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehiclePositions::Oid)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VehiclePositions::Timestamp).timestamp_with_time_zone())
                    .col(ColumnDef::new(VehiclePositions::TripId).text())
                    .col(ColumnDef::new(VehiclePositions::RouteId).text())
                    .col(ColumnDef::new(VehiclePositions::TripStartTime).text())
                    .col(ColumnDef::new(VehiclePositions::TripStartDate).date())
                    .col(ColumnDef::new(VehiclePositions::VehicleId).text())
                    .col(ColumnDef::new(VehiclePositions::VehicleLabel).text())
                    .col(ColumnDef::new(VehiclePositions::VehicleLicensePlate).text())
                    .col(ColumnDef::new(VehiclePositions::Latitude).double())
                    .col(ColumnDef::new(VehiclePositions::Longitude).double())
                    .col(ColumnDef::new(VehiclePositions::Bearing).double())
                    .col(ColumnDef::new(VehiclePositions::Speed).double())
                    .col(ColumnDef::new(VehiclePositions::StopId).text())
                    .col(ColumnDef::new(VehiclePositions::CurrentStopSequence).integer())
                    .col(ColumnDef::new(VehiclePositions::StopStatus).text())
                    .col(ColumnDef::new(VehiclePositions::OccupancyStatus).text())
                    .col(ColumnDef::new(VehiclePositions::CongestionLevel).text())
                    .to_owned(),
            )
            .await?;

        // Position snapshots are identified by when and which vehicle;
        // duplicate snapshots from re-ingested feeds are skipped.
        manager
            .create_index(
                Index::create()
                    .name("idx_vehicle_positions_timestamp_vehicle_id")
                    .table(VehiclePositions::Table)
                    .col(VehiclePositions::Timestamp)
                    .col(VehiclePositions::VehicleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Failures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Failures::Oid)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Failures::Source).text().not_null())
                    .col(ColumnDef::new(Failures::Error).text().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Failures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VehiclePositions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StopTimeUpdates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TripUpdates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EntitySelectors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReplacementPeriods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Oid,
    Timestamp,
}

#[derive(DeriveIden)]
enum ReplacementPeriods {
    Table,
    Oid,
    RouteId,
    End,
    MessageId,
}

#[derive(DeriveIden)]
enum Alerts {
    Table,
    Oid,
    Start,
    End,
    Cause,
    Effect,
    Url,
    HeaderText,
    DescriptionText,
    MessageId,
}

#[derive(DeriveIden)]
enum EntitySelectors {
    Table,
    Oid,
    AgencyId,
    RouteId,
    RouteType,
    StopId,
    TripId,
    TripRouteId,
    TripStartTime,
    TripStartDate,
    AlertId,
}

#[derive(DeriveIden)]
enum TripUpdates {
    Table,
    Oid,
    TripId,
    RouteId,
    TripStartTime,
    TripStartDate,
    ScheduleRelationship,
    VehicleId,
    VehicleLabel,
    VehicleLicensePlate,
    Timestamp,
    MessageId,
}

#[derive(DeriveIden)]
enum StopTimeUpdates {
    Table,
    Oid,
    StopSequence,
    StopId,
    ArrivalDelay,
    ArrivalTime,
    ArrivalUncertainty,
    DepartureDelay,
    DepartureTime,
    DepartureUncertainty,
    ScheduleRelationship,
    TripUpdateId,
}

#[derive(DeriveIden)]
enum VehiclePositions {
    Table,
    Oid,
    Timestamp,
    TripId,
    RouteId,
    TripStartTime,
    TripStartDate,
    VehicleId,
    VehicleLabel,
    VehicleLicensePlate,
    Latitude,
    Longitude,
    Bearing,
    Speed,
    StopId,
    CurrentStopSequence,
    StopStatus,
    OccupancyStatus,
    CongestionLevel,
}

#[derive(DeriveIden)]
enum Failures {
    Table,
    Oid,
    Source,
    Error,
}
