//! Writes decoded feed messages to the database.
//!
//! One transaction per feed message: header row first (its generated id links
//! everything else), then alerts, trip updates and vehicle positions. Alerts
//! and trip updates obtain their generated ids one by one so their children
//! can reference them; vehicle positions have no children and go in as a
//! single batch. A database error rolls the whole message back and surfaces
//! to the caller; undecodable or empty feeds are recorded in `failures`
//! instead and do not abort the run.

use sea_orm::sea_query::OnConflict;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionTrait,
};

use crate::decode;
use crate::entity::prelude::*;
use crate::entity::{failures, messages, vehicle_positions};
use crate::error::Result;
use crate::flatten;
use crate::timestamps;
use crate::transit_realtime::FeedMessage;

/// Which entity kinds to extract from a feed message. Feeds are usually
/// published per kind, so callers enable the kind matching the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntityKinds {
    pub alerts: bool,
    pub trip_updates: bool,
    pub vehicle_positions: bool,
}

impl EntityKinds {
    pub fn all() -> Self {
        Self {
            alerts: true,
            trip_updates: true,
            vehicle_positions: true,
        }
    }

    pub fn only_alerts() -> Self {
        Self {
            alerts: true,
            ..Self::default()
        }
    }

    pub fn only_trip_updates() -> Self {
        Self {
            trip_updates: true,
            ..Self::default()
        }
    }

    pub fn only_vehicle_positions() -> Self {
        Self {
            vehicle_positions: true,
            ..Self::default()
        }
    }
}

/// Row counts committed for one feed message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub replacement_periods: u64,
    pub alerts: u64,
    pub entity_selectors: u64,
    pub trip_updates: u64,
    pub stop_time_updates: u64,
    pub vehicle_positions: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Rows committed under a fresh message id.
    Written {
        message_id: i64,
        stats: IngestStats,
    },
    /// The header timestamp matched an already archived snapshot; nothing
    /// was written.
    AlreadyArchived,
    /// The bytes could not be decoded, or decoded to an empty message; a
    /// failure record was written instead of rows.
    Failed { error: String },
}

/// Ingests one feed snapshot: decode, flatten, commit.
///
/// Decode failures and empty messages are recorded in `failures` and
/// reported through the outcome; only storage errors return `Err`.
pub async fn ingest(
    db: &DatabaseConnection,
    bytes: &[u8],
    source: &str,
    kinds: EntityKinds,
) -> Result<IngestOutcome> {
    let feed = match decode::decode_feed(bytes, source) {
        Ok(feed) => feed,
        Err(err) => {
            let error = err.to_string();
            record_failure(db, source, &error).await?;
            return Ok(IngestOutcome::Failed { error });
        }
    };

    if feed.entity.is_empty() {
        let error = "empty feed message".to_owned();
        record_failure(db, source, &error).await?;
        return Ok(IngestOutcome::Failed { error });
    }

    write_feed(db, &feed, kinds).await
}

/// Records a feed snapshot that could not be ingested. Written outside the
/// message transaction, which never opened.
pub async fn record_failure(
    db: &DatabaseConnection,
    source: &str,
    error: &str,
) -> Result<failures::Model> {
    log::warn!("recording ingestion failure for {}: {}", source, error);

    let row = failures::ActiveModel {
        oid: NotSet,
        source: Set(source.to_owned()),
        error: Set(error.to_owned()),
    };

    Ok(Failures::insert(row).exec_with_returning(db).await?)
}

async fn write_feed(
    db: &DatabaseConnection,
    feed: &FeedMessage,
    kinds: EntityKinds,
) -> Result<IngestOutcome> {
    let tx = db.begin().await?;
    let mut stats = IngestStats::default();

    let header_timestamp = timestamps::from_epoch(feed.header.timestamp.unwrap_or(0) as i64);

    // Check up front whether this snapshot is already archived, so the
    // entity inserts are not attempted at all.
    if let Some(ts) = header_timestamp {
        let existing = Messages::find()
            .filter(messages::Column::Timestamp.eq(ts))
            .one(&tx)
            .await?;
        if existing.is_some() {
            tx.commit().await?;
            return Ok(IngestOutcome::AlreadyArchived);
        }
    }

    let header_row = messages::ActiveModel {
        oid: NotSet,
        timestamp: Set(header_timestamp),
    };

    let message = match Messages::insert(header_row)
        .on_conflict(
            OnConflict::column(messages::Column::Timestamp)
                .do_nothing()
                .to_owned(),
        )
        .exec_with_returning(&tx)
        .await
    {
        Ok(message) => message,
        Err(DbErr::RecordNotInserted) => {
            tx.commit().await?;
            return Ok(IngestOutcome::AlreadyArchived);
        }
        Err(err) => return Err(err.into()),
    };

    let mut periods = flatten::replacement_period_rows(&feed.header);
    if !periods.is_empty() {
        for row in &mut periods {
            row.message_id = Set(Some(message.oid));
        }
        stats.replacement_periods = periods.len() as u64;
        ReplacementPeriods::insert_many(periods).exec(&tx).await?;
    }

    if kinds.alerts {
        for entity in &feed.entity {
            let Some(alert) = flatten::populated(&entity.alert) else {
                continue;
            };
            let Some((mut parent, mut children)) = flatten::alert_rows(alert) else {
                log::debug!("skipping alert without active period ({})", entity.id);
                continue;
            };

            parent.message_id = Set(Some(message.oid));
            let inserted = Alerts::insert(parent).exec_with_returning(&tx).await?;
            stats.alerts += 1;

            if !children.is_empty() {
                for row in &mut children {
                    row.alert_id = Set(Some(inserted.oid));
                }
                stats.entity_selectors += children.len() as u64;
                EntitySelectors::insert_many(children).exec(&tx).await?;
            }
        }
    }

    if kinds.trip_updates {
        for entity in &feed.entity {
            let Some(trip_update) = flatten::populated(&entity.trip_update) else {
                continue;
            };
            let (mut parent, mut children) = flatten::trip_update_rows(trip_update);

            parent.message_id = Set(Some(message.oid));
            let inserted = TripUpdates::insert(parent).exec_with_returning(&tx).await?;
            stats.trip_updates += 1;

            if !children.is_empty() {
                for row in &mut children {
                    row.trip_update_id = Set(Some(inserted.oid));
                }
                stats.stop_time_updates += children.len() as u64;
                StopTimeUpdates::insert_many(children).exec(&tx).await?;
            }
        }
    }

    if kinds.vehicle_positions {
        let rows: Vec<_> = feed
            .entity
            .iter()
            .filter_map(|entity| flatten::populated(&entity.vehicle))
            .map(flatten::vehicle_position_row)
            .collect();

        if !rows.is_empty() {
            stats.vehicle_positions = rows.len() as u64;
            let insert = VehiclePositions::insert_many(rows).on_conflict(
                OnConflict::columns([
                    vehicle_positions::Column::Timestamp,
                    vehicle_positions::Column::VehicleId,
                ])
                .do_nothing()
                .to_owned(),
            );
            match insert.exec(&tx).await {
                Ok(_) => {}
                // every snapshot in the batch was already archived
                Err(DbErr::RecordNotInserted) => stats.vehicle_positions = 0,
                Err(err) => return Err(err.into()),
            }
        }
    }

    tx.commit().await?;

    Ok(IngestOutcome::Written {
        message_id: message.oid,
        stats,
    })
}
