//! Flattens decoded feed entities into insert-ready rows.
//!
//! One feed entity carries exactly one populated payload (vehicle position,
//! trip update or alert); which one is determined by a presence check, not a
//! discriminator field. Parent rows come back without their foreign keys set;
//! the writer threads the generated ids into the child rows after the parent
//! insert returns.
//!
//! Several wire fields overload zero as "not set" (position, speed, bearing,
//! delays, epoch timestamps). Zero maps to NULL across the board, accepting
//! that a legitimate zero-valued measurement is indistinguishable from an
//! unset one.

use sea_orm::ActiveValue::{NotSet, Set};

use crate::entity::{
    alerts, entity_selectors, replacement_periods, stop_time_updates, trip_updates,
    vehicle_positions,
};
use crate::enums::{
    map_enum_name, AlertCause, AlertEffect, CongestionLevel, OccupancyStatus, StopStatus,
    StopTimeSchedule, TripSchedule,
};
use crate::timestamps;
use crate::transit_realtime::{
    trip_update::StopTimeUpdate, Alert, EntitySelector, FeedHeader, TripDescriptor, TripUpdate,
    VehiclePosition,
};
use crate::translate;

/// Returns the payload when it is actually populated. Feeds occasionally emit
/// entities whose payload message is present but entirely default; those are
/// skipped rather than archived as all-NULL rows.
pub fn populated<T: Default + PartialEq>(payload: &Option<T>) -> Option<&T> {
    payload.as_ref().filter(|value| **value != T::default())
}

fn opt_text(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_owned)
}

fn nonzero_f64(value: f32) -> Option<f64> {
    (value != 0.0).then(|| f64::from(value))
}

fn nonzero_i32(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v != 0)
}

fn epoch_opt(value: Option<u64>) -> Option<sea_orm::prelude::DateTimeUtc> {
    timestamps::from_epoch(value.unwrap_or(0) as i64)
}

/// Trip descriptor fields shared by vehicle positions, trip updates and
/// entity selectors.
struct TripFields {
    trip_id: Option<String>,
    route_id: Option<String>,
    start_time: Option<String>,
    start_date: Option<chrono::NaiveDate>,
}

fn trip_fields(trip: Option<&TripDescriptor>) -> TripFields {
    TripFields {
        trip_id: trip.and_then(|t| opt_text(&t.trip_id)),
        route_id: trip.and_then(|t| opt_text(&t.route_id)),
        start_time: trip.and_then(|t| opt_text(&t.start_time)),
        start_date: trip
            .and_then(|t| t.start_date.as_deref())
            .and_then(timestamps::parse_start_date),
    }
}

/// One row per vehicle position snapshot.
pub fn vehicle_position_row(vp: &VehiclePosition) -> vehicle_positions::ActiveModel {
    let trip = trip_fields(vp.trip.as_ref());
    let vehicle = vp.vehicle.as_ref();
    let position = vp.position.as_ref();

    // Subway feeds leave the vehicle id blank and carry the train id in the
    // trip descriptor extension instead.
    let vehicle_id = vehicle.and_then(|v| opt_text(&v.id)).or_else(|| {
        vp.trip
            .as_ref()
            .and_then(|t| t.nyct_trip_descriptor.as_ref())
            .and_then(|nyct| opt_text(&nyct.train_id))
    });

    vehicle_positions::ActiveModel {
        oid: NotSet,
        timestamp: Set(epoch_opt(vp.timestamp)),
        trip_id: Set(trip.trip_id),
        route_id: Set(trip.route_id),
        trip_start_time: Set(trip.start_time),
        trip_start_date: Set(trip.start_date),
        vehicle_id: Set(vehicle_id),
        vehicle_label: Set(vehicle.and_then(|v| opt_text(&v.label))),
        vehicle_license_plate: Set(vehicle.and_then(|v| opt_text(&v.license_plate))),
        latitude: Set(position.and_then(|p| nonzero_f64(p.latitude))),
        longitude: Set(position.and_then(|p| nonzero_f64(p.longitude))),
        bearing: Set(position.and_then(|p| p.bearing.and_then(nonzero_f64))),
        speed: Set(position.and_then(|p| p.speed.and_then(nonzero_f64))),
        stop_id: Set(opt_text(&vp.stop_id)),
        current_stop_sequence: Set(vp.current_stop_sequence.map(|s| s as i32)),
        stop_status: Set(map_enum_name::<StopStatus>(
            vp.current_status
                .unwrap_or(StopStatus::InTransitTo as i32),
            None,
        )),
        occupancy_status: Set(vp
            .occupancy_status
            .and_then(|code| map_enum_name::<OccupancyStatus>(code, None))),
        congestion_level: Set(map_enum_name::<CongestionLevel>(
            vp.congestion_level
                .unwrap_or(CongestionLevel::UnknownCongestionLevel as i32),
            Some(CongestionLevel::UnknownCongestionLevel as i32),
        )),
    }
}

/// One parent row plus one child row per stop-time entry, in declaration
/// order (the order reflects stop sequence along the trip).
pub fn trip_update_rows(
    tu: &TripUpdate,
) -> (trip_updates::ActiveModel, Vec<stop_time_updates::ActiveModel>) {
    let trip = trip_fields(Some(&tu.trip));
    let vehicle = tu.vehicle.as_ref();

    let parent = trip_updates::ActiveModel {
        oid: NotSet,
        trip_id: Set(trip.trip_id),
        route_id: Set(trip.route_id),
        trip_start_time: Set(trip.start_time),
        trip_start_date: Set(trip.start_date),
        schedule_relationship: Set(map_enum_name::<TripSchedule>(
            tu.trip
                .schedule_relationship
                .unwrap_or(TripSchedule::Scheduled as i32),
            None,
        )),
        vehicle_id: Set(vehicle.and_then(|v| opt_text(&v.id))),
        vehicle_label: Set(vehicle.and_then(|v| opt_text(&v.label))),
        vehicle_license_plate: Set(vehicle.and_then(|v| opt_text(&v.license_plate))),
        timestamp: Set(epoch_opt(tu.timestamp)),
        message_id: NotSet,
    };

    let children = tu.stop_time_update.iter().map(stop_time_update_row).collect();

    (parent, children)
}

fn stop_time_update_row(stu: &StopTimeUpdate) -> stop_time_updates::ActiveModel {
    let arrival = stu.arrival.as_ref();
    let departure = stu.departure.as_ref();

    stop_time_updates::ActiveModel {
        oid: NotSet,
        stop_sequence: Set(stu.stop_sequence.map(|s| s as i32)),
        stop_id: Set(opt_text(&stu.stop_id)),
        arrival_delay: Set(arrival.and_then(|e| nonzero_i32(e.delay))),
        arrival_time: Set(arrival.and_then(|e| timestamps::from_epoch(e.time.unwrap_or(0)))),
        arrival_uncertainty: Set(arrival.and_then(|e| nonzero_i32(e.uncertainty))),
        departure_delay: Set(departure.and_then(|e| nonzero_i32(e.delay))),
        departure_time: Set(departure.and_then(|e| timestamps::from_epoch(e.time.unwrap_or(0)))),
        departure_uncertainty: Set(departure.and_then(|e| nonzero_i32(e.uncertainty))),
        schedule_relationship: Set(map_enum_name::<StopTimeSchedule>(
            stu.schedule_relationship
                .unwrap_or(StopTimeSchedule::NoData as i32),
            Some(StopTimeSchedule::NoData as i32),
        )),
        trip_update_id: NotSet,
    }
}

/// One parent row plus one child row per informed entity.
///
/// Only the first active period is archived. An alert without any active
/// period is skipped entirely, which is deliberate degradation rather than a
/// row with NULL start/end.
pub fn alert_rows(
    alert: &Alert,
) -> Option<(alerts::ActiveModel, Vec<entity_selectors::ActiveModel>)> {
    let period = alert.active_period.first()?;

    let parent = alerts::ActiveModel {
        oid: NotSet,
        start: Set(epoch_opt(period.start)),
        end: Set(epoch_opt(period.end)),
        cause: Set(map_enum_name::<AlertCause>(
            alert.cause.unwrap_or(AlertCause::UnknownCause as i32),
            None,
        )),
        effect: Set(map_enum_name::<AlertEffect>(
            alert.effect.unwrap_or(AlertEffect::UnknownEffect as i32),
            None,
        )),
        url: Set(translate::resolve_default(alert.url.as_ref())),
        header_text: Set(translate::resolve_default(alert.header_text.as_ref())),
        description_text: Set(translate::resolve_default(alert.description_text.as_ref())),
        message_id: NotSet,
    };

    let children = alert.informed_entity.iter().map(entity_selector_row).collect();

    Some((parent, children))
}

fn entity_selector_row(selector: &EntitySelector) -> entity_selectors::ActiveModel {
    let trip = trip_fields(selector.trip.as_ref());

    entity_selectors::ActiveModel {
        oid: NotSet,
        agency_id: Set(opt_text(&selector.agency_id)),
        route_id: Set(opt_text(&selector.route_id)),
        route_type: Set(selector.route_type),
        stop_id: Set(opt_text(&selector.stop_id)),
        trip_id: Set(trip.trip_id),
        trip_route_id: Set(trip.route_id),
        trip_start_time: Set(trip.start_time),
        trip_start_date: Set(trip.start_date),
        alert_id: NotSet,
    }
}

/// One row per subway replacement period carried in the feed header.
pub fn replacement_period_rows(header: &FeedHeader) -> Vec<replacement_periods::ActiveModel> {
    let Some(nyct) = header.nyct_feed_header.as_ref() else {
        return vec![];
    };

    nyct.trip_replacement_period
        .iter()
        .map(|period| replacement_periods::ActiveModel {
            oid: NotSet,
            route_id: Set(opt_text(&period.route_id)),
            end: Set(period
                .replacement_period
                .as_ref()
                .and_then(|range| epoch_opt(range.end))),
            message_id: NotSet,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transit_realtime::{
        trip_update::StopTimeEvent, NyctFeedHeader, NyctTripDescriptor, Position, TimeRange,
        TripReplacementPeriod, VehicleDescriptor,
    };

    fn descriptor(trip_id: &str) -> TripDescriptor {
        TripDescriptor {
            trip_id: Some(trip_id.to_owned()),
            route_id: Some("R1".to_owned()),
            start_time: None,
            start_date: Some("20240205".to_owned()),
            schedule_relationship: None,
            nyct_trip_descriptor: None,
        }
    }

    #[test]
    fn empty_payload_is_not_populated() {
        assert!(populated(&Some(VehiclePosition::default())).is_none());
        assert!(populated::<VehiclePosition>(&None).is_none());

        let vp = VehiclePosition {
            stop_id: Some("S1".to_owned()),
            ..Default::default()
        };
        assert!(populated(&Some(vp)).is_some());
    }

    #[test]
    fn zero_position_fields_become_null() {
        let vp = VehiclePosition {
            position: Some(Position {
                latitude: 0.0,
                longitude: 0.0,
                bearing: Some(0.0),
                odometer: None,
                speed: Some(0.0),
            }),
            ..Default::default()
        };

        let row = vehicle_position_row(&vp);
        assert_eq!(row.latitude, Set(None));
        assert_eq!(row.longitude, Set(None));
        assert_eq!(row.bearing, Set(None));
        assert_eq!(row.speed, Set(None));
    }

    #[test]
    fn vehicle_id_falls_back_to_train_id() {
        let vp = VehiclePosition {
            trip: Some(TripDescriptor {
                nyct_trip_descriptor: Some(NyctTripDescriptor {
                    train_id: Some("06 0123+ PEL/BBR".to_owned()),
                    is_assigned: Some(true),
                    direction: None,
                }),
                ..descriptor("T1")
            }),
            vehicle: Some(VehicleDescriptor {
                id: Some(String::new()),
                label: None,
                license_plate: None,
            }),
            ..Default::default()
        };

        let row = vehicle_position_row(&vp);
        assert_eq!(row.vehicle_id, Set(Some("06 0123+ PEL/BBR".to_owned())));
    }

    #[test]
    fn unset_vehicle_enums_use_protocol_defaults() {
        let row = vehicle_position_row(&VehiclePosition::default());
        assert_eq!(row.stop_status, Set(Some("IN_TRANSIT_TO".to_owned())));
        assert_eq!(
            row.congestion_level,
            Set(Some("UNKNOWN_CONGESTION_LEVEL".to_owned()))
        );
        assert_eq!(row.occupancy_status, Set(None));
    }

    #[test]
    fn stop_time_children_preserve_declaration_order() {
        let tu = TripUpdate {
            trip: descriptor("T1"),
            vehicle: None,
            stop_time_update: vec![
                StopTimeUpdate {
                    stop_sequence: Some(3),
                    stop_id: Some("A".to_owned()),
                    arrival: Some(StopTimeEvent {
                        delay: Some(60),
                        time: None,
                        uncertainty: Some(0),
                    }),
                    departure: None,
                    schedule_relationship: None,
                },
                StopTimeUpdate {
                    stop_sequence: Some(4),
                    stop_id: Some("B".to_owned()),
                    arrival: None,
                    departure: None,
                    schedule_relationship: Some(1),
                },
            ],
            timestamp: Some(100),
        };

        let (parent, children) = trip_update_rows(&tu);
        assert_eq!(parent.trip_id, Set(Some("T1".to_owned())));
        assert_eq!(
            parent.schedule_relationship,
            Set(Some("SCHEDULED".to_owned()))
        );
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].stop_sequence, Set(Some(3)));
        assert_eq!(children[0].arrival_delay, Set(Some(60)));
        // uncertainty of zero is indistinguishable from unset
        assert_eq!(children[0].arrival_uncertainty, Set(None));
        assert_eq!(
            children[0].schedule_relationship,
            Set(Some("NO_DATA".to_owned()))
        );
        assert_eq!(children[1].stop_sequence, Set(Some(4)));
        assert_eq!(
            children[1].schedule_relationship,
            Set(Some("SKIPPED".to_owned()))
        );
    }

    #[test]
    fn alert_without_active_period_produces_no_rows() {
        let alert = Alert {
            cause: Some(3),
            ..Default::default()
        };
        assert!(alert_rows(&alert).is_none());
    }

    #[test]
    fn alert_keeps_first_active_period_only() {
        let alert = Alert {
            active_period: vec![
                TimeRange {
                    start: Some(100),
                    end: Some(200),
                },
                TimeRange {
                    start: Some(300),
                    end: Some(400),
                },
            ],
            informed_entity: vec![
                EntitySelector {
                    route_id: Some("R1".to_owned()),
                    ..Default::default()
                },
                EntitySelector {
                    stop_id: Some("S1".to_owned()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let (parent, children) = alert_rows(&alert).unwrap();
        assert_eq!(
            parent.start,
            Set(timestamps::from_epoch(100))
        );
        assert_eq!(parent.end, Set(timestamps::from_epoch(200)));
        // Unset cause/effect fall back to the protocol defaults.
        assert_eq!(parent.cause, Set(Some("UNKNOWN_CAUSE".to_owned())));
        assert_eq!(parent.effect, Set(Some("UNKNOWN_EFFECT".to_owned())));
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].route_id, Set(Some("R1".to_owned())));
        assert_eq!(children[1].stop_id, Set(Some("S1".to_owned())));
    }

    #[test]
    fn replacement_periods_flatten_from_the_header_extension() {
        let header = FeedHeader {
            gtfs_realtime_version: "1.0".to_owned(),
            incrementality: None,
            timestamp: Some(1_700_000_000),
            nyct_feed_header: Some(NyctFeedHeader {
                nyct_subway_version: Some("1.0".to_owned()),
                trip_replacement_period: vec![TripReplacementPeriod {
                    route_id: Some("A".to_owned()),
                    replacement_period: Some(TimeRange {
                        start: None,
                        end: Some(1_700_001_000),
                    }),
                }],
            }),
        };

        let rows = replacement_period_rows(&header);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].route_id, Set(Some("A".to_owned())));
        assert_eq!(rows[0].end, Set(timestamps::from_epoch(1_700_001_000)));

        let plain = FeedHeader {
            nyct_feed_header: None,
            ..header
        };
        assert!(replacement_period_rows(&plain).is_empty());
    }
}
