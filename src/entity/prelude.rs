pub use super::alerts::Entity as Alerts;
pub use super::entity_selectors::Entity as EntitySelectors;
pub use super::failures::Entity as Failures;
pub use super::messages::Entity as Messages;
pub use super::replacement_periods::Entity as ReplacementPeriods;
pub use super::stop_time_updates::Entity as StopTimeUpdates;
pub use super::trip_updates::Entity as TripUpdates;
pub use super::vehicle_positions::Entity as VehiclePositions;
