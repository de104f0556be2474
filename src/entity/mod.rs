pub mod prelude;

pub mod alerts;
pub mod entity_selectors;
pub mod failures;
pub mod messages;
pub mod replacement_periods;
pub mod stop_time_updates;
pub mod trip_updates;
pub mod vehicle_positions;
