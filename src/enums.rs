//! Closed enum domains for the protocol's small integer codes.
//!
//! Each domain maps raw codes to the names stored in the database. The sets
//! are deliberately closed: codes the archive schema does not know (including
//! newer protocol additions) resolve through the fallback path instead of
//! failing, which is the protocol's expectation for forward compatibility.

pub trait EnumDomain: Sized + Copy {
    fn from_code(code: i32) -> Option<Self>;
    fn name(self) -> &'static str;
}

macro_rules! enum_domain {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:literal => $label:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant = $code,)+
        }

        impl EnumDomain for $name {
            fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }
    };
}

/// Maps a raw protocol code into `T`, trying `fallback` when the code is not
/// a member of the domain. Returns `None` when neither resolves; unknown
/// codes are never an error.
pub fn map_enum<T: EnumDomain>(code: i32, fallback: Option<i32>) -> Option<T> {
    T::from_code(code).or_else(|| fallback.and_then(T::from_code))
}

/// Like [`map_enum`], yielding the stored column value.
pub fn map_enum_name<T: EnumDomain>(code: i32, fallback: Option<i32>) -> Option<String> {
    map_enum::<T>(code, fallback).map(|v| v.name().to_owned())
}

enum_domain!(OccupancyStatus {
    Empty = 0 => "EMPTY",
    ManySeatsAvailable = 1 => "MANY_SEATS_AVAILABLE",
    FewSeatsAvailable = 2 => "FEW_SEATS_AVAILABLE",
    StandingRoomOnly = 3 => "STANDING_ROOM_ONLY",
    CrushedStandingRoomOnly = 4 => "CRUSHED_STANDING_ROOM_ONLY",
    Full = 5 => "FULL",
    NotAcceptingPassengers = 6 => "NOT_ACCEPTING_PASSENGERS",
});

enum_domain!(CongestionLevel {
    UnknownCongestionLevel = 0 => "UNKNOWN_CONGESTION_LEVEL",
    RunningSmoothly = 1 => "RUNNING_SMOOTHLY",
    StopAndGo = 2 => "STOP_AND_GO",
    Congestion = 3 => "CONGESTION",
});

enum_domain!(StopTimeSchedule {
    Scheduled = 0 => "SCHEDULED",
    Skipped = 1 => "SKIPPED",
    NoData = 2 => "NO_DATA",
});

enum_domain!(TripSchedule {
    Scheduled = 0 => "SCHEDULED",
    Added = 1 => "ADDED",
    Unscheduled = 2 => "UNSCHEDULED",
    Canceled = 3 => "CANCELED",
});

enum_domain!(AlertCause {
    UnknownCause = 1 => "UNKNOWN_CAUSE",
    TechnicalProblem = 3 => "TECHNICAL_PROBLEM",
    Accident = 6 => "ACCIDENT",
    Holiday = 7 => "HOLIDAY",
    Weather = 8 => "WEATHER",
    Maintenance = 9 => "MAINTENANCE",
    Construction = 10 => "CONSTRUCTION",
    PoliceActivity = 11 => "POLICE_ACTIVITY",
    MedicalEmergency = 12 => "MEDICAL_EMERGENCY",
});

enum_domain!(AlertEffect {
    NoService = 1 => "NO_SERVICE",
    ReducedService = 2 => "REDUCED_SERVICE",
    SignificantDelays = 3 => "SIGNIFICANT_DELAYS",
    Detour = 4 => "DETOUR",
    AdditionalService = 5 => "ADDITIONAL_SERVICE",
    ModifiedService = 6 => "MODIFIED_SERVICE",
    OtherEffect = 7 => "OTHER_EFFECT",
    UnknownEffect = 8 => "UNKNOWN_EFFECT",
    StopMoved = 9 => "STOP_MOVED",
});

enum_domain!(StopStatus {
    IncomingAt = 0 => "INCOMING_AT",
    StoppedAt = 1 => "STOPPED_AT",
    InTransitTo = 2 => "IN_TRANSIT_TO",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_resolves_to_member() {
        assert_eq!(
            map_enum::<CongestionLevel>(2, None),
            Some(CongestionLevel::StopAndGo)
        );
        assert_eq!(CongestionLevel::StopAndGo.name(), "STOP_AND_GO");
    }

    #[test]
    fn unknown_code_uses_fallback() {
        assert_eq!(
            map_enum_name::<CongestionLevel>(99, Some(0)).as_deref(),
            Some("UNKNOWN_CONGESTION_LEVEL")
        );
    }

    #[test]
    fn unknown_code_without_fallback_is_absent() {
        assert_eq!(map_enum::<CongestionLevel>(99, None), None);
    }

    #[test]
    fn unknown_stop_time_code_degrades_to_no_data() {
        assert_eq!(
            map_enum_name::<StopTimeSchedule>(3, Some(2)).as_deref(),
            Some("NO_DATA")
        );
    }

    #[test]
    fn cause_codes_outside_the_archived_set_are_absent() {
        // STRIKE (4) is not part of the archive's cause domain.
        assert_eq!(map_enum::<AlertCause>(4, None), None);
        assert_eq!(
            map_enum_name::<AlertCause>(1, None).as_deref(),
            Some("UNKNOWN_CAUSE")
        );
    }

    #[test]
    fn invalid_fallback_is_also_absent() {
        assert_eq!(map_enum::<StopStatus>(9, Some(7)), None);
    }
}
