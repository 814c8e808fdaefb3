use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Day classification shared by the attendance store and the generated
/// history. The lowercase string form is what lands in the `status` column.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Weekend,
    Holiday,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Weekend => "weekend",
            AttendanceStatus::Holiday => "holiday",
        }
    }

    /// A day that counts toward the attendance-rate denominator.
    pub fn is_working_day(&self) -> bool {
        !matches!(self, AttendanceStatus::Weekend | AttendanceStatus::Holiday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_db_string() {
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Late,
            AttendanceStatus::Absent,
            AttendanceStatus::Weekend,
            AttendanceStatus::Holiday,
        ] {
            assert_eq!(AttendanceStatus::from_str(status.as_str()), Ok(status));
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn only_weekend_and_holiday_are_non_working() {
        assert!(AttendanceStatus::Present.is_working_day());
        assert!(AttendanceStatus::Late.is_working_day());
        assert!(AttendanceStatus::Absent.is_working_day());
        assert!(!AttendanceStatus::Weekend.is_working_day());
        assert!(!AttendanceStatus::Holiday.is_working_day());
    }
}
