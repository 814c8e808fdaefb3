use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum LeaveType {
    PL,
    CL,
    SL,
    OD,
    Other,
}

impl LeaveType {
    /// Reason text is a fixed mapping per type, not a random draw.
    pub fn reason(&self) -> &'static str {
        match self {
            LeaveType::PL => "Personal leave",
            LeaveType::CL => "Casual leave",
            LeaveType::SL => "Sick leave - Fever",
            LeaveType::OD => "Official duty - Client meeting",
            LeaveType::Other => "Family function",
        }
    }
}

const LEAVE_TYPES: [LeaveType; 5] = [
    LeaveType::PL,
    LeaveType::CL,
    LeaveType::SL,
    LeaveType::OD,
    LeaveType::Other,
];

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaveRecord {
    /// Identifier namespaced by the requesting employee code plus the
    /// date's midnight-UTC millisecond timestamp.
    #[schema(example = "K14050-1748736000000")]
    pub id: String,
    #[schema(example = "2026-06-12", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    #[schema(example = "SL")]
    pub kind: LeaveType,
    #[schema(example = "Sick leave - Fever")]
    pub reason: String,
    pub approved: bool,
}

/// Generates leave records for the current month and the 5 preceding ones:
/// 0-2 leaves per month, day drawn from 1-28 to sidestep month-length edge
/// cases, approval at 80%. Newest first.
pub fn leave_history<R: Rng>(
    identifier: &str,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<LeaveRecord> {
    let mut leaves = Vec::new();
    let current_month = today.with_day(1).unwrap();

    for months_back in 0..6 {
        let month_start = current_month - Months::new(months_back);
        let leave_count = rng.gen_range(0..3);

        for _ in 0..leave_count {
            let kind = LEAVE_TYPES[rng.gen_range(0..LEAVE_TYPES.len())];
            let date = month_start.with_day(rng.gen_range(1..=28)).unwrap();
            let millis = date
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp_millis();

            leaves.push(LeaveRecord {
                id: format!("{identifier}-{millis}"),
                date,
                kind,
                reason: kind.reason().to_string(),
                approved: rng.gen_bool(0.8),
            });
        }
    }

    leaves.sort_by(|a, b| b.date.cmp(&a.date));
    leaves
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn window_covers_exactly_the_trailing_six_months() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        let window_start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            for leave in leave_history("K14050", today, &mut rng) {
                assert!(leave.date >= window_start);
                assert!(leave.date.year() == 2026 && leave.date.month() <= 7);
            }
        }
    }

    #[test]
    fn window_crosses_year_boundaries() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let window_start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();

        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            for leave in leave_history("K14050", today, &mut rng) {
                assert!(leave.date >= window_start);
                assert!(leave.date <= today.with_day(28).unwrap());
            }
        }
    }

    #[test]
    fn records_come_newest_first() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let leaves = leave_history("K14050", today, &mut rng);
            for pair in leaves.windows(2) {
                assert!(pair[0].date >= pair[1].date);
            }
        }
    }

    #[test]
    fn each_month_contributes_at_most_two_leaves() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let leaves = leave_history("K14050", today, &mut rng);
            assert!(leaves.len() <= 12);

            for month in 2..=7 {
                let in_month = leaves.iter().filter(|l| l.date.month() == month).count();
                assert!(in_month <= 2);
            }
        }
    }

    #[test]
    fn days_avoid_month_length_edge_cases() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            for leave in leave_history("K14050", today, &mut rng) {
                assert!(leave.date.day() <= 28);
            }
        }
    }

    #[test]
    fn reason_follows_the_fixed_type_mapping() {
        assert_eq!(LeaveType::PL.reason(), "Personal leave");
        assert_eq!(LeaveType::CL.reason(), "Casual leave");
        assert_eq!(LeaveType::SL.reason(), "Sick leave - Fever");
        assert_eq!(LeaveType::OD.reason(), "Official duty - Client meeting");
        assert_eq!(LeaveType::Other.reason(), "Family function");

        let today = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for leave in leave_history("K14050", today, &mut rng) {
            assert_eq!(leave.reason, leave.kind.reason());
            assert!(leave.id.starts_with("K14050-"));
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_history() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        let first = leave_history("K14050", today, &mut StdRng::seed_from_u64(11));
        let second = leave_history("K14050", today, &mut StdRng::seed_from_u64(11));
        assert_eq!(first, second);
    }
}
