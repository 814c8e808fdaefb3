use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct QuickStats {
    #[schema(example = 21)]
    pub days_worked: u32,
    #[schema(example = 1)]
    pub sick_holidays: u32,
    #[schema(example = 3)]
    pub personal_leaves: u32,
    #[schema(example = 1)]
    pub absent_days: u32,
    #[schema(example = 26)]
    pub total_days: u32,
}

/// Fixed-ratio placeholder stats over an inclusive date range, pending real
/// aggregation: ~70% worked, ~5% sick, ~10% personal leave, ~5% absent.
pub fn range_stats(from: NaiveDate, to: NaiveDate) -> QuickStats {
    let span = ((to - from).num_days() + 1).max(0) as f64;

    let days_worked = (span * 0.7).floor() as u32;
    let sick_holidays = (span * 0.05).floor() as u32;
    let personal_leaves = (span * 0.1).floor() as u32;
    let absent_days = (span * 0.05).floor() as u32;

    QuickStats {
        days_worked,
        sick_holidays,
        personal_leaves,
        absent_days,
        total_days: days_worked + sick_holidays + personal_leaves + absent_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_month_breaks_down_by_the_fixed_ratios() {
        let stats = range_stats(date(2026, 1, 1), date(2026, 1, 31));
        assert_eq!(stats.days_worked, 21);
        assert_eq!(stats.sick_holidays, 1);
        assert_eq!(stats.personal_leaves, 3);
        assert_eq!(stats.absent_days, 1);
        assert_eq!(stats.total_days, 26);
    }

    #[test]
    fn single_day_range_floors_every_bucket_to_zero() {
        let stats = range_stats(date(2026, 8, 6), date(2026, 8, 6));
        assert_eq!(stats.total_days, 0);
    }

    #[test]
    fn total_is_the_sum_of_the_buckets() {
        let stats = range_stats(date(2026, 2, 1), date(2026, 8, 6));
        assert_eq!(
            stats.total_days,
            stats.days_worked + stats.sick_holidays + stats.personal_leaves + stats.absent_days
        );
    }
}
