//! Date-range bucketing: the categorical time feature joining the
//! simulation output to the model's feature encoding.
//!
//! Each month splits into three contiguous ranges of `days_in_month / 3`
//! days; the remainder always lands in the third range. Both the
//! simulator's row labeling and the serving path's request encoding call
//! this one function, so the two halves of the system can never drift.

use chrono::{Datelike, NaiveDate};

/// Lowercase three-letter month abbreviations, January first.
pub const MONTH_ABBREV: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Returns the bucket label for a date, e.g. `"mar_2"`.
pub fn date_range_label(date: NaiveDate) -> String {
    let day = date.day();
    let month = MONTH_ABBREV[date.month0() as usize];
    let range_size = days_in_month(date.year(), date.month()) / 3;
    let bucket = if day <= range_size {
        1
    } else if day <= range_size * 2 {
        2
    } else {
        3
    };
    format!("{month}_{bucket}")
}

/// Number of days in a calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("test date should be valid")
    }

    #[test]
    fn thirty_one_day_month_remainder_in_third_bucket() {
        // range_size = 31 / 3 = 10
        assert_eq!(date_range_label(date(2025, 3, 1)), "mar_1");
        assert_eq!(date_range_label(date(2025, 3, 10)), "mar_1");
        assert_eq!(date_range_label(date(2025, 3, 11)), "mar_2");
        assert_eq!(date_range_label(date(2025, 3, 20)), "mar_2");
        assert_eq!(date_range_label(date(2025, 3, 21)), "mar_3");
        assert_eq!(date_range_label(date(2025, 3, 31)), "mar_3");
    }

    #[test]
    fn february_non_leap() {
        // range_size = 28 / 3 = 9
        assert_eq!(date_range_label(date(2025, 2, 9)), "feb_1");
        assert_eq!(date_range_label(date(2025, 2, 10)), "feb_2");
        assert_eq!(date_range_label(date(2025, 2, 18)), "feb_2");
        assert_eq!(date_range_label(date(2025, 2, 19)), "feb_3");
        assert_eq!(date_range_label(date(2025, 2, 28)), "feb_3");
    }

    #[test]
    fn february_leap() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(date_range_label(date(2024, 2, 29)), "feb_3");
    }

    #[test]
    fn buckets_partition_every_month() {
        for month in 1..=12 {
            let mut counts = [0u32; 3];
            for day in 1..=days_in_month(2025, month) {
                let label = date_range_label(date(2025, month, day));
                let bucket: usize = label
                    .rsplit('_')
                    .next()
                    .and_then(|n| n.parse().ok())
                    .expect("label ends in a bucket number");
                counts[bucket - 1] += 1;
            }
            let range_size = days_in_month(2025, month) / 3;
            assert_eq!(counts[0], range_size, "month {month} bucket 1");
            assert_eq!(counts[1], range_size, "month {month} bucket 2");
            assert_eq!(
                counts.iter().sum::<u32>(),
                days_in_month(2025, month),
                "month {month} days must partition with no gaps"
            );
            assert!(counts[2] >= range_size, "remainder goes to bucket 3");
        }
    }

    #[test]
    fn labeling_is_stable() {
        let d = date(2025, 7, 14);
        assert_eq!(date_range_label(d), date_range_label(d));
    }
}
