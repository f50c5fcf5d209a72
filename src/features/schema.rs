//! Canonical feature schema (schema v1).
//!
//! The trained model, the training-table shaper, and the serving path
//! all consume feature vectors in exactly this column order. It is
//! defined once here; nothing else in the repository re-derives it.

use chrono::{NaiveDate, NaiveTime};

use crate::features::date_range::date_range_label;
use crate::features::time_encoder::TimeFeatures;

/// Date-range one-hot labels in trained order: month abbreviations
/// sorted alphabetically, three buckets each.
pub const DATE_RANGE_LABELS: [&str; 36] = [
    "apr_1", "apr_2", "apr_3", "aug_1", "aug_2", "aug_3", "dec_1", "dec_2", "dec_3", "feb_1",
    "feb_2", "feb_3", "jan_1", "jan_2", "jan_3", "jul_1", "jul_2", "jul_3", "jun_1", "jun_2",
    "jun_3", "mar_1", "mar_2", "mar_3", "may_1", "may_2", "may_3", "nov_1", "nov_2", "nov_3",
    "oct_1", "oct_2", "oct_3", "sep_1", "sep_2", "sep_3",
];

/// Total feature-vector width: 36 one-hot columns + 10 time/power columns.
pub const FEATURE_COUNT: usize = 46;

/// Schema v1 feature column order.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "date_range_apr_1",
    "date_range_apr_2",
    "date_range_apr_3",
    "date_range_aug_1",
    "date_range_aug_2",
    "date_range_aug_3",
    "date_range_dec_1",
    "date_range_dec_2",
    "date_range_dec_3",
    "date_range_feb_1",
    "date_range_feb_2",
    "date_range_feb_3",
    "date_range_jan_1",
    "date_range_jan_2",
    "date_range_jan_3",
    "date_range_jul_1",
    "date_range_jul_2",
    "date_range_jul_3",
    "date_range_jun_1",
    "date_range_jun_2",
    "date_range_jun_3",
    "date_range_mar_1",
    "date_range_mar_2",
    "date_range_mar_3",
    "date_range_may_1",
    "date_range_may_2",
    "date_range_may_3",
    "date_range_nov_1",
    "date_range_nov_2",
    "date_range_nov_3",
    "date_range_oct_1",
    "date_range_oct_2",
    "date_range_oct_3",
    "date_range_sep_1",
    "date_range_sep_2",
    "date_range_sep_3",
    "time",
    "consumed_power",
    "time_sin",
    "time_cos",
    "minute",
    "second",
    "minute_sin",
    "minute_cos",
    "second_sin",
    "second_cos",
];

/// Position of a date-range label in the one-hot block, if it was seen
/// at training time.
pub fn label_index(label: &str) -> Option<usize> {
    DATE_RANGE_LABELS.iter().position(|l| *l == label)
}

/// One-hot encodes a date-range label.
///
/// An unseen label encodes to all zeros rather than failing, so an
/// out-of-vocabulary date degrades instead of taking the request down.
pub fn one_hot(label: &str) -> [f64; DATE_RANGE_LABELS.len()] {
    let mut encoded = [0.0; DATE_RANGE_LABELS.len()];
    if let Some(i) = label_index(label) {
        encoded[i] = 1.0;
    }
    encoded
}

/// Builds one feature vector in schema v1 order.
///
/// This is the single assembly point shared by training-table shaping
/// and the serving path: date bucket one-hot, then seconds-of-day,
/// instantaneous power, and the cyclic columns.
pub fn feature_vector(date: NaiveDate, time: NaiveTime, consumed_power: f64) -> [f64; FEATURE_COUNT] {
    let mut features = [0.0; FEATURE_COUNT];

    let encoded = one_hot(&date_range_label(date));
    features[..DATE_RANGE_LABELS.len()].copy_from_slice(&encoded);

    let t = TimeFeatures::from_time(time);
    let n = DATE_RANGE_LABELS.len();
    features[n] = f64::from(t.time);
    features[n + 1] = consumed_power;
    features[n + 2] = t.time_sin;
    features[n + 3] = t.time_cos;
    features[n + 4] = f64::from(t.minute);
    features[n + 5] = f64::from(t.second);
    features[n + 6] = t.minute_sin;
    features[n + 7] = t.minute_cos;
    features[n + 8] = t.second_sin;
    features[n + 9] = t.second_cos;

    features
}
