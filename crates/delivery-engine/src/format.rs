//! Short date labels shared by every rendering surface.

use chrono::{Datelike, NaiveDate};

/// `"Mar 4"`: three-letter month, day without leading zero.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// A delivery window label.
///
/// - same date: `"Mar 4"`
/// - same month: `"Mar 4-7"`
/// - otherwise: `"Jan 30-Feb 2"`
pub fn format_range(min: NaiveDate, max: NaiveDate) -> String {
    if min == max {
        format_date(min)
    } else if min.year() == max.year() && min.month() == max.month() {
        format!("{}-{}", format_date(min), max.day())
    } else {
        format!("{}-{}", format_date(min), format_date(max))
    }
}

/// [`format_range`], collapsing to a single date whenever the configured
/// minimum and maximum day counts are equal.
pub fn format_delivery_window(
    min: NaiveDate,
    max: NaiveDate,
    min_days: u32,
    max_days: u32,
) -> String {
    if min_days == max_days {
        format_date(min)
    } else {
        format_range(min, max)
    }
}
