//! Shipping and delivery date computation.
//!
//! A single date cursor walks forward from local "today": first to the ship
//! day (same day if the order beats the cutoff on an open day), then across
//! lead-time business days, then across courier delivery days for the minimum
//! and maximum of the delivery window. Every walk has a fixed attempt ceiling
//! so that pathological configuration (all seven days closed) still
//! terminates; hitting a ceiling marks the estimate as degraded instead of
//! failing.
//!
//! `now` is taken once per call. Nothing here reads the system clock except
//! [`estimate_now`], which samples it exactly once and delegates.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::cutoff::is_before_cutoff;
use crate::format::{format_date, format_delivery_window};
use crate::holidays::HolidayCalendar;
use crate::local_time::local_wall_clock;
use crate::schedule::ResolvedSchedule;

/// Attempt ceiling when searching for the first open ship day.
pub const SHIP_DAY_SEARCH_LIMIT: u32 = 14;
/// Attempt ceiling for lead-time and delivery-window walks.
pub const BUSINESS_DAY_SEARCH_LIMIT: u32 = 60;

/// The computed timeline for one order placed at `now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryEstimate {
    /// Local calendar date the engine treated as "today".
    pub today: NaiveDate,
    pub shipping_date: NaiveDate,
    pub delivery_min_date: NaiveDate,
    pub delivery_max_date: NaiveDate,
    /// Whether local "now" was strictly earlier than today's cutoff.
    pub before_cutoff: bool,
    pub ships_today: bool,
    /// Minutes left to order for same-day dispatch, when it still applies.
    pub cutoff_countdown_minutes: Option<i64>,
    /// A search ceiling was reached; dates are finite but may be wrong.
    pub degraded: bool,
    /// `"Mar 4"`
    pub shipping_label: String,
    /// `"Mar 7-11"`, `"Jan 30-Feb 2"` or a single date.
    pub delivery_label: String,
}

/// Estimate shipping and delivery dates for an order placed at `now`.
///
/// `now` may carry any offset; the schedule's time zone (if any) decides
/// which local calendar day counts as today.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, TimeZone, Utc, Weekday};
/// use delivery_engine::days::DaySet;
/// use delivery_engine::schedule::ResolvedSchedule;
/// use delivery_engine::scheduler::estimate;
///
/// // Friday 2024-03-01 at 16:00, after the default 14:00 cutoff
/// let now = Utc.with_ymd_and_hms(2024, 3, 1, 16, 0, 0).unwrap();
/// let schedule = ResolvedSchedule::default().with_closed_days(DaySet::WEEKEND);
///
/// let est = estimate(&schedule, &now);
/// assert_eq!(est.shipping_date.weekday(), Weekday::Mon);
/// assert_eq!(est.delivery_label, "Mar 7-11");
/// ```
pub fn estimate<O: TimeZone>(schedule: &ResolvedSchedule, now: &DateTime<O>) -> DeliveryEstimate {
    let local_now = local_wall_clock(now, schedule.time_zone_name.as_deref());
    let today = local_now.date();
    let cutoff = schedule.cutoff.get(today.weekday());
    let before_cutoff = is_before_cutoff(local_now, cutoff);

    let mut calendar = schedule.holiday_calendar();
    let mut degraded = false;

    let ships_today = before_cutoff && is_ship_day(schedule, &mut calendar, today);
    let base_ship_date = if ships_today {
        today
    } else {
        let (date, found) = next_ship_day(schedule, &mut calendar, today);
        degraded |= !found;
        date
    };

    let (shipping_date, found) = count_business_days(
        base_ship_date,
        schedule.lead_time_days,
        |d| is_ship_day(schedule, &mut calendar, d),
    );
    degraded |= !found;

    let (delivery_min_date, found) = count_business_days(
        shipping_date,
        schedule.min_delivery_days,
        |d| is_delivery_day(schedule, &mut calendar, d),
    );
    degraded |= !found;

    let (delivery_max_date, found) = count_business_days(
        shipping_date,
        schedule.max_delivery_days,
        |d| is_delivery_day(schedule, &mut calendar, d),
    );
    degraded |= !found;

    if degraded {
        tracing::warn!(
            %today,
            %shipping_date,
            "delivery estimate hit a search limit; check closed days and holidays"
        );
    }

    let cutoff_countdown_minutes = ships_today
        .then(|| (cutoff.on(today) - local_now).num_minutes());

    DeliveryEstimate {
        today,
        shipping_date,
        delivery_min_date,
        delivery_max_date,
        before_cutoff,
        ships_today,
        cutoff_countdown_minutes,
        degraded,
        shipping_label: format_date(shipping_date),
        delivery_label: format_delivery_window(
            delivery_min_date,
            delivery_max_date,
            schedule.min_delivery_days,
            schedule.max_delivery_days,
        ),
    }
}

/// [`estimate`] against the system clock, sampled once.
pub fn estimate_now(schedule: &ResolvedSchedule) -> DeliveryEstimate {
    let now = Local::now();
    estimate(schedule, &now)
}

/// Open for dispatch: not a closed weekday and not a holiday.
pub fn is_ship_day(
    schedule: &ResolvedSchedule,
    calendar: &mut HolidayCalendar,
    date: NaiveDate,
) -> bool {
    !schedule.closed_days.contains(date.weekday()) && !calendar.is_holiday(date)
}

/// The courier delivers: not a no-delivery weekday and not a holiday.
pub fn is_delivery_day(
    schedule: &ResolvedSchedule,
    calendar: &mut HolidayCalendar,
    date: NaiveDate,
) -> bool {
    !schedule.courier_no_delivery_days.contains(date.weekday()) && !calendar.is_holiday(date)
}

/// First open ship day strictly after `today`.
///
/// Returns the cursor and whether an open day was found before the ceiling.
fn next_ship_day(
    schedule: &ResolvedSchedule,
    calendar: &mut HolidayCalendar,
    today: NaiveDate,
) -> (NaiveDate, bool) {
    let mut cursor = next_day(today);
    let mut attempts = 0;
    while !is_ship_day(schedule, calendar, cursor) {
        if attempts >= SHIP_DAY_SEARCH_LIMIT {
            return (cursor, false);
        }
        cursor = next_day(cursor);
        attempts += 1;
    }
    (cursor, true)
}

/// Step forward from `start` until `target` days satisfying `counts` have
/// been passed, giving up after [`BUSINESS_DAY_SEARCH_LIMIT`] steps.
fn count_business_days(
    start: NaiveDate,
    target: u32,
    mut counts: impl FnMut(NaiveDate) -> bool,
) -> (NaiveDate, bool) {
    let mut cursor = start;
    let mut counted = 0;
    let mut attempts = 0;
    while counted < target && attempts < BUSINESS_DAY_SEARCH_LIMIT {
        cursor = next_day(cursor);
        attempts += 1;
        if counts(cursor) {
            counted += 1;
        }
    }
    (cursor, counted >= target)
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}
