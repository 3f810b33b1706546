//! The resolved, strictly typed input to the estimator.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::cutoff::{CutoffTime, WeekdayCutoffs};
use crate::days::DaySet;
use crate::holidays::{HolidayCalendar, HolidayCountry};

/// Minimum delivery days when neither the rule nor the shop sets one.
pub const DEFAULT_MIN_DELIVERY_DAYS: u32 = 3;
/// Maximum delivery days when neither the rule nor the shop sets one.
pub const DEFAULT_MAX_DELIVERY_DAYS: u32 = 5;

/// Everything the estimator needs, already merged from rule and shop settings.
///
/// `min_delivery_days <= max_delivery_days` is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSchedule {
    pub cutoff: WeekdayCutoffs,
    pub closed_days: DaySet,
    pub courier_no_delivery_days: DaySet,
    pub lead_time_days: u32,
    pub min_delivery_days: u32,
    pub max_delivery_days: u32,
    pub holiday_country: Option<HolidayCountry>,
    pub custom_holiday_dates: BTreeSet<NaiveDate>,
    /// IANA zone used to decide "today"; `None` keeps the caller's offset.
    pub time_zone_name: Option<String>,
}

impl Default for ResolvedSchedule {
    fn default() -> Self {
        Self {
            cutoff: WeekdayCutoffs::default(),
            closed_days: DaySet::EMPTY,
            courier_no_delivery_days: DaySet::WEEKEND,
            lead_time_days: 0,
            min_delivery_days: DEFAULT_MIN_DELIVERY_DAYS,
            max_delivery_days: DEFAULT_MAX_DELIVERY_DAYS,
            holiday_country: None,
            custom_holiday_dates: BTreeSet::new(),
            time_zone_name: None,
        }
    }
}

impl ResolvedSchedule {
    pub fn with_cutoff(mut self, cutoff: CutoffTime) -> Self {
        self.cutoff = WeekdayCutoffs::uniform(cutoff);
        self
    }

    pub fn with_closed_days(mut self, days: DaySet) -> Self {
        self.closed_days = days;
        self
    }

    pub fn with_courier_no_delivery_days(mut self, days: DaySet) -> Self {
        self.courier_no_delivery_days = days;
        self
    }

    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    pub fn with_delivery_days(mut self, min: u32, max: u32) -> Self {
        self.min_delivery_days = min;
        self.max_delivery_days = max;
        self
    }

    pub fn with_holiday_country(mut self, country: Option<HolidayCountry>) -> Self {
        self.holiday_country = country;
        self
    }

    pub fn with_custom_holidays(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.custom_holiday_dates = dates.into_iter().collect();
        self
    }

    pub fn with_time_zone(mut self, name: impl Into<String>) -> Self {
        self.time_zone_name = Some(name.into());
        self
    }

    /// A fresh holiday calendar for this schedule.
    pub fn holiday_calendar(&self) -> HolidayCalendar {
        HolidayCalendar::new(self.holiday_country, self.custom_holiday_dates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_defaults() {
        let s = ResolvedSchedule::default();
        assert_eq!(s.cutoff.get(Weekday::Mon), CutoffTime::DEFAULT);
        assert!(s.closed_days.is_empty());
        assert_eq!(s.courier_no_delivery_days, DaySet::WEEKEND);
        assert_eq!(s.lead_time_days, 0);
        assert_eq!((s.min_delivery_days, s.max_delivery_days), (3, 5));
        assert!(s.time_zone_name.is_none());
    }

    #[test]
    fn test_holiday_calendar_carries_custom_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let s = ResolvedSchedule::default().with_custom_holidays([d]);
        assert!(s.holiday_calendar().is_holiday(d));
    }
}
