//! Rendering surfaces.
//!
//! The merchant admin preview and the storefront widget both render through
//! [`render`], which calls the one shared [`estimate`]. Given the same
//! schedule and instant they produce the same dates and labels.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;

use crate::error::EstimateError;
use crate::schedule::ResolvedSchedule;
use crate::scheduler::estimate;

/// Where an estimate is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    AdminPreview,
    Storefront,
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::AdminPreview, Surface::Storefront];
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Surface::AdminPreview => "admin_preview",
            Surface::Storefront => "storefront",
        })
    }
}

impl FromStr for Surface {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" | "admin_preview" | "preview" => Ok(Surface::AdminPreview),
            "storefront" | "widget" => Ok(Surface::Storefront),
            other => Err(EstimateError::InvalidConfig(format!("unknown surface '{other}'"))),
        }
    }
}

/// What a surface shows for one estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEstimate {
    pub surface: Surface,
    pub shipping_date: NaiveDate,
    pub delivery_min_date: NaiveDate,
    pub delivery_max_date: NaiveDate,
    pub shipping_label: String,
    pub delivery_label: String,
    pub ships_today: bool,
    pub cutoff_countdown_minutes: Option<i64>,
}

impl RenderedEstimate {
    /// The part of the render both surfaces must agree on.
    pub fn visible(&self) -> (NaiveDate, NaiveDate, NaiveDate, &str, &str) {
        (
            self.shipping_date,
            self.delivery_min_date,
            self.delivery_max_date,
            &self.shipping_label,
            &self.delivery_label,
        )
    }
}

/// Render the estimate for `surface`.
pub fn render<O: TimeZone>(
    surface: Surface,
    schedule: &ResolvedSchedule,
    now: &DateTime<O>,
) -> RenderedEstimate {
    let est = estimate(schedule, now);
    RenderedEstimate {
        surface,
        shipping_date: est.shipping_date,
        delivery_min_date: est.delivery_min_date,
        delivery_max_date: est.delivery_max_date,
        shipping_label: est.shipping_label,
        delivery_label: est.delivery_label,
        ships_today: est.ships_today,
        cutoff_countdown_minutes: est.cutoff_countdown_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::days::DaySet;
    use crate::holidays::HolidayCountry;
    use chrono::{Duration, Utc};

    #[test]
    fn test_surfaces_agree_over_a_year() {
        let schedule = ResolvedSchedule::default()
            .with_closed_days(DaySet::WEEKEND)
            .with_lead_time(1)
            .with_holiday_country(Some(HolidayCountry::GB))
            .with_time_zone("Europe/London");
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for hours in (0..366 * 24).step_by(7) {
            let now = start + Duration::hours(hours);
            let admin = render(Surface::AdminPreview, &schedule, &now);
            let shop = render(Surface::Storefront, &schedule, &now);
            assert_eq!(admin.visible(), shop.visible(), "at {now}");
        }
    }

    #[test]
    fn test_surface_parse() {
        assert_eq!("admin".parse::<Surface>().unwrap(), Surface::AdminPreview);
        assert_eq!("Storefront".parse::<Surface>().unwrap(), Surface::Storefront);
        assert!("email".parse::<Surface>().is_err());
    }

    #[test]
    fn test_surface_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Surface::AdminPreview).unwrap(),
            r#""admin_preview""#
        );
    }
}
