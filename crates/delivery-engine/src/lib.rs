//! # delivery-engine
//!
//! Deterministic delivery date estimation for storefronts.
//!
//! Given a "now" instant and a merchant's schedule (cutoff times, closed
//! days, lead time, bank holidays, courier no-delivery days), computes the
//! shipping date and the delivery window, and renders them as short labels.
//! All computation is pure: the caller supplies the instant, nothing is
//! cached across calls, and malformed settings degrade to defaults instead
//! of failing.
//!
//! ## Modules
//!
//! - [`config`] — Loose merchant settings → [`ResolvedSchedule`]
//! - [`cutoff`] — Cutoff time parsing and per-weekday override resolution
//! - [`days`] — Weekday sets
//! - [`holidays`] — Bank holiday rules, Easter, nth-weekday-of-month
//! - [`local_time`] — Zone-local wall clock for "today"
//! - [`schedule`] — The resolved, strictly typed schedule
//! - [`scheduler`] — Shipping date, lead time and delivery window
//! - [`format`] — `"Mar 4"` / `"Mar 4-7"` / `"Jan 30-Feb 2"` labels
//! - [`surface`] — Admin preview and storefront renderers
//! - [`error`] — Error types

pub mod config;
pub mod cutoff;
pub mod days;
pub mod error;
pub mod format;
pub mod holidays;
pub mod local_time;
pub mod schedule;
pub mod scheduler;
pub mod surface;

pub use config::{resolve, GlobalSettings, RuleSettings, ScheduleSettings};
pub use cutoff::{is_before_cutoff, parse_cutoff, resolve_cutoff, CutoffTime};
pub use days::DaySet;
pub use error::EstimateError;
pub use format::{format_date, format_range};
pub use holidays::{
    easter_sunday, holidays_for, holidays_for_iso, nth_weekday_of_month, HolidayCalendar,
    HolidayCountry,
};
pub use schedule::ResolvedSchedule;
pub use scheduler::{estimate, estimate_now, DeliveryEstimate};
pub use surface::{render, RenderedEstimate, Surface};
