//! Daily cutoff times.
//!
//! A cutoff is the local clock time after which an order no longer ships the
//! same day. Merchants can set a general cutoff plus Saturday/Sunday specific
//! ones, both shop-wide and per rule; [`resolve_cutoff`] walks that override
//! hierarchy and never fails, degrading to [`CutoffTime::DEFAULT`].

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::days::WEEK;

/// A wall-clock time of day with minute precision.
///
/// Always in range: built only through [`CutoffTime::new`] or the parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CutoffTime {
    hour: u32,
    minute: u32,
}

impl CutoffTime {
    /// 14:00, used whenever nothing usable is configured.
    pub const DEFAULT: CutoffTime = CutoffTime {
        hour: 14,
        minute: 0,
    };

    /// Build a cutoff; `None` unless `hour <= 23` and `minute <= 59`.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour <= 23 && minute <= 59).then_some(CutoffTime { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// The cutoff instant on `date`, seconds zeroed.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.as_naive_time())
    }
}

impl Default for CutoffTime {
    fn default() -> Self {
        CutoffTime::DEFAULT
    }
}

impl fmt::Display for CutoffTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse a merchant-entered `"HH:MM"` permissively.
///
/// Splits on `:` and reads the first two tokens as hour and minute. Anything
/// that doesn't yield a valid time (blank, one token, non-numeric, out of
/// range) returns `default` instead of an error.
pub fn parse_cutoff(value: &str, default: CutoffTime) -> CutoffTime {
    let mut parts = value.trim().split(':');
    let hour = parts.next().and_then(|s| s.trim().parse::<u32>().ok());
    let minute = parts.next().and_then(|s| s.trim().parse::<u32>().ok());
    match (hour, minute) {
        (Some(h), Some(m)) => CutoffTime::new(h, m).unwrap_or_else(|| {
            tracing::debug!(value, "cutoff out of range, using default");
            default
        }),
        _ => {
            if !value.trim().is_empty() {
                tracing::debug!(value, "unparseable cutoff, using default");
            }
            default
        }
    }
}

/// The cutoff strings configured at one level (shop-wide or rule).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CutoffFields {
    #[serde(rename = "cutoff_time", deserialize_with = "crate::config::loose_string")]
    pub general: Option<String>,
    #[serde(rename = "cutoff_time_sat", deserialize_with = "crate::config::loose_string")]
    pub saturday: Option<String>,
    #[serde(rename = "cutoff_time_sun", deserialize_with = "crate::config::loose_string")]
    pub sunday: Option<String>,
}

impl CutoffFields {
    fn for_weekday(&self, weekday: Weekday) -> Option<&str> {
        match weekday {
            Weekday::Sat => self.saturday.as_deref(),
            Weekday::Sun => self.sunday.as_deref(),
            _ => None,
        }
    }
}

/// Rule-level cutoffs layered over the shop-wide ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutoffOverride {
    /// The rule's "override cutoff times" flag.
    pub enabled: bool,
    pub rule: CutoffFields,
    pub global: CutoffFields,
}

impl CutoffOverride {
    fn pick<'a>(&'a self, field: impl Fn(&'a CutoffFields) -> Option<&'a str>) -> Option<&'a str> {
        let rule = self.enabled.then(|| field(&self.rule)).flatten();
        rule.filter(|s| !s.trim().is_empty())
            .or_else(|| field(&self.global).filter(|s| !s.trim().is_empty()))
    }
}

/// Resolve the cutoff for `weekday`.
///
/// First non-blank wins: the weekday-specific value (Saturday/Sunday only),
/// then the general value, then 14:00. At each step a rule value is taken only
/// when the override flag is on. A weekday-specific value that fails to parse
/// falls back to the resolved general cutoff.
pub fn resolve_cutoff(weekday: Weekday, cutoffs: &CutoffOverride) -> CutoffTime {
    let general = cutoffs
        .pick(|f| f.general.as_deref())
        .map(|s| parse_cutoff(s, CutoffTime::DEFAULT))
        .unwrap_or(CutoffTime::DEFAULT);

    match cutoffs.pick(|f| f.for_weekday(weekday)) {
        Some(s) => parse_cutoff(s, general),
        None => general,
    }
}

/// One resolved cutoff per weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayCutoffs([CutoffTime; 7]);

impl WeekdayCutoffs {
    /// The same cutoff every day.
    pub fn uniform(cutoff: CutoffTime) -> Self {
        WeekdayCutoffs([cutoff; 7])
    }

    /// Run [`resolve_cutoff`] for each day of the week.
    pub fn resolve(cutoffs: &CutoffOverride) -> Self {
        let mut out = [CutoffTime::DEFAULT; 7];
        for day in WEEK {
            out[day.num_days_from_sunday() as usize] = resolve_cutoff(day, cutoffs);
        }
        WeekdayCutoffs(out)
    }

    pub fn with_day(mut self, weekday: Weekday, cutoff: CutoffTime) -> Self {
        self.0[weekday.num_days_from_sunday() as usize] = cutoff;
        self
    }

    pub fn get(&self, weekday: Weekday) -> CutoffTime {
        self.0[weekday.num_days_from_sunday() as usize]
    }
}

impl Default for WeekdayCutoffs {
    fn default() -> Self {
        WeekdayCutoffs::uniform(CutoffTime::DEFAULT)
    }
}

/// Whether `local_now` is strictly earlier than `cutoff` on the same local day.
pub fn is_before_cutoff(local_now: NaiveDateTime, cutoff: CutoffTime) -> bool {
    local_now < cutoff.on(local_now.date())
}
