//! Merchant settings and their resolution into a [`ResolvedSchedule`].
//!
//! Settings arrive as loosely shaped JSON: day lists may be arrays or
//! comma-separated strings, counts may be numbers or numeric strings, custom
//! holidays may be bare dates or `{ "date": ... }` objects. All of that is
//! normalized here so the estimator only ever sees strict types.
//!
//! Every overridable category (cutoff times, lead time, closed days, courier
//! days) has its own rule-level flag. A rule value is used only when its
//! category flag is on and the value is usable; otherwise the shop-wide value
//! applies, and failing that a hard default.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::cutoff::{CutoffFields, CutoffOverride, WeekdayCutoffs};
use crate::days::{parse_weekday, DaySet};
use crate::error::Result;
use crate::holidays::HolidayCountry;
use crate::schedule::{ResolvedSchedule, DEFAULT_MAX_DELIVERY_DAYS, DEFAULT_MIN_DELIVERY_DAYS};

// ── Loose input shapes ──────────────────────────────────────────────────────

/// A weekday list: `["sat", "sun"]` or `"sat,sun"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DayList {
    Days(Vec<String>),
    Csv(String),
    Other(Value),
}

impl DayList {
    /// The parsed set, or `None` when nothing recognizable was given.
    ///
    /// An explicitly empty list or blank string is a valid empty set.
    pub fn parse(&self) -> Option<DaySet> {
        let tokens: Vec<&str> = match self {
            DayList::Days(days) => days.iter().map(String::as_str).collect(),
            DayList::Csv(csv) => csv.split(',').filter(|t| !t.trim().is_empty()).collect(),
            DayList::Other(value) => {
                tracing::debug!(%value, "unparseable day list");
                return None;
            }
        };
        if tokens.is_empty() {
            return Some(DaySet::EMPTY);
        }
        let days: DaySet = tokens.iter().filter_map(|t| parse_weekday(t)).collect();
        if days.is_empty() {
            tracing::debug!(?tokens, "no recognizable weekdays in day list");
            return None;
        }
        Some(days)
    }
}

/// A non-negative day count: `3`, `3.0` or `"3"`. Negatives clamp to zero.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LooseCount {
    Int(i64),
    Float(f64),
    Text(String),
    Other(Value),
}

impl LooseCount {
    pub fn value(&self) -> Option<u32> {
        let n = match self {
            LooseCount::Int(n) => *n,
            LooseCount::Float(f) if f.is_finite() => f.trunc() as i64,
            LooseCount::Text(s) if !s.trim().is_empty() => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => f.trunc() as i64,
                _ => {
                    tracing::debug!(value = %s, "unparseable day count");
                    return None;
                }
            },
            _ => return None,
        };
        Some(n.clamp(0, u32::MAX as i64) as u32)
    }
}

/// One custom holiday entry: `"2024-07-10"` or `{ "date": "2024-07-10", ... }`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HolidayEntry {
    Date(String),
    Object {
        #[serde(default)]
        date: Option<Value>,
    },
    Other(Value),
}

impl HolidayEntry {
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = match self {
            HolidayEntry::Date(s) => s.as_str(),
            HolidayEntry::Object {
                date: Some(Value::String(s)),
            } => s.as_str(),
            _ => return None,
        };
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
    }
}

/// The merchant's custom holiday list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HolidayList {
    Entries(Vec<HolidayEntry>),
    Csv(String),
    Other(Value),
}

impl HolidayList {
    /// Valid dates only; malformed entries are dropped.
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        let entries: Vec<HolidayEntry> = match self {
            HolidayList::Entries(entries) => entries.clone(),
            HolidayList::Csv(csv) => csv
                .split(',')
                .filter(|t| !t.trim().is_empty())
                .map(|t| HolidayEntry::Date(t.trim().to_string()))
                .collect(),
            HolidayList::Other(_) => Vec::new(),
        };
        entries
            .iter()
            .filter_map(|entry| {
                let date = entry.date();
                if date.is_none() {
                    tracing::debug!(?entry, "dropping invalid custom holiday");
                }
                date
            })
            .collect()
    }
}

pub(crate) fn loose_string<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn loose_bool<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}

// ── Settings documents ──────────────────────────────────────────────────────

/// Shop-wide delivery settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalSettings {
    #[serde(flatten)]
    pub cutoff: CutoffFields,
    pub lead_time: Option<LooseCount>,
    pub closed_days: Option<DayList>,
    pub courier_no_delivery_days: Option<DayList>,
    pub min_delivery_days: Option<LooseCount>,
    pub max_delivery_days: Option<LooseCount>,
    #[serde(deserialize_with = "loose_string")]
    pub holiday_country: Option<String>,
    pub custom_holidays: Option<HolidayList>,
    #[serde(deserialize_with = "loose_string")]
    pub timezone: Option<String>,
}

/// Per-rule overrides. Each category applies only when its flag is set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleSettings {
    #[serde(deserialize_with = "loose_bool")]
    pub override_cutoff_times: bool,
    #[serde(flatten)]
    pub cutoff: CutoffFields,

    /// Governs `lead_time`, `min_delivery_days` and `max_delivery_days`.
    #[serde(deserialize_with = "loose_bool")]
    pub override_lead_time: bool,
    pub lead_time: Option<LooseCount>,
    pub min_delivery_days: Option<LooseCount>,
    pub max_delivery_days: Option<LooseCount>,

    #[serde(deserialize_with = "loose_bool")]
    pub override_closed_days: bool,
    pub closed_days: Option<DayList>,

    #[serde(deserialize_with = "loose_bool")]
    pub override_courier_days: bool,
    pub courier_no_delivery_days: Option<DayList>,
}

/// A settings document: shop-wide settings plus the matched rule, if any.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleSettings {
    pub global: GlobalSettings,
    pub rule: Option<RuleSettings>,
}

impl ScheduleSettings {
    /// Parse a settings document. Only structurally invalid JSON is an error;
    /// odd field values are tolerated and defaulted during [`resolve`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn resolve(&self) -> ResolvedSchedule {
        resolve(&self.global, self.rule.as_ref())
    }
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Pick the rule value when its category is overridden and it parses,
/// otherwise the shop-wide value when it parses.
fn layered<T, U>(
    enabled: bool,
    rule: Option<&T>,
    global: Option<&T>,
    parse: impl Fn(&T) -> Option<U>,
) -> Option<U> {
    enabled
        .then(|| rule.and_then(&parse))
        .flatten()
        .or_else(|| global.and_then(&parse))
}

/// Merge rule and shop settings into a [`ResolvedSchedule`]. Never fails.
pub fn resolve(global: &GlobalSettings, rule: Option<&RuleSettings>) -> ResolvedSchedule {
    let none = RuleSettings::default();
    let rule = rule.unwrap_or(&none);

    let cutoff = WeekdayCutoffs::resolve(&CutoffOverride {
        enabled: rule.override_cutoff_times,
        rule: rule.cutoff.clone(),
        global: global.cutoff.clone(),
    });

    let closed_days = layered(
        rule.override_closed_days,
        rule.closed_days.as_ref(),
        global.closed_days.as_ref(),
        DayList::parse,
    )
    .unwrap_or(DaySet::EMPTY);

    let courier_no_delivery_days = layered(
        rule.override_courier_days,
        rule.courier_no_delivery_days.as_ref(),
        global.courier_no_delivery_days.as_ref(),
        DayList::parse,
    )
    .unwrap_or(DaySet::WEEKEND);

    let count = |rule_value: Option<&LooseCount>, global_value: Option<&LooseCount>, default: u32| {
        layered(rule.override_lead_time, rule_value, global_value, LooseCount::value)
            .unwrap_or(default)
    };
    let lead_time_days = count(rule.lead_time.as_ref(), global.lead_time.as_ref(), 0);
    let min_delivery_days = count(
        rule.min_delivery_days.as_ref(),
        global.min_delivery_days.as_ref(),
        DEFAULT_MIN_DELIVERY_DAYS,
    );
    let max_delivery_days = count(
        rule.max_delivery_days.as_ref(),
        global.max_delivery_days.as_ref(),
        DEFAULT_MAX_DELIVERY_DAYS,
    );

    let holiday_country = global
        .holiday_country
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .and_then(|code| match code.parse::<HolidayCountry>() {
            Ok(country) => Some(country),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring holiday country");
                None
            }
        });

    let custom_holiday_dates = global
        .custom_holidays
        .as_ref()
        .map(HolidayList::dates)
        .unwrap_or_default();

    let time_zone_name = global
        .timezone
        .as_deref()
        .map(str::trim)
        .filter(|tz| !tz.is_empty())
        .map(str::to_string);

    ResolvedSchedule {
        cutoff,
        closed_days,
        courier_no_delivery_days,
        lead_time_days,
        min_delivery_days,
        max_delivery_days,
        holiday_country,
        custom_holiday_dates,
        time_zone_name,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
