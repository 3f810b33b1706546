//! Bank holiday calendars.
//!
//! Each supported country is a static table of [`HolidayRule`]s that resolve
//! to concrete dates for a given year. Moving feasts hang off Easter Sunday,
//! computed with the Anonymous Gregorian algorithm; weekday-anchored holidays
//! ("3rd Monday of January", "last Monday of May") go through
//! [`nth_weekday_of_month`].
//!
//! Holidays are always computed per year. A date is a holiday iff it is a
//! merchant custom holiday or appears in its own year's bank holiday set.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::days::DaySet;
use crate::error::EstimateError;

// ── Countries ───────────────────────────────────────────────────────────────

/// A country with a built-in bank holiday ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HolidayCountry {
    /// United Kingdom (England & Wales bank holidays).
    GB,
    IE,
    US,
    CA,
    AU,
    NZ,
    FR,
    DE,
    NL,
    ES,
    IT,
}

impl HolidayCountry {
    pub const ALL: [HolidayCountry; 11] = [
        HolidayCountry::GB,
        HolidayCountry::IE,
        HolidayCountry::US,
        HolidayCountry::CA,
        HolidayCountry::AU,
        HolidayCountry::NZ,
        HolidayCountry::FR,
        HolidayCountry::DE,
        HolidayCountry::NL,
        HolidayCountry::ES,
        HolidayCountry::IT,
    ];

    /// The two-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            HolidayCountry::GB => "GB",
            HolidayCountry::IE => "IE",
            HolidayCountry::US => "US",
            HolidayCountry::CA => "CA",
            HolidayCountry::AU => "AU",
            HolidayCountry::NZ => "NZ",
            HolidayCountry::FR => "FR",
            HolidayCountry::DE => "DE",
            HolidayCountry::NL => "NL",
            HolidayCountry::ES => "ES",
            HolidayCountry::IT => "IT",
        }
    }

    /// The rule table for this country.
    pub fn rules(&self) -> &'static [HolidayRule] {
        match self {
            HolidayCountry::GB => GB_RULES,
            HolidayCountry::IE => IE_RULES,
            HolidayCountry::US => US_RULES,
            HolidayCountry::CA => CA_RULES,
            HolidayCountry::AU => AU_RULES,
            HolidayCountry::NZ => NZ_RULES,
            HolidayCountry::FR => FR_RULES,
            HolidayCountry::DE => DE_RULES,
            HolidayCountry::NL => NL_RULES,
            HolidayCountry::ES => ES_RULES,
            HolidayCountry::IT => IT_RULES,
        }
    }

    /// Resolve every rule for `year`.
    ///
    /// [`HolidayRule::Observed`] dates landing on a weekend also add a
    /// substitute on the next weekday not already taken, in table order.
    pub fn holidays(&self, year: i32) -> BTreeSet<NaiveDate> {
        let easter = easter_sunday(year);
        let mut dates: BTreeSet<NaiveDate> = self
            .rules()
            .iter()
            .filter_map(|rule| rule.resolve(year, easter))
            .collect();
        for rule in self.rules() {
            let HolidayRule::Observed { month, day } = *rule else {
                continue;
            };
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            if !is_weekend(date) {
                continue;
            }
            let mut substitute = date + Duration::days(1);
            while is_weekend(substitute) || dates.contains(&substitute) {
                substitute += Duration::days(1);
            }
            dates.insert(substitute);
        }
        dates
    }
}

impl fmt::Display for HolidayCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HolidayCountry {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GB" | "UK" => Ok(HolidayCountry::GB),
            "IE" => Ok(HolidayCountry::IE),
            "US" | "USA" => Ok(HolidayCountry::US),
            "CA" => Ok(HolidayCountry::CA),
            "AU" => Ok(HolidayCountry::AU),
            "NZ" => Ok(HolidayCountry::NZ),
            "FR" => Ok(HolidayCountry::FR),
            "DE" => Ok(HolidayCountry::DE),
            "NL" => Ok(HolidayCountry::NL),
            "ES" => Ok(HolidayCountry::ES),
            "IT" => Ok(HolidayCountry::IT),
            _ => Err(EstimateError::InvalidCountry(format!("'{}'", s.trim()))),
        }
    }
}

// ── Rules ───────────────────────────────────────────────────────────────────

/// How a single holiday lands in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayRule {
    /// Same month/day every year.
    Fixed { month: u32, day: u32 },
    /// Days relative to Easter Sunday (Good Friday = -2, Whit Monday = +50).
    Easter { offset: i64 },
    /// The nth `weekday` of `month`; negative `n` counts from the month's end.
    NthWeekday { month: u32, weekday: Weekday, n: i32 },
    /// The last `weekday` falling on or before `month`/`day`.
    WeekdayOnOrBefore { month: u32, day: u32, weekday: Weekday },
    /// A fixed date that moves to the following Monday when it falls on a weekend.
    MondayIfWeekend { month: u32, day: u32 },
    /// A fixed date kept as is, plus a substitute weekday when it falls on a
    /// weekend (see [`HolidayCountry::holidays`]).
    Observed { month: u32, day: u32 },
}

impl HolidayRule {
    fn resolve(&self, year: i32, easter: NaiveDate) -> Option<NaiveDate> {
        match *self {
            HolidayRule::Fixed { month, day } | HolidayRule::Observed { month, day } => {
                NaiveDate::from_ymd_opt(year, month, day)
            }
            HolidayRule::Easter { offset } => Some(easter + Duration::days(offset)),
            HolidayRule::NthWeekday { month, weekday, n } => {
                nth_weekday_of_month(year, month, weekday, n)
            }
            HolidayRule::WeekdayOnOrBefore {
                month,
                day,
                weekday,
            } => {
                let anchor = NaiveDate::from_ymd_opt(year, month, day)?;
                let back = (anchor.weekday().num_days_from_monday() as i64
                    - weekday.num_days_from_monday() as i64
                    + 7)
                    % 7;
                Some(anchor - Duration::days(back))
            }
            HolidayRule::MondayIfWeekend { month, day } => {
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                Some(match date.weekday() {
                    Weekday::Sat => date + Duration::days(2),
                    Weekday::Sun => date + Duration::days(1),
                    _ => date,
                })
            }
        }
    }
}

const NEW_YEAR: HolidayRule = HolidayRule::Fixed { month: 1, day: 1 };
const GOOD_FRIDAY: HolidayRule = HolidayRule::Easter { offset: -2 };
const EASTER_MONDAY: HolidayRule = HolidayRule::Easter { offset: 1 };
const ASCENSION: HolidayRule = HolidayRule::Easter { offset: 39 };
const WHIT_MONDAY: HolidayRule = HolidayRule::Easter { offset: 50 };
const CHRISTMAS: HolidayRule = HolidayRule::Fixed { month: 12, day: 25 };
const BOXING_DAY: HolidayRule = HolidayRule::Fixed { month: 12, day: 26 };

// Commonwealth calendars give a weekend New Year, Christmas or Boxing Day a
// weekday in lieu.
const NEW_YEAR_OBSERVED: HolidayRule = HolidayRule::Observed { month: 1, day: 1 };
const CHRISTMAS_OBSERVED: HolidayRule = HolidayRule::Observed { month: 12, day: 25 };
const BOXING_DAY_OBSERVED: HolidayRule = HolidayRule::Observed { month: 12, day: 26 };

const fn nth(month: u32, weekday: Weekday, n: i32) -> HolidayRule {
    HolidayRule::NthWeekday { month, weekday, n }
}

const fn fixed(month: u32, day: u32) -> HolidayRule {
    HolidayRule::Fixed { month, day }
}

static GB_RULES: &[HolidayRule] = &[
    NEW_YEAR_OBSERVED,
    GOOD_FRIDAY,
    EASTER_MONDAY,
    nth(5, Weekday::Mon, 1),  // Early May bank holiday
    nth(5, Weekday::Mon, -1), // Spring bank holiday
    nth(8, Weekday::Mon, -1), // Summer bank holiday
    CHRISTMAS_OBSERVED,
    BOXING_DAY_OBSERVED,
];

static IE_RULES: &[HolidayRule] = &[
    NEW_YEAR_OBSERVED,
    nth(2, Weekday::Mon, 1), // St Brigid's Day
    HolidayRule::MondayIfWeekend { month: 3, day: 17 },
    EASTER_MONDAY,
    nth(5, Weekday::Mon, 1),
    nth(6, Weekday::Mon, 1),
    nth(8, Weekday::Mon, 1),
    nth(10, Weekday::Mon, -1),
    CHRISTMAS_OBSERVED,
    BOXING_DAY_OBSERVED,
];

static US_RULES: &[HolidayRule] = &[
    NEW_YEAR,
    nth(1, Weekday::Mon, 3),  // Martin Luther King Jr. Day
    nth(2, Weekday::Mon, 3),  // Presidents' Day
    nth(5, Weekday::Mon, -1), // Memorial Day
    fixed(6, 19),             // Juneteenth
    fixed(7, 4),              // Independence Day
    nth(9, Weekday::Mon, 1),  // Labor Day
    nth(10, Weekday::Mon, 2), // Columbus Day
    fixed(11, 11),            // Veterans Day
    nth(11, Weekday::Thu, 4), // Thanksgiving
    CHRISTMAS,
];

static CA_RULES: &[HolidayRule] = &[
    NEW_YEAR,
    GOOD_FRIDAY,
    HolidayRule::WeekdayOnOrBefore {
        month: 5,
        day: 24,
        weekday: Weekday::Mon,
    },
    fixed(7, 1),
    nth(9, Weekday::Mon, 1),
    nth(10, Weekday::Mon, 2),
    fixed(11, 11),
    CHRISTMAS,
    BOXING_DAY,
];

static AU_RULES: &[HolidayRule] = &[
    NEW_YEAR_OBSERVED,
    HolidayRule::MondayIfWeekend { month: 1, day: 26 },
    GOOD_FRIDAY,
    EASTER_MONDAY,
    fixed(4, 25),
    nth(6, Weekday::Mon, 2), // King's Birthday
    CHRISTMAS_OBSERVED,
    BOXING_DAY_OBSERVED,
];

static NZ_RULES: &[HolidayRule] = &[
    NEW_YEAR_OBSERVED,
    HolidayRule::Observed { month: 1, day: 2 },
    HolidayRule::MondayIfWeekend { month: 2, day: 6 },
    GOOD_FRIDAY,
    EASTER_MONDAY,
    HolidayRule::MondayIfWeekend { month: 4, day: 25 },
    nth(6, Weekday::Mon, 1),
    nth(10, Weekday::Mon, 4), // Labour Day
    CHRISTMAS_OBSERVED,
    BOXING_DAY_OBSERVED,
];

static FR_RULES: &[HolidayRule] = &[
    NEW_YEAR,
    EASTER_MONDAY,
    fixed(5, 1),
    fixed(5, 8),
    ASCENSION,
    WHIT_MONDAY,
    fixed(7, 14),
    fixed(8, 15),
    fixed(11, 1),
    fixed(11, 11),
    CHRISTMAS,
];

static DE_RULES: &[HolidayRule] = &[
    NEW_YEAR,
    GOOD_FRIDAY,
    EASTER_MONDAY,
    fixed(5, 1),
    ASCENSION,
    WHIT_MONDAY,
    fixed(10, 3),
    CHRISTMAS,
    BOXING_DAY,
];

static NL_RULES: &[HolidayRule] = &[
    NEW_YEAR,
    EASTER_MONDAY,
    fixed(4, 27),
    ASCENSION,
    WHIT_MONDAY,
    CHRISTMAS,
    BOXING_DAY,
];

static ES_RULES: &[HolidayRule] = &[
    NEW_YEAR,
    fixed(1, 6),
    GOOD_FRIDAY,
    fixed(5, 1),
    fixed(8, 15),
    fixed(10, 12),
    fixed(11, 1),
    fixed(12, 6),
    fixed(12, 8),
    CHRISTMAS,
];

static IT_RULES: &[HolidayRule] = &[
    NEW_YEAR,
    fixed(1, 6),
    EASTER_MONDAY,
    fixed(4, 25),
    fixed(5, 1),
    fixed(6, 2),
    fixed(8, 15),
    fixed(11, 1),
    fixed(12, 8),
    CHRISTMAS,
    BOXING_DAY,
];

// ── Calendar arithmetic ─────────────────────────────────────────────────────

fn is_weekend(date: NaiveDate) -> bool {
    DaySet::WEEKEND.contains(date.weekday())
}

/// Easter Sunday for `year` (Anonymous Gregorian algorithm).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use delivery_engine::holidays::easter_sunday;
///
/// assert_eq!(easter_sunday(2024), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
/// ```
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    // month is always 3 or 4 and day within range for any year chrono supports
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).unwrap_or(NaiveDate::MIN)
}

/// The nth `weekday` of `month` (1-12) in `year`.
///
/// Positive `n` counts forward from the 1st; negative `n` counts back from the
/// last day (`-1` = last occurrence). Returns `None` for `n == 0` or when the
/// requested occurrence falls outside the month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: i32) -> Option<NaiveDate> {
    if n > 0 {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let diff = (weekday.num_days_from_monday() as i64
            - first.weekday().num_days_from_monday() as i64
            + 7)
            % 7;
        let target = first + Duration::days(diff) + Duration::weeks((n - 1) as i64);
        (target.month() == month).then_some(target)
    } else if n < 0 {
        let last = last_day_of_month(year, month)?;
        let diff = (last.weekday().num_days_from_monday() as i64
            - weekday.num_days_from_monday() as i64
            + 7)
            % 7;
        let target = last - Duration::days(diff) - Duration::weeks((-n - 1) as i64);
        (target.month() == month).then_some(target)
    } else {
        None
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

// ── Lookup ──────────────────────────────────────────────────────────────────

/// Bank holidays for a country code and year.
///
/// Unknown or empty codes yield an empty set; this never fails.
pub fn holidays_for(country_code: &str, year: i32) -> BTreeSet<NaiveDate> {
    match country_code.parse::<HolidayCountry>() {
        Ok(country) => country.holidays(year),
        Err(_) => {
            if !country_code.trim().is_empty() {
                tracing::debug!(country = country_code, "unknown holiday country");
            }
            BTreeSet::new()
        }
    }
}

/// [`holidays_for`] rendered as `YYYY-MM-DD` strings.
pub fn holidays_for_iso(country_code: &str, year: i32) -> BTreeSet<String> {
    holidays_for(country_code, year)
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect()
}

/// Holiday membership for one schedule: a bank holiday country plus the
/// merchant's custom dates, memoized per year.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    country: Option<HolidayCountry>,
    custom: BTreeSet<NaiveDate>,
    by_year: HashMap<i32, BTreeSet<NaiveDate>>,
}

impl HolidayCalendar {
    pub fn new(country: Option<HolidayCountry>, custom: BTreeSet<NaiveDate>) -> Self {
        Self {
            country,
            custom,
            by_year: HashMap::new(),
        }
    }

    /// Whether `date` is a custom holiday or a bank holiday of its own year.
    pub fn is_holiday(&mut self, date: NaiveDate) -> bool {
        if self.custom.contains(&date) {
            return true;
        }
        let Some(country) = self.country else {
            return false;
        };
        self.by_year
            .entry(date.year())
            .or_insert_with(|| country.holidays(date.year()))
            .contains(&date)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── Easter ──────────────────────────────────────────────────────────

    #[test]
    fn test_easter_reference_dates() {
        assert_eq!(easter_sunday(2024), date(2024, 3, 31));
        assert_eq!(easter_sunday(2025), date(2025, 4, 20));
        assert_eq!(easter_sunday(2027), date(2027, 3, 28));
    }

    #[test]
    fn test_easter_extremes() {
        // Earliest and latest possible Easter Sundays in living memory
        assert_eq!(easter_sunday(2008), date(2008, 3, 23));
        assert_eq!(easter_sunday(2038), date(2038, 4, 25));
        assert_eq!(easter_sunday(2000), date(2000, 4, 23));
        assert_eq!(easter_sunday(1961), date(1961, 4, 2));
    }

    #[test]
    fn test_easter_always_sunday() {
        for year in 1900..2200 {
            assert_eq!(easter_sunday(year).weekday(), Weekday::Sun, "year {year}");
        }
    }

    // ── nth_weekday_of_month ────────────────────────────────────────────

    #[test]
    fn test_third_monday_of_january() {
        assert_eq!(nth_weekday_of_month(2024, 1, Weekday::Mon, 3), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_last_monday_of_may() {
        assert_eq!(nth_weekday_of_month(2024, 5, Weekday::Mon, -1), Some(date(2024, 5, 27)));
        assert_eq!(nth_weekday_of_month(2025, 5, Weekday::Mon, -1), Some(date(2025, 5, 26)));
    }

    #[test]
    fn test_last_day_in_december_rolls_year() {
        assert_eq!(nth_weekday_of_month(2024, 12, Weekday::Tue, -1), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_first_weekday_is_first_of_month() {
        // 2024-05-01 is a Wednesday
        assert_eq!(nth_weekday_of_month(2024, 5, Weekday::Wed, 1), Some(date(2024, 5, 1)));
    }

    #[test]
    fn test_fifth_occurrence_missing() {
        // February 2023 has only four Mondays
        assert_eq!(nth_weekday_of_month(2023, 2, Weekday::Mon, 5), None);
    }

    #[test]
    fn test_zero_ordinal_is_none() {
        assert_eq!(nth_weekday_of_month(2024, 1, Weekday::Mon, 0), None);
    }

    #[test]
    fn test_invalid_month_is_none() {
        assert_eq!(nth_weekday_of_month(2024, 13, Weekday::Mon, 1), None);
    }

    // ── Country rulesets ────────────────────────────────────────────────

    #[test]
    fn test_gb_2024() {
        let h = holidays_for_iso("GB", 2024);
        for d in ["2024-01-01", "2024-03-29", "2024-04-01", "2024-12-25", "2024-12-26"] {
            assert!(h.contains(d), "missing {d}");
        }
        assert!(h.contains("2024-05-06"));
        assert!(h.contains("2024-05-27"));
        assert!(h.contains("2024-08-26"));
        assert_eq!(h.len(), 8);
    }

    #[test]
    fn test_gb_weekend_new_year_gets_monday() {
        // 2022-01-01 is a Saturday
        let h = holidays_for("GB", 2022);
        assert!(h.contains(&date(2022, 1, 1)));
        assert!(h.contains(&date(2022, 1, 3)));
    }

    #[test]
    fn test_gb_weekend_christmas_and_boxing_day() {
        // 2027: Christmas Saturday, Boxing Day Sunday
        let h = holidays_for("GB", 2027);
        assert!(h.contains(&date(2027, 12, 27)));
        assert!(h.contains(&date(2027, 12, 28)));
        assert!(!h.contains(&date(2027, 12, 29)));
        // 2022: Christmas Sunday, Boxing Day Monday, Christmas moves to Tuesday
        let h = holidays_for("GB", 2022);
        assert!(h.contains(&date(2022, 12, 26)));
        assert!(h.contains(&date(2022, 12, 27)));
        assert!(!h.contains(&date(2022, 12, 28)));
        // 2026: Christmas Friday, Boxing Day Saturday moves to Monday
        assert!(holidays_for("GB", 2026).contains(&date(2026, 12, 28)));
    }

    #[test]
    fn test_nz_day_after_new_year_substituted() {
        // 2022-01-01 Saturday and 2022-01-02 Sunday → Mon 3 and Tue 4
        let h = holidays_for("NZ", 2022);
        assert!(h.contains(&date(2022, 1, 3)));
        assert!(h.contains(&date(2022, 1, 4)));
    }

    #[test]
    fn test_us_weekend_holidays_not_substituted() {
        // 2022-12-25 is a Sunday
        assert!(!holidays_for("US", 2022).contains(&date(2022, 12, 26)));
    }

    #[test]
    fn test_uk_alias_and_case() {
        assert_eq!(holidays_for("uk", 2024), holidays_for("GB", 2024));
    }

    #[test]
    fn test_us_2024() {
        let h = holidays_for("US", 2024);
        assert!(h.contains(&date(2024, 1, 15))); // MLK
        assert!(h.contains(&date(2024, 5, 27))); // Memorial Day
        assert!(h.contains(&date(2024, 7, 4)));
        assert!(h.contains(&date(2024, 11, 28))); // Thanksgiving
        assert!(h.contains(&date(2024, 11, 11)));
    }

    #[test]
    fn test_fr_easter_relative() {
        let h = holidays_for("FR", 2024);
        assert!(h.contains(&date(2024, 5, 9))); // Ascension
        assert!(h.contains(&date(2024, 5, 20))); // Whit Monday
        assert!(h.contains(&date(2024, 7, 14)));
        assert!(!h.contains(&date(2024, 3, 29))); // no Good Friday
    }

    #[test]
    fn test_au_day_substituted_to_monday() {
        // 2025-01-26 is a Sunday
        let h = holidays_for("AU", 2025);
        assert!(h.contains(&date(2025, 1, 27)));
        assert!(!h.contains(&date(2025, 1, 26)));
        // 2024-01-26 is a Friday
        assert!(holidays_for("AU", 2024).contains(&date(2024, 1, 26)));
    }

    #[test]
    fn test_nz_saturday_moves_two_days() {
        // 2026-04-25 is a Saturday
        assert!(holidays_for("NZ", 2026).contains(&date(2026, 4, 27)));
    }

    #[test]
    fn test_ca_victoria_day() {
        // 2024-05-24 is a Friday; the Monday before is May 20
        assert!(holidays_for("CA", 2024).contains(&date(2024, 5, 20)));
        // 2021-05-24 is itself a Monday
        assert!(holidays_for("CA", 2021).contains(&date(2021, 5, 24)));
    }

    #[test]
    fn test_unknown_and_empty_country() {
        assert!(holidays_for("", 2024).is_empty());
        assert!(holidays_for("XX", 2024).is_empty());
        assert!("XX".parse::<HolidayCountry>().is_err());
    }

    #[test]
    fn test_every_country_resolves_every_rule() {
        for country in HolidayCountry::ALL {
            for year in 2020..2035 {
                let set = country.holidays(year);
                assert!(set.contains(&date(year, 1, 1)), "{country} {year}");
                assert!(set.iter().all(|d| d.year() == year));
            }
        }
    }

    #[test]
    fn test_country_round_trips_code() {
        for country in HolidayCountry::ALL {
            assert_eq!(country.code().parse::<HolidayCountry>().unwrap(), country);
        }
    }

    // ── HolidayCalendar ─────────────────────────────────────────────────

    #[test]
    fn test_calendar_custom_dates() {
        let custom: BTreeSet<_> = [date(2024, 7, 10)].into_iter().collect();
        let mut cal = HolidayCalendar::new(None, custom);
        assert!(cal.is_holiday(date(2024, 7, 10)));
        assert!(!cal.is_holiday(date(2024, 12, 25)));
    }

    #[test]
    fn test_calendar_uses_date_year() {
        let mut cal = HolidayCalendar::new(Some(HolidayCountry::GB), BTreeSet::new());
        assert!(cal.is_holiday(date(2024, 12, 26)));
        assert!(cal.is_holiday(date(2025, 1, 1)));
        // Good Friday 2025 is April 18, not 2024's March 29
        assert!(cal.is_holiday(date(2025, 4, 18)));
        assert!(!cal.is_holiday(date(2025, 3, 29)));
    }
}
