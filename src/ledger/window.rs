use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use super::transaction::Transaction;

/// The only accepted textual date layout.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A reference instant as supplied by a caller: either already structured or
/// raw text that still has to be parsed.
///
/// Parsing happens exactly once, at [`DateInput::resolve`]; everything
/// downstream operates on the structured instant only.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Timestamp(NaiveDateTime),
    Text(String),
}

impl DateInput {
    /// Resolves to a concrete instant. Text that does not match
    /// `YYYY-MM-DD HH:MM:SS` (including calendar-invalid dates) degrades to
    /// `fallback_now` instead of failing.
    pub fn resolve(&self, fallback_now: NaiveDateTime) -> NaiveDateTime {
        match self {
            DateInput::Timestamp(instant) => *instant,
            DateInput::Text(raw) => {
                match NaiveDateTime::parse_from_str(raw.trim(), DATE_INPUT_FORMAT) {
                    Ok(parsed) => parsed,
                    Err(_) => {
                        tracing::warn!(input = %raw, "unparseable date input, using current instant");
                        fallback_now
                    }
                }
            }
        }
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(instant: NaiveDateTime) -> Self {
        DateInput::Timestamp(instant)
    }
}

impl From<&str> for DateInput {
    fn from(raw: &str) -> Self {
        DateInput::Text(raw.to_string())
    }
}

impl From<String> for DateInput {
    fn from(raw: String) -> Self {
        DateInput::Text(raw)
    }
}

/// Period code selecting how far back a report window reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Monday 00:00:00 of the reference week.
    Week,
    /// Day 1 of the reference month, 00:00:00.
    Month,
    /// January 1 of the reference year, 00:00:00.
    Year,
    /// Earliest timestamp present in the ledger.
    All,
    /// Exactly three calendar months back from the reference instant.
    RollingQuarter,
}

impl Period {
    /// Maps the events-page selector codes; anything other than `W`/`M`/`Y`
    /// means the full history, mirroring the menu contract.
    pub fn from_code(code: &str) -> Period {
        match code.trim() {
            "W" => Period::Week,
            "M" => Period::Month,
            "Y" => Period::Year,
            _ => Period::All,
        }
    }
}

/// A closed date-time interval scoping a report. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Resolves a period code against a reference instant. `All` needs the
    /// ledger rows to find the earliest timestamp and yields `None` when the
    /// ledger is empty; every other mode always resolves.
    pub fn resolve(period: Period, reference: NaiveDateTime, rows: &[Transaction]) -> Option<Self> {
        match period {
            Period::Week => Some(Self::week(reference)),
            Period::Month => Some(Self::month(reference)),
            Period::Year => Some(Self::year(reference)),
            Period::All => Self::full_history(reference, rows),
            Period::RollingQuarter => Some(Self::rolling_quarter(reference)),
        }
    }

    pub fn week(reference: NaiveDateTime) -> Self {
        let monday = reference.date()
            - Duration::days(reference.date().weekday().num_days_from_monday() as i64);
        Self {
            start: midnight(monday),
            end: reference,
        }
    }

    pub fn month(reference: NaiveDateTime) -> Self {
        let first = reference.date().with_day(1).unwrap_or(reference.date());
        Self {
            start: midnight(first),
            end: reference,
        }
    }

    pub fn year(reference: NaiveDateTime) -> Self {
        let first = NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference.date());
        Self {
            start: midnight(first),
            end: reference,
        }
    }

    pub fn full_history(reference: NaiveDateTime, rows: &[Transaction]) -> Option<Self> {
        let earliest = rows.iter().map(|txn| txn.operation_date).min()?;
        Some(Self {
            start: earliest,
            end: reference,
        })
    }

    /// Exactly three calendar months back, same day-of-month rule as calendar
    /// subtraction (day clamped to the shorter month), time of day preserved.
    pub fn rolling_quarter(reference: NaiveDateTime) -> Self {
        let start_date = shift_months(reference.date(), -3);
        Self {
            start: start_date.and_time(reference.time()),
            end: reference,
        }
    }

    /// Whole calendar month `[day 1 00:00:00, last day 23:59:59]`.
    /// Returns `None` for a month outside `1..=12`.
    pub fn calendar_month(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
        Some(Self {
            start: midnight(first),
            end: last.and_hms_opt(23, 59, 59)?,
        })
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap()
}

fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}
