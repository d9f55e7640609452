//! Calendar-aligned periods inferred from a table's time index.
//!
//! Source datasets are expected to cover exactly one calendar month. The
//! first and last timestamps of the index are snapped outward to the bounds
//! of their enclosing months; any snapping, and any range that spans more
//! than one month, is reported as a non-fatal [`PeriodWarning`].

use std::fmt;

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Inclusive `[start_ts, end_ts]` range of unix seconds.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
pub struct Period {
  pub start_ts: i64,
  pub end_ts:   i64,
}

impl Period {
  pub fn new(start_ts: i64, end_ts: i64) -> Self { Self { start_ts, end_ts } }
}

/// Time zone used to decide which calendar month a timestamp belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
  #[default]
  Local,
  Utc,
}

/// A non-fatal condition raised while normalizing a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodWarning {
  StartSnapped { from: i64, to: i64 },
  EndSnapped { from: i64, to: i64 },
  /// Start and end land in different `(month, year)` pairs. Aggregates over
  /// such a range are unreliable.
  SpansMonths {
    start: (u32, i32),
    end:   (u32, i32),
  },
}

impl fmt::Display for PeriodWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::StartSnapped { from, to } => write!(
        f,
        "inferring time range start to the first second of the month {from} -> {to}"
      ),
      Self::EndSnapped { from, to } => write!(
        f,
        "inferring time range end to the last second of the month {from} -> {to}"
      ),
      Self::SpansMonths { start, end } => write!(
        f,
        "start ({}/{}) and end ({}/{}) belong to different months; results \
         will most likely be broken",
        start.0, start.1, end.0, end.1
      ),
    }
  }
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
  pub period:   Period,
  pub warnings: Vec<PeriodWarning>,
}

// ─── Calendar helpers ────────────────────────────────────────────────────────

fn at<Tz: TimeZone>(tz: &Tz, ts: i64) -> Result<DateTime<Tz>> {
  tz.timestamp_opt(ts, 0)
    .single()
    .ok_or(Error::InvalidTimestamp(ts))
}

fn month_start<Tz: TimeZone>(tz: &Tz, year: i32, month: u32) -> Option<i64> {
  tz.with_ymd_and_hms(year, month, 1, 0, 0, 0)
    .earliest()
    .map(|dt| dt.timestamp())
}

/// First and last second of the calendar month containing `ts`.
pub fn month_bounds_in<Tz: TimeZone>(tz: &Tz, ts: i64) -> Result<Period> {
  let dt = at(tz, ts)?;
  let (year, month) = (dt.year(), dt.month());
  let (next_year, next_month) =
    if month == 12 { (year + 1, 1) } else { (year, month + 1) };

  let first =
    month_start(tz, year, month).ok_or(Error::InvalidTimestamp(ts))?;
  let next = month_start(tz, next_year, next_month)
    .ok_or(Error::InvalidTimestamp(ts))?;
  Ok(Period::new(first, next - 1))
}

fn month_of<Tz: TimeZone>(tz: &Tz, ts: i64) -> Result<(u32, i32)> {
  let dt = at(tz, ts)?;
  Ok((dt.month(), dt.year()))
}

// ─── Normalization ───────────────────────────────────────────────────────────

/// Normalize an ascending time index in an explicit time zone.
pub fn normalize_in<Tz: TimeZone>(tz: &Tz, times: &[i64]) -> Result<Normalized> {
  let (Some(&first), Some(&last)) = (times.first(), times.last()) else {
    return Err(Error::EmptyRange);
  };

  let mut warnings = Vec::new();

  let start = month_bounds_in(tz, first)?.start_ts;
  if start != first {
    warnings.push(PeriodWarning::StartSnapped {
      from: first,
      to:   start,
    });
  }

  let end = month_bounds_in(tz, last)?.end_ts;
  if end != last {
    warnings.push(PeriodWarning::EndSnapped { from: last, to: end });
  }

  let start_month = month_of(tz, first)?;
  let end_month = month_of(tz, last)?;
  if start_month != end_month {
    warnings.push(PeriodWarning::SpansMonths {
      start: start_month,
      end:   end_month,
    });
  }

  for warning in &warnings {
    match warning {
      PeriodWarning::SpansMonths { .. } => tracing::error!("{warning}"),
      _ => tracing::warn!("{warning}"),
    }
  }

  Ok(Normalized {
    period: Period::new(start, end),
    warnings,
  })
}

/// Normalize an ascending time index, placing timestamps in `zone`.
///
/// Fails with [`Error::EmptyRange`] when `times` is empty.
pub fn normalize(zone: Zone, times: &[i64]) -> Result<Normalized> {
  match zone {
    Zone::Local => normalize_in(&Local, times),
    Zone::Utc => normalize_in(&Utc, times),
  }
}

fn readable_in<Tz: TimeZone>(tz: &Tz, period: Period) -> Result<String>
where
  Tz::Offset: fmt::Display,
{
  let start = at(tz, period.start_ts)?;
  let end = at(tz, period.end_ts)?;
  let first = start.format("%B %Y").to_string();
  if (start.month(), start.year()) == (end.month(), end.year()) {
    Ok(first)
  } else {
    Ok(format!("{first} - {}", end.format("%B %Y")))
  }
}

/// Human-readable label for a period, e.g. `"January 2024"`.
pub fn readable_period(zone: Zone, period: Period) -> Result<String> {
  match zone {
    Zone::Local => readable_in(&Local, period),
    Zone::Utc => readable_in(&Utc, period),
  }
}
