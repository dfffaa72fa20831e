// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Symbolic reporting windows offered by the dashboard views.
///
/// `CurrentMonth` backs the dashboard and budget cards; the other four are
/// the user-selectable report tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    AllTime,
    LastMonth,
    LastYear,
    Year,
    CurrentMonth,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::AllTime => "all",
            Period::LastMonth => "last-month",
            Period::LastYear => "last-year",
            Period::Year => "year",
            Period::CurrentMonth => "current-month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim() {
            "all" => Ok(Period::AllTime),
            "last-month" => Ok(Period::LastMonth),
            "last-year" => Ok(Period::LastYear),
            "year" => Ok(Period::Year),
            "current-month" => Ok(Period::CurrentMonth),
            other => Err(Error::InvalidInput(format!(
                "unknown period '{}' (use all|last-month|last-year|year|current-month)",
                other
            ))),
        }
    }
}

/// Inclusive date window. `None` on either side means unbounded; `AllTime`
/// resolves to no filter at all rather than a sentinel date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub const UNBOUNDED: DateRange = DateRange {
        start: None,
        end: None,
    };
}

/// Maps a symbolic period to a concrete inclusive date range anchored at
/// `reference`. `Year` needs an explicit `year`; every other period ignores
/// it.
pub fn resolve(
    period: Period,
    reference: NaiveDate,
    year: Option<i32>,
) -> Result<DateRange, Error> {
    match period {
        Period::AllTime => Ok(DateRange::UNBOUNDED),
        Period::CurrentMonth => {
            let start = month_start(reference)?;
            Ok(DateRange {
                start: Some(start),
                end: Some(month_end(start)?),
            })
        }
        Period::LastMonth => {
            // Last day of the previous month is one day before this month
            // starts; rolls back across January into the prior year.
            let end = month_start(reference)? - Duration::days(1);
            Ok(DateRange {
                start: Some(month_start(end)?),
                end: Some(end),
            })
        }
        Period::LastYear => year_range(reference.year() - 1),
        Period::Year => {
            let y = year.ok_or_else(|| {
                Error::InvalidInput("period 'year' requires a year argument".into())
            })?;
            year_range(y)
        }
    }
}

fn month_start(date: NaiveDate) -> Result<NaiveDate, Error> {
    date.with_day(1)
        .ok_or_else(|| Error::InvalidInput(format!("no first day of month for {}", date)))
}

/// Last day of the month `start` opens. Stepping 32 days always lands in
/// the following month whatever the length of this one (leap Februaries
/// included); truncating back and subtracting a day gives the month end.
fn month_end(start: NaiveDate) -> Result<NaiveDate, Error> {
    Ok(month_start(start + Duration::days(32))? - Duration::days(1))
}

fn year_range(year: i32) -> Result<DateRange, Error> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| Error::InvalidInput(format!("year {} out of range", year)))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| Error::InvalidInput(format!("year {} out of range", year)))?;
    Ok(DateRange {
        start: Some(start),
        end: Some(end),
    })
}
