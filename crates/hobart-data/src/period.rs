//! Calendar month keys.
//!
//! All monthly research data in Hobart is keyed by `(year, month)` with
//! dates canonicalized to the last calendar day of the month. `Period`
//! is the typed form of that key used in configs and eager code; inside
//! polars plans the same information travels as the `year`/`month`
//! integer columns.

use chrono::{Datelike, NaiveDate};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A calendar month, the unit of observation for every table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("{year:04}-{month:02}")]
pub struct Period {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl Period {
    /// Create a period, returning `None` for an out-of-range month.
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The period containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Last calendar day of the period.
    pub fn month_end(self) -> NaiveDate {
        let (ny, nm) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        // First day of the following month is always constructible.
        NaiveDate::from_ymd_opt(ny, nm, 1)
            .expect("valid first-of-month date")
            .pred_opt()
            .expect("month end exists")
    }

    /// The following period.
    pub const fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding period.
    pub const fn pred(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Months elapsed since year zero; a sortable scalar form of the key.
    pub const fn index(self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }
}
