//! Lookback periods offered for a price history request.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid period {input:?}: expected one of 1mo, 3mo, 6mo, 1y")]
    InvalidInput { input: String },
}

/// How far back a price history request reaches from its end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    /// Every period in display order.
    pub const ALL: [Period; 4] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
        }
    }

    /// Length of the lookback in calendar months.
    pub const fn months(&self) -> u32 {
        match self {
            Period::OneMonth => 1,
            Period::ThreeMonths => 3,
            Period::SixMonths => 6,
            Period::OneYear => 12,
        }
    }

    /// Start of the window that ends at `end`.
    ///
    /// Month arithmetic clamps to the last valid day, so the start of a one
    /// month window ending on March 31st is February 28th (or 29th).
    pub fn start_before(&self, end: DateTime<Utc>) -> DateTime<Utc> {
        end.checked_sub_months(Months::new(self.months()))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Ok(Period::OneMonth),
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" | "12mo" => Ok(Period::OneYear),
            _ => Err(PeriodError::InvalidInput {
                input: s.to_string(),
            }),
        }
    }
}
