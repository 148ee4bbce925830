use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{ClientError, ClientResult};

const MONTHS_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Language used for month display names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthLocale {
    #[default]
    Es,
    En,
}

impl MonthLocale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "es" | "spanish" | "espanol" | "español" => Some(Self::Es),
            "en" | "english" => Some(Self::En),
            _ => None,
        }
    }

    fn names(self) -> &'static [&'static str; 12] {
        match self {
            Self::Es => &MONTHS_ES,
            Self::En => &MONTHS_EN,
        }
    }
}

/// A reporting month. Construction validates `month` so every `Period` in
/// circulation is in 1..=12, and keeps `year` inside the range chrono can
/// represent so stepping back a month never overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> ClientResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ClientError::invalid_month(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ClientError::invalid_year(year));
        }
        Ok(Self { year, month })
    }

    pub(crate) fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    /// The calendar month immediately before this one.
    pub const fn previous(self) -> Self {
        if self.month > 1 {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        } else {
            Self {
                year: self.year - 1,
                month: 12,
            }
        }
    }

    pub fn month_name(self, locale: MonthLocale) -> &'static str {
        month_name(self.month, locale).unwrap_or("?")
    }

    pub fn label(self, locale: MonthLocale) -> String {
        format!("{} {}", self.month_name(locale), self.year)
    }
}

pub fn month_name(month: u32, locale: MonthLocale) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    locale.names().get(index).copied()
}

/// Resolves a month given as a number (`8`, `08`) or as a Spanish or English
/// name in any case.
pub fn parse_month(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }

    let lowered = trimmed.to_lowercase();
    if lowered == "setiembre" {
        return Some(9);
    }
    [MONTHS_ES, MONTHS_EN].iter().find_map(|names| {
        names
            .iter()
            .position(|name| name.to_lowercase() == lowered)
            .and_then(|index| u32::try_from(index + 1).ok())
    })
}
