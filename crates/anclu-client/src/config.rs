//! Report configuration.
//!
//! Values resolve in order: explicit override (command-line flag), then
//! environment variable, then built-in default.

use std::path::PathBuf;

use crate::dataset::DatasetSource;
use crate::period::MonthLocale;
use crate::report::ViewOptions;
use crate::{ClientError, ClientResult};

pub const DATA_ENV: &str = "ANCLU_DATA";
pub const LOCALE_ENV: &str = "ANCLU_LOCALE";
pub const TOP_N_ENV: &str = "ANCLU_TOP_N";

pub const DEFAULT_DATASET_FILE: &str = "ventas_anclu.csv";
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data: Option<String>,
    pub delimiter: Option<char>,
    pub locale: Option<MonthLocale>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub source: DatasetSource,
    pub delimiter: Option<u8>,
    pub locale: MonthLocale,
    pub top_n: usize,
}

impl ReportConfig {
    pub fn resolve(overrides: ConfigOverrides) -> ClientResult<Self> {
        Self::resolve_with_env(overrides, |key| std::env::var(key).ok())
    }

    pub fn resolve_with_env<F>(overrides: ConfigOverrides, env: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_value = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let source = match overrides.data.or_else(|| env_value(DATA_ENV)) {
            Some(value) => DatasetSource::from_arg(value.trim()),
            None => DatasetSource::File(PathBuf::from(DEFAULT_DATASET_FILE)),
        };

        let delimiter = overrides.delimiter.map(delimiter_byte).transpose()?;

        let locale = match overrides.locale {
            Some(locale) => locale,
            None => match env_value(LOCALE_ENV) {
                Some(value) => MonthLocale::parse(&value).ok_or_else(|| {
                    ClientError::invalid_env_value(LOCALE_ENV, &value, "`es` or `en`")
                })?,
                None => MonthLocale::default(),
            },
        };

        let top_n = match overrides.top_n {
            Some(value) => value,
            None => match env_value(TOP_N_ENV) {
                Some(value) => value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|parsed| *parsed > 0)
                    .ok_or_else(|| {
                        ClientError::invalid_env_value(TOP_N_ENV, &value, "a positive integer")
                    })?,
                None => DEFAULT_TOP_N,
            },
        };

        Ok(Self {
            source,
            delimiter,
            locale,
            top_n,
        })
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            locale: self.locale,
            top_n: self.top_n,
        }
    }
}

fn delimiter_byte(value: char) -> ClientResult<u8> {
    if value.is_ascii() && !value.is_ascii_alphanumeric() && value != '"' && value != '\n' {
        return Ok(value as u8);
    }
    Err(ClientError::invalid_argument_for_command(
        &format!("Delimiter `{value}` is not usable; pick a single ASCII punctuation or tab."),
        None,
    ))
}
