use std::collections::BTreeSet;

use anclu_client::config::ConfigOverrides;
use anclu_client::period::{MonthLocale, parse_month};
use anclu_client::report::Selection;
use clap::{Parser, Subcommand};

pub fn parse_month_arg(value: &str) -> Result<u32, String> {
    parse_month(value)
        .ok_or_else(|| "month must be 1-12 or a month name (e.g. `8`, `agosto`, `August`)".to_string())
}

pub fn parse_locale_arg(value: &str) -> Result<MonthLocale, String> {
    MonthLocale::parse(value).ok_or_else(|| "locale must be `es` or `en`".to_string())
}

pub fn parse_delimiter_arg(value: &str) -> Result<char, String> {
    if matches!(value, "tab" | "\\t") {
        return Ok('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(single), None) => Ok(single),
        _ => Err("delimiter must be a single character, or `tab`".to_string()),
    }
}

pub fn parse_top_arg(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .ok()
        .filter(|parsed| *parsed > 0)
        .ok_or_else(|| "top must be a positive integer".to_string())
}

/// Extended help shown after `anclu session --help`.
pub const SESSION_AFTER_HELP: &str = "\
How a session works:
  The sales file is read once, then every stdin line renders one report.
  Each line is a space-separated list of `key=value` selections:

    year=2024 month=8
    year=2024 month=agosto cc=CC01,CC02 top=5
    cc=                       (empty cost-center set: matches nothing)

  Keys: year, month (1-12 or a month name), cc (comma-separated cost
  centers), top (rows per ranking). Unset keys use the defaults: latest
  year, first month with data, all cost centers.
  Blank lines and lines starting with `#` are skipped. A bad line prints
  an error and the session keeps going.

  Because lines come from stdin, `--data -` is not available here.
";

#[derive(Debug, Parser)]
#[command(
    name = "anclu",
    version,
    about = "monthly sales report for point-of-sale exports",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Sales CSV path, or `-` for stdin (default: $ANCLU_DATA, then ./ventas_anclu.csv)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<String>,
    /// Field delimiter; sniffed from the header when omitted
    #[arg(long, global = true, value_parser = parse_delimiter_arg)]
    pub delimiter: Option<char>,
    /// Month-name language: es or en (default: $ANCLU_LOCALE, then es)
    #[arg(long, global = true, value_parser = parse_locale_arg)]
    pub locale: Option<MonthLocale>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the years, months and cost centers available for selection
    Periods {
        /// Only list months for this year
        #[arg(long)]
        year: Option<i32>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show one month's sales compared against the month before
    Report {
        /// Year to report (default: most recent year with data)
        #[arg(long)]
        year: Option<i32>,
        /// Month to report, 1-12 or a name (default: first month with data)
        #[arg(long, value_parser = parse_month_arg)]
        month: Option<u32>,
        /// Restrict to these cost centers (repeat or comma-separate)
        #[arg(
            long = "cost-center",
            value_name = "ID",
            value_delimiter = ',',
            conflicts_with = "no_cost_center"
        )]
        cost_center: Vec<String>,
        /// Select an empty cost-center set (matches no records)
        #[arg(long)]
        no_cost_center: bool,
        /// Rows per ranking (default: $ANCLU_TOP_N, then 10)
        #[arg(long, value_parser = parse_top_arg)]
        top: Option<usize>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Render one report per stdin line against a single load of the data
    #[command(after_long_help = SESSION_AFTER_HELP)]
    Session {
        /// Emit one JSON object per line instead of text reports
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn config_overrides(&self) -> ConfigOverrides {
        let top_n = match &self.command {
            Commands::Report { top, .. } => *top,
            Commands::Periods { .. } | Commands::Session { .. } => None,
        };
        ConfigOverrides {
            data: self.data.clone(),
            delimiter: self.delimiter,
            locale: self.locale,
            top_n,
        }
    }
}

pub fn report_selection(
    year: Option<i32>,
    month: Option<u32>,
    cost_center: &[String],
    no_cost_center: bool,
) -> Selection {
    let cost_centers = if no_cost_center {
        Some(BTreeSet::new())
    } else if cost_center.is_empty() {
        None
    } else {
        Some(
            cost_center
                .iter()
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect(),
        )
    };
    Selection {
        year,
        month,
        cost_centers,
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use anclu_client::period::MonthLocale;
    use clap::error::ErrorKind;

    use super::{Commands, parse_delimiter_arg, parse_from, report_selection};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 10] = [
            vec!["anclu", "periods"],
            vec!["anclu", "periods", "--year", "2024", "--json"],
            vec!["anclu", "report"],
            vec!["anclu", "report", "--year", "2024", "--month", "8"],
            vec!["anclu", "report", "--month", "agosto", "--json"],
            vec!["anclu", "report", "--cost-center", "CC1", "--cost-center", "CC2"],
            vec!["anclu", "report", "--cost-center", "CC1,CC2", "--top", "3"],
            vec!["anclu", "report", "--no-cost-center"],
            vec!["anclu", "session", "--json"],
            vec!["anclu", "--data", "-", "--locale", "en", "periods"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let parsed = parse_from([
            "anclu",
            "report",
            "--data",
            "ventas.csv",
            "--delimiter",
            ";",
            "--locale",
            "en",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(cli.data.as_deref(), Some("ventas.csv"));
            assert_eq!(cli.delimiter, Some(';'));
            assert_eq!(cli.locale, Some(MonthLocale::En));
        }
    }

    #[test]
    fn month_names_parse_to_numbers() {
        let parsed = parse_from(["anclu", "report", "--month", "Septiembre"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Report {
                    month: Some(9),
                    ..
                }
            ));
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let rejected: [Vec<&str>; 5] = [
            vec!["anclu", "report", "--month", "13"],
            vec!["anclu", "report", "--month", "brumaire"],
            vec!["anclu", "report", "--top", "0"],
            vec!["anclu", "--locale", "fr", "periods"],
            vec!["anclu", "report", "--no-cost-center", "--cost-center", "CC1"],
        ];
        for case in rejected {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_err(), "expected rejection: {case:?}");
        }
    }

    #[test]
    fn top_flag_flows_into_config_overrides() {
        let parsed = parse_from(["anclu", "report", "--top", "4"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(cli.config_overrides().top_n, Some(4));
        }
    }

    #[test]
    fn delimiter_accepts_tab_alias() {
        assert_eq!(parse_delimiter_arg("tab"), Ok('\t'));
        assert_eq!(parse_delimiter_arg(";"), Ok(';'));
        assert!(parse_delimiter_arg(";;").is_err());
    }

    #[test]
    fn cost_center_flags_build_selection() {
        let all = report_selection(None, None, &[], false);
        assert!(all.cost_centers.is_none());

        let none = report_selection(None, None, &[], true);
        assert_eq!(none.cost_centers, Some(BTreeSet::new()));

        let some = report_selection(
            Some(2024),
            Some(8),
            &["CC2".to_string(), " CC1 ".to_string()],
            false,
        );
        let expected = ["CC1", "CC2"]
            .iter()
            .map(|value| value.to_string())
            .collect::<BTreeSet<String>>();
        assert_eq!(some.cost_centers, Some(expected));
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["anclu", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["anclu", "session", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
