//! `periods` - compute reporting period boundaries and lookbacks from the shell.
//!
//! Every command prints JSON on stdout. Diagnostics go to stderr and are
//! controlled by `RUST_LOG` or `-v`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use period_engine::{
    available_time_zones, default_lookback_count, format_interval, formatter_for,
    interval_millis, lookback, period_interval, period_interval_with_formatter,
    supported_granularities, time_zone, CalendarLocale, EnglishUnitLabels, Moment,
    PeriodOptions,
};

/// Calendar-aware period boundaries and lookback windows.
#[derive(Parser, Debug)]
#[command(name = "periods", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct ReferenceArgs {
    /// Reference instant (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<String>,

    /// IANA time zone; an empty value means the host zone
    #[arg(long, default_value = "UTC")]
    tz: String,

    /// Locale tag, e.g. en-US or de_DE
    #[arg(long, default_value = "en-US")]
    locale: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Begin and end of the period containing the reference instant
    Interval {
        /// hour, day, week, month, quarter, semester or year
        granularity: String,

        /// Whole units to move the period by (negative = earlier)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i32,

        /// Extra days added to week, month and year starts
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        day_offset: i32,

        /// Extra months added to year starts
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        month_offset: i32,

        /// Include the period's label and pattern
        #[arg(long)]
        label: bool,

        #[command(flatten)]
        args: ReferenceArgs,
    },
    /// The instant N units before the reference instant
    Lookback {
        granularity: String,

        /// Number of units including the current one; defaults per granularity
        #[arg(long, allow_hyphen_values = true)]
        count: Option<i32>,

        #[command(flatten)]
        args: ReferenceArgs,
    },
    /// Label of the period containing the reference instant
    Label {
        granularity: String,

        #[command(flatten)]
        args: ReferenceArgs,
    },
    /// Supported granularities and their default lookback counts
    Granularities,
    /// Localized weekday and month names
    Names {
        #[arg(long, default_value = "en-US")]
        locale: String,
    },
    /// Available time zones (restricted by PERIOD_ENGINE_TIME_ZONES_AVAILABLE)
    Zones,
    /// Render the time between two instants
    Humanize {
        from: String,
        thru: String,

        /// Number of units to show
        #[arg(long, default_value_t = 2)]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = run(cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<Value> {
    match command {
        Command::Interval {
            granularity,
            shift,
            day_offset,
            month_offset,
            label,
            args,
        } => {
            let options = PeriodOptions {
                shift,
                day_offset,
                month_offset,
                ..options(&args)?
            };
            let at = reference_moment(&args)?.unwrap_or_else(Moment::now);
            debug!(%granularity, %at, shift, "computing interval");
            let interval = if label {
                period_interval_with_formatter(&granularity, at, &options)?
            } else {
                period_interval(&granularity, at, &options)?
            };
            let mut value = serde_json::to_value(&interval)?;
            if let Some(text) = interval.label() {
                value["label"] = json!(text);
            }
            Ok(value)
        }
        Command::Lookback {
            granularity,
            count,
            args,
        } => {
            let options = options(&args)?;
            let moment = lookback(&granularity, count, reference_moment(&args)?, &options)?;
            Ok(json!({
                "granularity": granularity,
                "count": count,
                "moment": moment,
            }))
        }
        Command::Label {
            granularity,
            args,
        } => {
            let formatter = formatter_for(&granularity, &options(&args)?)?;
            let at = reference_moment(&args)?.unwrap_or_else(Moment::now);
            Ok(json!({
                "pattern": formatter,
                "label": formatter.format(&at),
            }))
        }
        Command::Granularities => {
            let rows = supported_granularities()
                .into_iter()
                .map(|name| -> Result<Value> {
                    Ok(json!({
                        "name": name,
                        "default_lookback_count": default_lookback_count(name)?,
                    }))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(rows))
        }
        Command::Names { locale } => {
            let locale = CalendarLocale::parse(&locale)?;
            Ok(json!({
                "locale": locale.tag(),
                "first_day_of_week": locale.first_day_of_week(),
                "minimal_days_in_first_week": locale.minimal_days_in_first_week(),
                "weekdays": locale.weekday_names(),
                "months": locale.month_names(),
            }))
        }
        Command::Zones => Ok(json!(available_time_zones()
            .iter()
            .map(|tz| tz.name())
            .collect::<Vec<_>>())),
        Command::Humanize { from, thru, count } => {
            let from: Moment = from.parse().context("parsing FROM")?;
            let thru: Moment = thru.parse().context("parsing THRU")?;
            let millis = interval_millis(&from, &thru);
            Ok(json!({
                "millis": millis,
                "text": format_interval(millis, count, &EnglishUnitLabels),
            }))
        }
    }
}

fn options(args: &ReferenceArgs) -> Result<PeriodOptions> {
    Ok(PeriodOptions {
        timezone: time_zone(&args.tz)?,
        locale: CalendarLocale::parse(&args.locale)?,
        ..PeriodOptions::default()
    })
}

fn reference_moment(args: &ReferenceArgs) -> Result<Option<Moment>> {
    args
        .at
        .as_deref()
        .map(|s| s.parse::<Moment>().context("parsing --at"))
        .transpose()
}
