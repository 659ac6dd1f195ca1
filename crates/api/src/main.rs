//! HRCal - HR calendar month view
//!
//! Usage: `hrcal [YEAR MONTH] [FILTER]`
//!
//! Prints the month view as JSON on stdout. Without a year and month the
//! current month is shown; `FILTER` is `all` or one event type.

use anyhow::{bail, Context};
use hrcal_domain::EventFilter;
use hrcal_infra::{config, init_tracing};
use hrcal_lib::{get_current_month_view, get_month_view, AppContext};

/// Parsed command-line arguments.
#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    month: Option<(i32, u32)>,
    filter: EventFilter,
}

fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let parse_filter = |raw: &str| raw.parse::<EventFilter>().context("invalid filter");
    let parse_month = |year: &str, month: &str| -> anyhow::Result<(i32, u32)> {
        let year = year.parse::<i32>().with_context(|| format!("invalid year '{year}'"))?;
        let month = month.parse::<u32>().with_context(|| format!("invalid month '{month}'"))?;
        Ok((year, month))
    };

    match args {
        [] => Ok(CliArgs { month: None, filter: EventFilter::All }),
        [filter] => Ok(CliArgs { month: None, filter: parse_filter(filter.as_str())? }),
        [year, month] => Ok(CliArgs {
            month: Some(parse_month(year.as_str(), month.as_str())?),
            filter: EventFilter::All,
        }),
        [year, month, filter] => Ok(CliArgs {
            month: Some(parse_month(year.as_str(), month.as_str())?),
            filter: parse_filter(filter.as_str())?,
        }),
        _ => bail!("usage: hrcal [YEAR MONTH] [FILTER]"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load().context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialise logging")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let ctx = AppContext::new(config).context("failed to build application context")?;
    let view = match cli.month {
        Some((year, month)) => get_month_view(&ctx, year, month, cli.filter).await?,
        None => get_current_month_view(&ctx, cli.filter).await?,
    };

    match view {
        Some(view) => println!("{}", serde_json::to_string_pretty(&view)?),
        None => tracing::warn!("month view superseded by a newer request"),
    }

    Ok(())
}
