use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use delivery_engine::local_time::parse_now;
use delivery_engine::{easter_sunday, render, HolidayCountry, ScheduleSettings, Surface};

#[derive(Parser)]
#[command(name = "delivery-estimate", version, about = "Preview delivery date estimates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate shipping and delivery dates from a settings file
    Estimate {
        /// JSON settings document ({"global": {...}, "rule": {...}})
        #[arg(short, long)]
        config: PathBuf,

        /// Order instant as RFC 3339 (defaults to the current time)
        #[arg(long)]
        now: Option<String>,

        /// Render only this surface (admin or storefront); both when omitted
        #[arg(long)]
        surface: Option<Surface>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List bank holidays for a country and year
    Holidays {
        #[arg(long)]
        country: String,

        #[arg(long)]
        year: i32,

        #[arg(long)]
        json: bool,
    },
    /// Print the date of Easter Sunday
    Easter {
        #[arg(long)]
        year: i32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Estimate {
            config,
            now,
            surface,
            json,
        } => run_estimate(&config, now.as_deref(), surface, json),
        Command::Holidays {
            country,
            year,
            json,
        } => run_holidays(&country, year, json),
        Command::Easter { year } => {
            println!("{}", easter_sunday(year));
            Ok(())
        }
    }
}

fn run_estimate(
    path: &Path,
    now: Option<&str>,
    surface: Option<Surface>,
    json: bool,
) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let settings = ScheduleSettings::from_json(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let schedule = settings.resolve();
    tracing::debug!(?schedule, "resolved schedule");

    let now: DateTime<FixedOffset> = match now {
        Some(s) => parse_now(s).context("invalid --now")?,
        None => Utc::now().fixed_offset(),
    };

    let surfaces = match surface {
        Some(s) => vec![s],
        None => Surface::ALL.to_vec(),
    };
    let rendered: Vec<_> = surfaces
        .into_iter()
        .map(|s| render(s, &schedule, &now))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        for r in &rendered {
            println!(
                "{}: ships {}, arrives {}",
                r.surface, r.shipping_label, r.delivery_label
            );
        }
    }
    Ok(())
}

fn run_holidays(country: &str, year: i32, json: bool) -> Result<()> {
    let country: HolidayCountry = country.parse().context("unsupported --country")?;
    let dates: Vec<String> = country
        .holidays(year)
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    if json {
        println!("{}", serde_json::to_string(&dates)?);
    } else {
        for d in dates {
            println!("{d}");
        }
    }
    Ok(())
}
