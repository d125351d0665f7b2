use analytics::{
    AnalyticsEngine, AnalyticsResult, RollingAnalyticsResult, RollingWindow,
    annualized_return_between_dates, z_score,
};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use configuration::AnalysisSettings;
use core_types::{Observation, Periodicity, ReturnSeries, WindowMode};
use tracing_subscriber::EnvFilter;

/// The main entry point for the psf analytics tool.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Returns and risk analytics for a series of periodic returns.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Spacing of the returns: daily, weekly or monthly. Overrides the settings file.
    #[arg(long, global = true)]
    periodicity: Option<Periodicity>,

    /// Annual risk-free rate as a fraction (0.03 for 3%). Overrides the settings file.
    #[arg(long, global = true, allow_negative_numbers = true)]
    risk_free_rate: Option<f64>,

    /// Print the result rows as JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cumulative return plus full-period annualized return, volatility and Sharpe ratio.
    Stats(SeriesArgs),
    /// The same statistics over a trailing window.
    Rolling(RollingArgs),
    /// How far the last value sits from the mean, in standard deviations.
    Zscore(SeriesArgs),
    /// Cumulative return annualized over a calendar date range.
    Annualized(AnnualizedArgs),
}

#[derive(Args)]
struct SeriesArgs {
    /// Name of the instrument, used in logs and JSON output.
    #[arg(long, default_value = "series")]
    name: String,

    /// One observation as DATE:RETURN, e.g. 2024-01-02:0.01. Repeat for every period.
    #[arg(long = "obs", value_parser = parse_observation, required = true)]
    observations: Vec<Observation>,
}

#[derive(Args)]
struct RollingArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Window length in years. Overrides the settings file.
    #[arg(long)]
    years: Option<u32>,

    /// legacy-monthly or periodicity-aware. Overrides the settings file.
    #[arg(long)]
    mode: Option<WindowMode>,
}

#[derive(Args)]
struct AnnualizedArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Start of the range (format: YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// End of the range (format: YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
}

fn parse_observation(s: &str) -> Result<Observation, String> {
    let (date, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected DATE:RETURN, got '{s}'"))?;
    let date = date
        .trim()
        .parse::<NaiveDate>()
        .map_err(|e| format!("invalid date '{date}': {e}"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid return '{value}': {e}"))?;
    Ok(Observation::new(date, value))
}

impl SeriesArgs {
    fn to_series(&self) -> anyhow::Result<ReturnSeries> {
        ReturnSeries::new(self.name.clone(), self.observations.clone())
            .with_context(|| format!("invalid observations for '{}'", self.name))
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Merges the loaded settings with the command-line overrides.
fn resolve_settings(cli: &Cli) -> anyhow::Result<AnalysisSettings> {
    let mut settings = configuration::load_config().context("failed to load settings")?;

    if let Some(periodicity) = cli.periodicity {
        settings.periodicity = periodicity;
    }
    if let Some(rate) = cli.risk_free_rate {
        settings.risk_free_rate = rate;
    }
    if let Commands::Rolling(args) = &cli.command {
        if let Some(years) = args.years {
            settings.rolling.years = years;
        }
        if let Some(mode) = args.mode {
            settings.rolling.mode = mode;
        }
    }

    settings.validate()?;
    Ok(settings)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = resolve_settings(&cli)?;
    let engine = AnalyticsEngine::new(settings.periodicity, settings.risk_free_rate);

    tracing::info!(
        periodicity = %settings.periodicity,
        risk_free_rate = settings.risk_free_rate,
        "Starting analysis"
    );

    match &cli.command {
        Commands::Stats(args) => {
            let result = engine.calculate(&args.to_series()?)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result.rows())?);
            } else {
                println!("{}", stats_table(&result));
            }
        }
        Commands::Rolling(args) => {
            let window = RollingWindow::new(settings.rolling.years, settings.rolling.mode);
            let result = engine.calculate_rolling(&args.series.to_series()?, window)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result.rows())?);
            } else {
                println!("{}", rolling_table(&result));
            }
        }
        Commands::Zscore(args) => {
            let series = args.to_series()?;
            let z = z_score(series.values());
            if cli.json {
                println!("{}", serde_json::json!({ "name": series.name(), "z_score": z }));
            } else {
                println!("{}: z-score {}", series.name(), fmt_number(z));
            }
        }
        Commands::Annualized(args) => {
            let series = args.series.to_series()?;
            let annualized = annualized_return_between_dates(&series, args.from, args.to);
            if cli.json {
                let rows: Vec<_> = series
                    .dates()
                    .iter()
                    .zip(&annualized)
                    .map(|(date, value)| serde_json::json!({ "date": date, "annualized_return": value }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                let mut table = Table::new();
                table.set_header(vec!["Date", "Annualized Return"]);
                for (date, value) in series.dates().iter().zip(&annualized) {
                    table.add_row(vec![date.to_string(), fmt_pct(*value)]);
                }
                println!("{table}");
            }
        }
    }

    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

fn fmt_pct(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value * 100.0)
    } else {
        "n/a".to_string()
    }
}

fn fmt_number(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "n/a".to_string()
    }
}

fn fmt_optional(value: Option<f64>, fmt: fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_default()
}

fn stats_table(result: &AnalyticsResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Date",
        "Cumulative Return",
        "Annualized Return",
        "Volatility",
        "Sharpe Ratio",
    ]);
    for row in result.rows() {
        table.add_row(vec![
            row.date.to_string(),
            fmt_pct(row.cumulative_return),
            fmt_pct(row.annualized_return),
            fmt_pct(row.volatility),
            fmt_number(row.sharpe_ratio),
        ]);
    }
    table
}

fn rolling_table(result: &RollingAnalyticsResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Date",
        "Cumulative Return",
        "Rolling Cumulative Return",
        "Annualized Return",
        "Rolling Volatility",
        "Rolling Sharpe",
    ]);
    for row in result.rows() {
        table.add_row(vec![
            row.date.to_string(),
            fmt_pct(row.cumulative_return),
            fmt_optional(row.rolling_cumulative_return, fmt_pct),
            fmt_optional(row.annualized_return, fmt_pct),
            fmt_optional(row.volatility, fmt_pct),
            fmt_optional(row.sharpe_ratio, fmt_number),
        ]);
    }
    table
}
