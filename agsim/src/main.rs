//! agsim CLI: Monte Carlo forecast of silver prices in INR per gram.

use std::fs;
use std::path::{Path, PathBuf};

use agsim::core::{ForecastConfig, PriceSeries};
use agsim::data::{load_price_series, save_ensemble, to_inr_per_gram, ColumnNames};
use agsim::{Forecast, ForecastReport};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

const RESULTS_CSV: &str = "simulation_results.csv";
const SUMMARY_JSON: &str = "summary.json";

#[derive(Parser)]
#[command(name = "agsim")]
#[command(about = "Monte Carlo forecast of silver prices in INR with geometric Brownian motion")]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate, simulate and analyse a forecast
    Forecast {
        /// CSV of prices already in INR per gram
        #[arg(
            long,
            conflicts_with_all = ["silver", "fx"],
            required_unless_present_all = ["silver", "fx"]
        )]
        prices: Option<PathBuf>,

        /// CSV of silver prices in USD per troy ounce
        #[arg(long, requires = "fx")]
        silver: Option<PathBuf>,

        /// CSV of USD/INR exchange rates
        #[arg(long, requires = "silver")]
        fx: Option<PathBuf>,

        /// Name of the date column
        #[arg(long, default_value = "date")]
        date_column: String,

        /// Name of the price column
        #[arg(long, default_value = "price")]
        price_column: String,

        /// JSON configuration file; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of simulated paths
        #[arg(short, long)]
        paths: Option<usize>,

        /// Forecast horizon in trading days
        #[arg(short, long)]
        days: Option<usize>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Confidence level of the price interval
        #[arg(long)]
        confidence: Option<f64>,

        /// Simulate on the calling thread only
        #[arg(long)]
        sequential: bool,

        /// Output directory for the path CSV and the JSON summary
        #[arg(short, long, default_value = "output")]
        out: PathBuf,
    },

    /// Print the default configuration as JSON
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Forecast {
            prices,
            silver,
            fx,
            date_column,
            price_column,
            config,
            paths,
            days,
            seed,
            confidence,
            sequential,
            out,
        } => {
            let columns = ColumnNames::new(date_column, price_column);
            let overrides = Overrides {
                paths,
                days,
                seed,
                confidence,
                sequential,
            };
            Input::from_args(prices, silver, fx).and_then(|input| {
                cmd_forecast(&input, &columns, config.as_deref(), &overrides, &out)
            })
        }
        Commands::Config => cmd_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

enum Input {
    Inr(PathBuf),
    SilverUsd { silver: PathBuf, fx: PathBuf },
}

impl Input {
    fn from_args(
        prices: Option<PathBuf>,
        silver: Option<PathBuf>,
        fx: Option<PathBuf>,
    ) -> Result<Self> {
        match (prices, silver, fx) {
            (Some(p), None, None) => Ok(Input::Inr(p)),
            (None, Some(silver), Some(fx)) => Ok(Input::SilverUsd { silver, fx }),
            _ => bail!("give either --prices, or both --silver and --fx"),
        }
    }
}

struct Overrides {
    paths: Option<usize>,
    days: Option<usize>,
    seed: Option<u64>,
    confidence: Option<f64>,
    sequential: bool,
}

impl Overrides {
    fn apply(&self, cfg: &mut ForecastConfig) {
        if let Some(n) = self.paths {
            cfg.num_paths = n;
        }
        if let Some(d) = self.days {
            cfg.horizon_days = d;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(c) = self.confidence {
            cfg.interval_confidence = c;
        }
        if self.sequential {
            cfg.parallel = false;
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ForecastConfig> {
    let Some(path) = path else {
        return Ok(ForecastConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_history(input: &Input, columns: &ColumnNames) -> Result<PriceSeries> {
    match input {
        Input::Inr(path) => load_price_series(path, columns)
            .with_context(|| format!("loading prices from {}", path.display())),
        Input::SilverUsd { silver, fx } => {
            let silver_usd = load_price_series(silver, columns)
                .with_context(|| format!("loading silver prices from {}", silver.display()))?;
            let usd_inr = load_price_series(fx, columns)
                .with_context(|| format!("loading exchange rates from {}", fx.display()))?;
            to_inr_per_gram(&silver_usd, &usd_inr).context("converting to INR per gram")
        }
    }
}

fn cmd_forecast(
    input: &Input,
    columns: &ColumnNames,
    config: Option<&Path>,
    overrides: &Overrides,
    out: &Path,
) -> Result<()> {
    let mut cfg = load_config(config)?;
    overrides.apply(&mut cfg);

    let history = load_history(input, columns)?;
    let forecast = Forecast::run(&history, &cfg).context("running forecast")?;
    let (report, ensemble) = forecast.into_parts();

    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let csv_path = out.join(RESULTS_CSV);
    save_ensemble(&csv_path, &ensemble)
        .with_context(|| format!("writing {}", csv_path.display()))?;
    let json_path = out.join(SUMMARY_JSON);
    let json = serde_json::to_string_pretty(&report).context("serialising summary")?;
    fs::write(&json_path, json).with_context(|| format!("writing {}", json_path.display()))?;
    info!(dir = %out.display(), "results written");

    print_summary(&report);
    Ok(())
}

fn cmd_config() -> Result<()> {
    let json = serde_json::to_string_pretty(&ForecastConfig::default())?;
    println!("{json}");
    Ok(())
}

fn print_summary(r: &ForecastReport) {
    let h = &r.historical;
    let o = &r.outcome;
    println!("Silver Price Forecast (INR/gram)");
    println!("================================");
    println!("As of:                 {}", r.as_of);
    println!("Latest price:          {:.2}", h.latest_price);
    println!("Annualised volatility: {:.2}%", h.annualized_volatility * 100.0);
    println!("Max drawdown:          {:.2}%", h.max_drawdown * 100.0);
    if let Some(s) = h.sharpe_ratio {
        println!("Sharpe ratio:          {s:.2}");
    }
    println!();
    println!(
        "Horizon:               {} days, {} paths (seed {})",
        r.parameters.num_days(),
        o.paths,
        r.seed
    );
    println!("Expected price:        {:.2}", o.mean);
    println!("Median price:          {:.2}", o.median);
    println!(
        "{:.0}% interval:          {:.2} .. {:.2}",
        o.interval.level * 100.0,
        o.interval.lower,
        o.interval.upper
    );
    println!("P(loss):               {:.1}%", o.prob_loss * 100.0);
    for g in &o.gain_probabilities {
        println!(
            "P(gain > {:>3.0}%):        {:.1}%",
            g.threshold * 100.0,
            g.probability * 100.0
        );
    }
    for t in &o.tail_risk {
        println!(
            "VaR / CVaR {:.0}%:        {:.2}% / {:.2}%",
            t.confidence_level * 100.0,
            t.var * 100.0,
            t.cvar * 100.0
        );
    }
}
