//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_dividend_adapter::CsvDividendAdapter;
use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::calendar::HoldPolicy;
use crate::domain::dividend::DividendRecord;
use crate::domain::error::TradesimError;
use crate::domain::price_table::PriceTable;
use crate::domain::simulate::{simulate, TradeRequest, TradeResult};
use crate::ports::config_port::ConfigPort;
use crate::ports::dividend_port::DividendPort;
use crate::ports::price_port::PricePort;

/// Fallback price locations when neither CLI nor config supplies any.
const DEFAULT_PRICE_CANDIDATES: [&str; 2] =
    ["prices_close_wide.csv", "../prices_close_wide.csv"];

#[derive(Parser, Debug)]
#[command(name = "tradesim", about = "Single buy/sell trade simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate one trade: buy, hold, sell, report profit and dividends
    Simulate {
        /// Ticker token (e.g. 3382_T or 1332.T)
        ticker: String,
        /// Requested buy date (YYYY-MM-DD)
        buy_date: String,
        /// Requested sell date (YYYY-MM-DD) or hold length in trading days
        sell_or_hold: String,
        /// Candidate price CSV paths, first existing wins (repeatable)
        #[arg(long)]
        prices: Vec<PathBuf>,
        /// Explicit dividend CSV path
        #[arg(long)]
        dividends: Option<PathBuf>,
        /// Skip the dividend check entirely
        #[arg(long)]
        no_dividends: bool,
        /// Fail instead of clamping when the hold runs past the data
        #[arg(long)]
        strict_hold: bool,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List ticker columns in the price table
    ListTickers {
        #[arg(long)]
        prices: Vec<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the price table's date range and size
    Info {
        #[arg(long)]
        prices: Vec<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            ticker,
            buy_date,
            sell_or_hold,
            prices,
            dividends,
            no_dividends,
            strict_hold,
            config,
        } => run_simulate(
            &ticker,
            &buy_date,
            &sell_or_hold,
            &prices,
            dividends.as_ref(),
            no_dividends,
            strict_hold,
            config.as_ref(),
        ),
        Command::ListTickers { prices, config } => run_list_tickers(&prices, config.as_ref()),
        Command::Info { prices, config } => run_info(&prices, config.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TradesimError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Candidate order: CLI flags, then config `[data] prices`, then the
/// built-in defaults.
pub fn resolve_price_candidates(
    cli_paths: &[PathBuf],
    config: Option<&dyn ConfigPort>,
) -> Vec<PathBuf> {
    if !cli_paths.is_empty() {
        return cli_paths.to_vec();
    }

    if let Some(paths) = config.and_then(|c| c.get_string("data", "prices")) {
        let parsed: Vec<PathBuf> = paths
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
        if !parsed.is_empty() {
            return parsed;
        }
    }

    DEFAULT_PRICE_CANDIDATES.iter().map(PathBuf::from).collect()
}

/// Interpret the third positional argument: an integer is a hold
/// length in trading days, anything else is a sell date request.
pub fn parse_sell_or_hold(arg: &str) -> (Option<String>, Option<u32>) {
    match arg.trim().parse::<u32>() {
        Ok(hold) => (None, Some(hold)),
        Err(_) => (Some(arg.to_string()), None),
    }
}

pub fn resolve_hold_policy(strict_flag: bool, config: Option<&dyn ConfigPort>) -> HoldPolicy {
    let strict =
        strict_flag || config.is_some_and(|c| c.get_bool("simulate", "strict_hold", false));
    if strict {
        HoldPolicy::Strict
    } else {
        HoldPolicy::Clamp
    }
}

fn load_price_table(
    cli_paths: &[PathBuf],
    config: Option<&dyn ConfigPort>,
) -> Result<PriceTable, TradesimError> {
    let candidates = resolve_price_candidates(cli_paths, config);
    CsvPriceAdapter::new(candidates).load_prices()
}

/// Gather dividend records for the ticker, or `None` when the check is
/// disabled or no local data exists.
fn load_dividends(
    ticker: &str,
    explicit: Option<&PathBuf>,
    no_dividends: bool,
    price_candidates: &[PathBuf],
    config: Option<&dyn ConfigPort>,
) -> Result<Option<Vec<DividendRecord>>, TradesimError> {
    if no_dividends {
        return Ok(None);
    }

    let explicit = explicit
        .cloned()
        .or_else(|| config.and_then(|c| c.get_string("data", "dividends").map(PathBuf::from)));
    if let Some(path) = explicit {
        return CsvDividendAdapter::with_explicit_path(path).fetch_dividends(ticker);
    }

    // Probe next to the price candidates, then the working directory.
    let mut dirs: Vec<PathBuf> = Vec::new();
    for candidate in price_candidates {
        let dir = candidate
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    let cwd = PathBuf::from(".");
    if !dirs.contains(&cwd) {
        dirs.push(cwd);
    }

    CsvDividendAdapter::new(dirs).fetch_dividends(ticker)
}

#[allow(clippy::too_many_arguments)]
fn run_simulate(
    ticker: &str,
    buy_date: &str,
    sell_or_hold: &str,
    prices: &[PathBuf],
    dividends_path: Option<&PathBuf>,
    no_dividends: bool,
    strict_hold: bool,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match config_path.map(load_config).transpose() {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let table = match load_price_table(prices, config_port) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let candidates = resolve_price_candidates(prices, config_port);
    let dividend_records = match load_dividends(
        ticker,
        dividends_path,
        no_dividends,
        &candidates,
        config_port,
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if dividend_records.is_none() && !no_dividends {
        eprintln!("note: no dividend data found for {ticker}; dividend check disabled");
    }

    let (sell_date, hold_days) = parse_sell_or_hold(sell_or_hold);
    let request = TradeRequest {
        ticker: ticker.to_string(),
        buy_date: buy_date.to_string(),
        sell_date,
        hold_days,
    };
    let policy = resolve_hold_policy(strict_hold, config_port);

    match simulate(&request, &table, dividend_records.as_deref(), policy) {
        Ok(result) => {
            print_result(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn print_result(result: &TradeResult) {
    println!("Buy date:    {}", result.buy_date);
    println!("Sell date:   {}", result.sell_date);
    println!("Buy price:   {:.2}", result.buy_price);
    println!("Sell price:  {:.2}", result.sell_price);
    println!("Profit:      {:.4}%", result.profit_pct);
    println!(
        "Dividend in holding period: {}",
        if result.dividend_occurred { "yes" } else { "no" }
    );
}

fn run_list_tickers(prices: &[PathBuf], config_path: Option<&PathBuf>) -> ExitCode {
    let config = match config_path.map(load_config).transpose() {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    match load_price_table(prices, config_port) {
        Ok(table) => {
            for column in table.columns() {
                println!("{column}");
            }
            eprintln!("{} tickers found", table.columns().len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(prices: &[PathBuf], config_path: Option<&PathBuf>) -> ExitCode {
    let config = match config_path.map(load_config).transpose() {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    match load_price_table(prices, config_port) {
        Ok(table) => {
            let days = table.trading_days();
            match (days.first(), days.last()) {
                (Some(first), Some(last)) => {
                    println!(
                        "{} trading days, {} to {}, {} tickers",
                        table.len(),
                        first,
                        last,
                        table.columns().len()
                    );
                }
                _ => println!("price table is empty"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
