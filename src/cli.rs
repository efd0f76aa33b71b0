//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_alert_adapter::ConsoleAlertAdapter;
use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::csv_log_adapter::CsvLogAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestResult, TradeSide};
use crate::domain::bar::first_invalid_bar;
use crate::domain::config::{
    validate_indicator_config, validate_pipeline_config, validate_signal_config, IndicatorConfig,
    PipelineConfig, SignalConfig,
};
use crate::domain::error::BasketraderError;
use crate::domain::indicators::compute_indicators;
use crate::domain::signal::{generate_signals, signal_strength, Signal, SignalRow};
use crate::domain::summary::{build_summary, PerformanceSummary};
use crate::ports::alert_port::AlertSink;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataSource;
use crate::ports::summary_port::SummarySink;
use crate::ports::trade_port::TradeSink;

#[derive(Parser, Debug)]
#[command(name = "basketrader", about = "Rule-based signal pipeline and backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full basket pipeline: signals, backtests, logs, alerts
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Backtest a single ticker without touching the logs
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        ticker: String,
    },
    /// Show the available data range per ticker
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        ticker: Option<String>,
    },
    /// Validate the configuration and exit
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config } => run_pipeline(&config),
        Command::Backtest { config, ticker } => run_single_backtest(&config, &ticker),
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
        Command::Validate { config } => run_validate(&config),
    }
}

/// Everything the orchestration layer pulls out of the INI file.
#[derive(Debug)]
struct Settings {
    data_dir: PathBuf,
    output_dir: PathBuf,
    pipeline: PipelineConfig,
    indicators: IndicatorConfig,
    signals: SignalConfig,
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BasketraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn build_settings(config: &dyn ConfigPort) -> Result<Settings, BasketraderError> {
    let defaults = IndicatorConfig::default();
    let indicators = IndicatorConfig {
        rsi_window: config.get_int("indicators", "rsi_window", defaults.rsi_window as i64) as usize,
        short_window: config.get_int("indicators", "short_window", defaults.short_window as i64)
            as usize,
        long_window: config.get_int("indicators", "long_window", defaults.long_window as i64)
            as usize,
        volume_window: config.get_int("indicators", "volume_window", defaults.volume_window as i64)
            as usize,
        bollinger_window: config.get_int(
            "indicators",
            "bollinger_window",
            defaults.bollinger_window as i64,
        ) as usize,
        bollinger_mult: config.get_double("indicators", "bollinger_mult", defaults.bollinger_mult),
    };

    let defaults = SignalConfig::default();
    let signals = SignalConfig {
        rsi_strong_buy: config.get_double("signals", "rsi_strong_buy", defaults.rsi_strong_buy),
        rsi_buy: config.get_double("signals", "rsi_buy", defaults.rsi_buy),
        rsi_momentum_buy: config.get_double(
            "signals",
            "rsi_momentum_buy",
            defaults.rsi_momentum_buy,
        ),
        rsi_sell: config.get_double("signals", "rsi_sell", defaults.rsi_sell),
        rsi_strong_sell: config.get_double("signals", "rsi_strong_sell", defaults.rsi_strong_sell),
    };

    let defaults = PipelineConfig::default();
    let pipeline = PipelineConfig {
        tickers: config.get_list("pipeline", "tickers", &[]),
        period: config
            .get_string("pipeline", "period")
            .unwrap_or(defaults.period),
        interval: config
            .get_string("pipeline", "interval")
            .unwrap_or(defaults.interval),
        initial_capital: config.get_double(
            "pipeline",
            "initial_capital",
            defaults.initial_capital,
        ),
    };

    let settings = Settings {
        data_dir: config
            .get_string("data", "dir")
            .unwrap_or_else(|| "data/historical_data".to_string())
            .into(),
        output_dir: config
            .get_string("output", "dir")
            .unwrap_or_else(|| "data/outputs".to_string())
            .into(),
        pipeline,
        indicators,
        signals,
    };

    validate_indicator_config(&settings.indicators)?;
    validate_signal_config(&settings.signals)?;
    validate_pipeline_config(&settings.pipeline)?;
    Ok(settings)
}

fn load_settings(config_path: &PathBuf) -> Result<Settings, ExitCode> {
    let adapter = load_config(config_path)?;
    build_settings(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Fetch, validate and analyse one ticker's series end to end.
fn analyse_ticker(
    data: &dyn MarketDataSource,
    settings: &Settings,
    ticker: &str,
) -> Result<(Vec<SignalRow>, BacktestResult), BasketraderError> {
    let bars = data.fetch(ticker, &settings.pipeline.period, &settings.pipeline.interval)?;

    if let Some(index) = first_invalid_bar(&bars) {
        return Err(BasketraderError::MalformedSeries {
            ticker: ticker.to_string(),
            index,
            reason: "bars must be chronological with positive closes".to_string(),
        });
    }

    let rows = compute_indicators(ticker, &bars, &settings.indicators)?;
    let signals = generate_signals(&rows, &settings.signals);
    let result = run_backtest(&signals, settings.pipeline.initial_capital);
    Ok((signals, result))
}

/// One ticker's leg of the `run` pipeline, including sink side effects.
fn run_ticker(
    data: &dyn MarketDataSource,
    settings: &Settings,
    ticker: &str,
    logs: &mut CsvLogAdapter,
    alerts: &mut ConsoleAlertAdapter,
) -> Result<Option<PerformanceSummary>, BasketraderError> {
    let (signals, result) = analyse_ticker(data, settings, ticker)?;

    for trade in &result.trades {
        TradeSink::append(logs, ticker, trade)?;
    }

    let summary = build_summary(ticker, &signals, &result);
    if let Some(summary) = &summary {
        SummarySink::record(logs, summary)?;
    }

    // Alert on the newest bar only, and only when it fired a signal.
    if let Some(last) = signals.last() {
        let side = match last.signal {
            Signal::Buy => Some(TradeSide::Buy),
            Signal::Sell => Some(TradeSide::Sell),
            Signal::Hold => None,
        };
        if let Some(side) = side {
            let confidence = signal_strength(&last.row) / 100.0;
            alerts.notify(
                ticker,
                side,
                last.row.bar.close,
                last.row.rsi,
                Some(confidence),
            )?;
        }
    }

    Ok(summary)
}

fn run_pipeline(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let data = CsvDataAdapter::new(settings.data_dir.clone());
    let mut logs = CsvLogAdapter::new(settings.output_dir.clone());
    if let Err(e) = logs.initialize() {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let mut alerts = ConsoleAlertAdapter::new();

    eprintln!("Running basket of {} tickers", settings.pipeline.tickers.len());
    let mut summaries = Vec::new();
    for ticker in &settings.pipeline.tickers {
        eprintln!("Processing {ticker}...");
        match run_ticker(&data, &settings, ticker, &mut logs, &mut alerts) {
            Ok(Some(summary)) => {
                eprintln!(
                    "{}: return {:.2}%, {} trades, win rate {:.1}%",
                    ticker,
                    summary.return_pct,
                    summary.trade_count,
                    summary.win_rate * 100.0
                );
                summaries.push(summary);
            }
            Ok(None) => eprintln!("{ticker}: no rows after warmup, skipping"),
            Err(e) => eprintln!("warning: skipping {ticker}: {e}"),
        }
    }

    if let Err(e) = alerts.daily_summary(&summaries) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    ExitCode::SUCCESS
}

fn run_single_backtest(config_path: &PathBuf, ticker: &str) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let data = CsvDataAdapter::new(settings.data_dir.clone());
    let (signals, result) = match analyse_ticker(&data, &settings, ticker) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Backtest for {} ({} rows, {} to {})",
        ticker,
        signals.len(),
        signals[0].row.bar.date,
        signals[signals.len() - 1].row.bar.date
    );
    for trade in &result.trades {
        match trade.pnl {
            Some(pnl) => eprintln!(
                "{} {} {} x {:.2} (pnl {:+.2})",
                trade.date, trade.side, trade.quantity, trade.price, pnl
            ),
            None => eprintln!(
                "{} {} {} x {:.2}",
                trade.date, trade.side, trade.quantity, trade.price
            ),
        }
    }
    eprintln!(
        "Final value: {:.2} (return {:.2}%)",
        result.final_value,
        result.total_return * 100.0
    );
    eprintln!(
        "Trades: {} | wins: {} | win rate {:.1}%",
        result.trade_count,
        result.win_count,
        result.win_rate * 100.0
    );

    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, ticker: Option<&str>) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let data = CsvDataAdapter::new(settings.data_dir.clone());

    let tickers: Vec<String> = match ticker {
        Some(t) => vec![t.to_string()],
        None => match data.list_tickers() {
            Ok(t) => t,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for ticker in &tickers {
        match data.fetch(ticker, &settings.pipeline.period, &settings.pipeline.interval) {
            Ok(bars) => {
                let first = &bars[0];
                let last = &bars[bars.len() - 1];
                println!("{}: {} bars, {} to {}", ticker, bars.len(), first.date, last.date);
            }
            Err(e) => eprintln!("warning: {ticker}: {e}"),
        }
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    match load_settings(config_path) {
        Ok(settings) => {
            eprintln!(
                "Config OK: {} tickers, data dir {}, output dir {}",
                settings.pipeline.tickers.len(),
                settings.data_dir.display(),
                settings.output_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}
