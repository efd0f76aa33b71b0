//! Append-only CSV logging adapter for trades and summaries.
//!
//! Writes `trade_log.csv` and `summary.csv` under the configured output
//! directory. `initialize` creates the directory and header rows once;
//! later appends never rewrite earlier lines, so the logs survive across
//! runs as a growing ledger.

use crate::domain::backtest::Trade;
use crate::domain::error::BasketraderError;
use crate::domain::summary::PerformanceSummary;
use crate::ports::summary_port::SummarySink;
use crate::ports::trade_port::TradeSink;
use std::fs;
use std::path::{Path, PathBuf};

const TRADE_LOG_HEADER: &[&str] = &[
    "Timestamp",
    "Ticker",
    "Signal",
    "Price",
    "Quantity",
    "PnL",
    "RSI",
    "DMA_20",
    "DMA_50",
    "MACD",
    "Volume_Ratio",
];

const SUMMARY_HEADER: &[&str] = &[
    "Ticker",
    "StartDate",
    "EndDate",
    "InitialCapital",
    "FinalValue",
    "ReturnPct",
    "WinRate",
    "TotalTrades",
];

pub struct CsvLogAdapter {
    output_dir: PathBuf,
}

impl CsvLogAdapter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn trade_log_path(&self) -> PathBuf {
        self.output_dir.join("trade_log.csv")
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join("summary.csv")
    }

    /// Create the output directory and write header rows for any log file
    /// that does not exist yet.
    pub fn initialize(&self) -> Result<(), BasketraderError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| BasketraderError::Sink {
            reason: format!(
                "failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ),
        })?;

        write_header_if_missing(&self.trade_log_path(), TRADE_LOG_HEADER)?;
        write_header_if_missing(&self.summary_path(), SUMMARY_HEADER)?;
        Ok(())
    }
}

fn write_header_if_missing(path: &Path, header: &[&str]) -> Result<(), BasketraderError> {
    if path.exists() {
        return Ok(());
    }
    let mut writer = csv::Writer::from_path(path).map_err(|e| BasketraderError::Sink {
        reason: format!("failed to create {}: {}", path.display(), e),
    })?;
    writer.write_record(header).map_err(|e| BasketraderError::Sink {
        reason: format!("failed to write header to {}: {}", path.display(), e),
    })?;
    writer.flush().map_err(|e| BasketraderError::Sink {
        reason: format!("failed to flush {}: {}", path.display(), e),
    })?;
    Ok(())
}

fn append_record(path: &Path, record: &[String]) -> Result<(), BasketraderError> {
    let file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| BasketraderError::Sink {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(record).map_err(|e| BasketraderError::Sink {
        reason: format!("failed to append to {}: {}", path.display(), e),
    })?;
    writer.flush().map_err(|e| BasketraderError::Sink {
        reason: format!("failed to flush {}: {}", path.display(), e),
    })?;
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

impl TradeSink for CsvLogAdapter {
    fn append(&mut self, ticker: &str, trade: &Trade) -> Result<(), BasketraderError> {
        let record = vec![
            trade.date.format("%Y-%m-%d").to_string(),
            ticker.to_string(),
            trade.side.to_string(),
            format!("{:.2}", trade.price),
            trade.quantity.to_string(),
            optional(trade.pnl),
            format!("{:.2}", trade.rsi),
            format!("{:.2}", trade.ma_short),
            optional(trade.ma_long),
            format!("{:.4}", trade.macd),
            optional(trade.volume_ratio),
        ];
        append_record(&self.trade_log_path(), &record)
    }
}

impl SummarySink for CsvLogAdapter {
    fn record(&mut self, summary: &PerformanceSummary) -> Result<(), BasketraderError> {
        let record = vec![
            summary.ticker.clone(),
            summary.start_date.format("%Y-%m-%d").to_string(),
            summary.end_date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", summary.initial_capital),
            format!("{:.2}", summary.final_value),
            format!("{:.2}", summary.return_pct),
            format!("{:.4}", summary.win_rate),
            summary.trade_count.to_string(),
        ];
        append_record(&self.summary_path(), &record)
    }
}
