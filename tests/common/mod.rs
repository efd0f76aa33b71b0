#![allow(dead_code)]

use basketrader::domain::backtest::{Trade, TradeSide};
use basketrader::domain::bar::Bar;
use basketrader::domain::error::BasketraderError;
use basketrader::domain::summary::PerformanceSummary;
use basketrader::ports::alert_port::AlertSink;
use basketrader::ports::data_port::MarketDataSource;
use basketrader::ports::summary_port::SummarySink;
use basketrader::ports::trade_port::TradeSink;
use chrono::NaiveDate;
use std::collections::HashMap;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn make_bar(ticker: &str, date_str: &str, close: f64) -> Bar {
    Bar {
        ticker: ticker.to_string(),
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1_000,
    }
}

/// `count` consecutive daily bars starting 2024-01-01 with the given closes.
pub fn bars_from_closes(ticker: &str, closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            ticker: ticker.to_string(),
            date: date(2024, 1, 1) + chrono::Days::new(i as u64),
            open: close,
            high: close + 1.0,
            low: (close - 1.0).max(0.01),
            close,
            volume: 1_000 + (i as i64 % 7) * 100,
        })
        .collect()
}

/// A mildly mean-reverting series long enough to clear every warmup.
pub fn wavy_bars(ticker: &str, count: usize) -> Vec<Bar> {
    let closes: Vec<f64> = (0..count)
        .map(|i| 100.0 + ((i % 11) as f64 - 5.0) * 3.0)
        .collect();
    bars_from_closes(ticker, &closes)
}

pub struct MockDataSource {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl MarketDataSource for MockDataSource {
    fn fetch(
        &self,
        ticker: &str,
        _period: &str,
        _interval: &str,
    ) -> Result<Vec<Bar>, BasketraderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(BasketraderError::DataSource {
                reason: reason.clone(),
            });
        }
        match self.data.get(ticker) {
            Some(bars) if !bars.is_empty() => Ok(bars.clone()),
            _ => Err(BasketraderError::NoData {
                ticker: ticker.to_string(),
            }),
        }
    }

    fn list_tickers(&self) -> Result<Vec<String>, BasketraderError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}

#[derive(Default)]
pub struct RecordingTradeSink {
    pub trades: Vec<(String, Trade)>,
}

impl TradeSink for RecordingTradeSink {
    fn append(&mut self, ticker: &str, trade: &Trade) -> Result<(), BasketraderError> {
        self.trades.push((ticker.to_string(), trade.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSummarySink {
    pub summaries: Vec<PerformanceSummary>,
}

impl SummarySink for RecordingSummarySink {
    fn record(&mut self, summary: &PerformanceSummary) -> Result<(), BasketraderError> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAlertSink {
    pub notifications: Vec<(String, TradeSide, f64, f64, Option<f64>)>,
    pub daily_summaries: usize,
}

impl AlertSink for RecordingAlertSink {
    fn notify(
        &mut self,
        ticker: &str,
        side: TradeSide,
        price: f64,
        rsi: f64,
        confidence: Option<f64>,
    ) -> Result<(), BasketraderError> {
        self.notifications
            .push((ticker.to_string(), side, price, rsi, confidence));
        Ok(())
    }

    fn daily_summary(
        &mut self,
        _summaries: &[PerformanceSummary],
    ) -> Result<(), BasketraderError> {
        self.daily_summaries += 1;
        Ok(())
    }
}
