//! Console alert adapter.
//!
//! Formats alerts onto stderr in the shape a chat-bot transport would send
//! them. Delivery over an actual messaging service is a separate adapter
//! concern; this one keeps the pipeline observable without credentials.

use crate::domain::backtest::TradeSide;
use crate::domain::error::BasketraderError;
use crate::domain::summary::PerformanceSummary;
use crate::ports::alert_port::AlertSink;

#[derive(Default)]
pub struct ConsoleAlertAdapter;

impl ConsoleAlertAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl AlertSink for ConsoleAlertAdapter {
    fn notify(
        &mut self,
        ticker: &str,
        side: TradeSide,
        price: f64,
        rsi: f64,
        confidence: Option<f64>,
    ) -> Result<(), BasketraderError> {
        eprintln!("=== TRADING ALERT ===");
        eprintln!("Ticker: {}", ticker);
        eprintln!("Action: {}", side);
        eprintln!("Price: {:.2}", price);
        eprintln!("RSI: {:.1}", rsi);
        if let Some(confidence) = confidence {
            eprintln!("Confidence: {:.1}%", confidence * 100.0);
        }
        eprintln!();
        Ok(())
    }

    fn daily_summary(&mut self, summaries: &[PerformanceSummary]) -> Result<(), BasketraderError> {
        eprintln!("=== DAILY TRADING SUMMARY ===");

        let mut total_return = 0.0;
        let mut total_trades = 0usize;

        for summary in summaries {
            total_return += summary.return_pct;
            total_trades += summary.trade_count;

            let status = if summary.return_pct > 0.0 {
                "PROFIT"
            } else if summary.return_pct < 0.0 {
                "LOSS"
            } else {
                "NO TRADES"
            };

            eprintln!("{} - {}", summary.ticker, status);
            eprintln!("  Return: {:.2}%", summary.return_pct);
            eprintln!("  Win Rate: {:.1}%", summary.win_rate * 100.0);
            eprintln!("  Trades: {}", summary.trade_count);
        }

        let avg_return = if summaries.is_empty() {
            0.0
        } else {
            total_return / summaries.len() as f64
        };
        eprintln!("--- OVERALL PERFORMANCE ---");
        eprintln!("Avg Return: {:.2}%", avg_return);
        eprintln!("Total Trades: {}", total_trades);
        Ok(())
    }
}
