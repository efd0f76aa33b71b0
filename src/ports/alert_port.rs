//! Alert sink port trait.

use crate::domain::backtest::TradeSide;
use crate::domain::error::BasketraderError;
use crate::domain::summary::PerformanceSummary;

pub trait AlertSink {
    /// Notify about the newest terminal signal for a ticker. `confidence`
    /// is a 0-1 score when the engine has one.
    fn notify(
        &mut self,
        ticker: &str,
        side: TradeSide,
        price: f64,
        rsi: f64,
        confidence: Option<f64>,
    ) -> Result<(), BasketraderError>;

    /// End-of-run digest across the whole basket.
    fn daily_summary(&mut self, summaries: &[PerformanceSummary]) -> Result<(), BasketraderError>;
}
