//! Market data access port trait.

use crate::domain::bar::Bar;
use crate::domain::error::BasketraderError;

pub trait MarketDataSource {
    /// Fetch chronological bars for one ticker. `period` and `interval` are
    /// source-specific hints (e.g. "6mo", "1d"); a source may ignore them.
    /// An empty result surfaces as `NoData`.
    fn fetch(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<Bar>, BasketraderError>;

    /// Tickers this source can serve.
    fn list_tickers(&self) -> Result<Vec<String>, BasketraderError>;
}
