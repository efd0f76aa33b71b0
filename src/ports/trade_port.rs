//! Trade ledger sink port trait.

use crate::domain::backtest::Trade;
use crate::domain::error::BasketraderError;

pub trait TradeSink {
    /// Append one executed trade to the ledger. Append-only; a sink never
    /// rewrites earlier entries.
    fn append(&mut self, ticker: &str, trade: &Trade) -> Result<(), BasketraderError>;
}
