//! Performance summary sink port trait.

use crate::domain::error::BasketraderError;
use crate::domain::summary::PerformanceSummary;

pub trait SummarySink {
    /// Record one ticker's summary line. Append-only.
    fn record(&mut self, summary: &PerformanceSummary) -> Result<(), BasketraderError>;
}
