//! CSV file market data adapter.
//!
//! Serves bars from `{dir}/{ticker}.csv` files laid out as
//! `Date,Open,High,Low,Close,Volume`. Period and interval hints are
//! accepted for interface compatibility and ignored; a file holds whatever
//! history was exported into it.

use crate::domain::bar::Bar;
use crate::domain::error::BasketraderError;
use crate::ports::data_port::MarketDataSource;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn column<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, BasketraderError> {
    record.get(index).ok_or_else(|| BasketraderError::DataSource {
        reason: format!("missing {} column", name),
    })
}

fn parse_f64(value: &str, name: &str) -> Result<f64, BasketraderError> {
    value.parse().map_err(|e| BasketraderError::DataSource {
        reason: format!("invalid {} value: {}", name, e),
    })
}

impl MarketDataSource for CsvDataAdapter {
    fn fetch(
        &self,
        ticker: &str,
        _period: &str,
        _interval: &str,
    ) -> Result<Vec<Bar>, BasketraderError> {
        let path = self.csv_path(ticker);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BasketraderError::NoData {
                    ticker: ticker.to_string(),
                });
            }
            Err(e) => {
                return Err(BasketraderError::DataSource {
                    reason: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BasketraderError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = column(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                BasketraderError::DataSource {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            let open = parse_f64(column(&record, 1, "open")?, "open")?;
            let high = parse_f64(column(&record, 2, "high")?, "high")?;
            let low = parse_f64(column(&record, 3, "low")?, "low")?;
            let close = parse_f64(column(&record, 4, "close")?, "close")?;
            let volume: i64 = column(&record, 5, "volume")?.parse().map_err(|e| {
                BasketraderError::DataSource {
                    reason: format!("invalid volume value: {}", e),
                }
            })?;

            bars.push(Bar {
                ticker: ticker.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        if bars.is_empty() {
            return Err(BasketraderError::NoData {
                ticker: ticker.to_string(),
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_tickers(&self) -> Result<Vec<String>, BasketraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| BasketraderError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BasketraderError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(ticker) = name_str.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}
