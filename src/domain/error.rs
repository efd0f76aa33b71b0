//! Domain error types.

/// Top-level error type for basketrader.
#[derive(Debug, thiserror::Error)]
pub enum BasketraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("insufficient data for {ticker}: have {bars} bars, need {minimum}")]
    InsufficientData {
        ticker: String,
        bars: usize,
        minimum: usize,
    },

    #[error("malformed bar series for {ticker} at index {index}: {reason}")]
    MalformedSeries {
        ticker: String,
        index: usize,
        reason: String,
    },

    #[error("sink error: {reason}")]
    Sink { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BasketraderError> for std::process::ExitCode {
    fn from(err: &BasketraderError) -> Self {
        let code: u8 = match err {
            BasketraderError::Io(_) => 1,
            BasketraderError::ConfigParse { .. }
            | BasketraderError::ConfigMissing { .. }
            | BasketraderError::ConfigInvalid { .. } => 2,
            BasketraderError::DataSource { .. } => 3,
            BasketraderError::NoData { .. }
            | BasketraderError::InsufficientData { .. }
            | BasketraderError::MalformedSeries { .. } => 5,
            BasketraderError::Sink { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
