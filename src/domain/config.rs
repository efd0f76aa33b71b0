//! Engine configuration values.
//!
//! Every tunable the engines consume lives here as an explicit value passed
//! in at call sites; there is no ambient global state. Defaults mirror the
//! stock NIFTY-basket setup (RSI 14, DMA 20/50, capital 100k).

use super::error::BasketraderError;

/// Windows for the indicator engine.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub rsi_window: usize,
    pub short_window: usize,
    pub long_window: usize,
    pub volume_window: usize,
    pub bollinger_window: usize,
    pub bollinger_mult: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            rsi_window: 14,
            short_window: 20,
            long_window: 50,
            volume_window: 20,
            bollinger_window: 20,
            bollinger_mult: 2.0,
        }
    }
}

/// RSI thresholds for the signal state machine.
///
/// Both historical rule variants are reachable here: raising
/// `rsi_strong_sell` above 100 disables the ungated overbought sell and
/// leaves only the position-gated exits.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    pub rsi_strong_buy: f64,
    pub rsi_buy: f64,
    pub rsi_momentum_buy: f64,
    pub rsi_sell: f64,
    pub rsi_strong_sell: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig {
            rsi_strong_buy: 25.0,
            rsi_buy: 30.0,
            rsi_momentum_buy: 40.0,
            rsi_sell: 65.0,
            rsi_strong_sell: 70.0,
        }
    }
}

/// Basket-level settings consumed by the orchestration layer.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub tickers: Vec<String>,
    pub period: String,
    pub interval: String,
    pub initial_capital: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            tickers: Vec::new(),
            period: "6mo".into(),
            interval: "1d".into(),
            initial_capital: 100_000.0,
        }
    }
}

fn invalid(key: &str, reason: &str) -> BasketraderError {
    BasketraderError::ConfigInvalid {
        section: "indicators".into(),
        key: key.into(),
        reason: reason.into(),
    }
}

pub fn validate_indicator_config(config: &IndicatorConfig) -> Result<(), BasketraderError> {
    if config.rsi_window < 2 {
        return Err(invalid("rsi_window", "must be at least 2"));
    }
    if config.short_window == 0 || config.long_window == 0 {
        return Err(invalid("short_window", "windows must be nonzero"));
    }
    if config.short_window >= config.long_window {
        return Err(invalid(
            "short_window",
            "short window must be smaller than long window",
        ));
    }
    if config.volume_window == 0 || config.bollinger_window == 0 {
        return Err(invalid("volume_window", "windows must be nonzero"));
    }
    if config.bollinger_mult <= 0.0 {
        return Err(invalid("bollinger_mult", "multiplier must be positive"));
    }
    Ok(())
}

pub fn validate_signal_config(config: &SignalConfig) -> Result<(), BasketraderError> {
    let ordered = config.rsi_strong_buy < config.rsi_buy
        && config.rsi_buy < config.rsi_momentum_buy
        && config.rsi_momentum_buy < config.rsi_sell
        && config.rsi_sell < config.rsi_strong_sell;
    if !ordered {
        return Err(BasketraderError::ConfigInvalid {
            section: "signals".into(),
            key: "rsi thresholds".into(),
            reason: "must be strictly increasing: strong_buy < buy < momentum_buy < sell < strong_sell"
                .into(),
        });
    }
    Ok(())
}

pub fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), BasketraderError> {
    if config.tickers.is_empty() {
        return Err(BasketraderError::ConfigMissing {
            section: "pipeline".into(),
            key: "tickers".into(),
        });
    }
    if config.initial_capital <= 0.0 {
        return Err(BasketraderError::ConfigInvalid {
            section: "pipeline".into(),
            key: "initial_capital".into(),
            reason: "must be positive".into(),
        });
    }
    Ok(())
}
