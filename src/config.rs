// =============================================================================
// Runtime Configuration
// =============================================================================
//
// Every tunable parameter of the bot lives here: the symbols to watch, the
// candle timeframe and lookback, the MA/RSI periods and thresholds, order
// sizing, and the polling cadence.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::AccountMode;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbols() -> Vec<String> {
    vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()]
}

fn default_interval() -> String {
    "30m".to_string()
}

fn default_lookback() -> u32 {
    200
}

fn default_ma_short() -> usize {
    20
}

fn default_ma_long() -> usize {
    50
}

fn default_rsi_period() -> usize {
    14
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_order_quantity() -> f64 {
    0.01
}

fn default_stop_loss_pct() -> f64 {
    2.0
}

fn default_take_profit_pct() -> f64 {
    4.0
}

fn default_poll_secs() -> u64 {
    60
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Demo (simulated fills) or Live (signed orders to the venue).
    #[serde(default)]
    pub account_mode: AccountMode,

    /// Symbols the bot evaluates each cycle.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Candle timeframe requested from the venue (e.g. "30m").
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Number of candles fetched per evaluation.
    #[serde(default = "default_lookback")]
    pub lookback: u32,

    /// Short simple-moving-average period.
    #[serde(default = "default_ma_short")]
    pub ma_short: usize,

    /// Long simple-moving-average period.
    #[serde(default = "default_ma_long")]
    pub ma_long: usize,

    /// RSI smoothing period.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// A bullish crossover is suppressed when RSI is at or above this.
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// A bearish crossover is suppressed when RSI is at or below this.
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    /// Market-order quantity in base units.
    #[serde(default = "default_order_quantity")]
    pub order_quantity: f64,

    /// Stop-loss distance from the entry price, in percent.
    #[serde(default = "default_stop_loss_pct")]
    pub stop_loss_pct: f64,

    /// Take-profit distance from the entry price, in percent.
    #[serde(default = "default_take_profit_pct")]
    pub take_profit_pct: f64,

    /// Seconds between polling cycles.
    #[serde(default = "default_poll_secs")]
    pub poll_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            account_mode: AccountMode::Demo,
            symbols: default_symbols(),
            interval: default_interval(),
            lookback: default_lookback(),
            ma_short: default_ma_short(),
            ma_long: default_ma_long(),
            rsi_period: default_rsi_period(),
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            order_quantity: default_order_quantity(),
            stop_loss_pct: default_stop_loss_pct(),
            take_profit_pct: default_take_profit_pct(),
            poll_secs: default_poll_secs(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbols = ?config.symbols,
            interval = %config.interval,
            account_mode = %config.account_mode,
            "config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "config saved (atomic)");
        Ok(())
    }

    /// Reject parameter combinations the engine cannot evaluate.
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            anyhow::bail!("at least one symbol is required");
        }
        if self.ma_short == 0 || self.rsi_period == 0 {
            anyhow::bail!("indicator periods must be at least 1");
        }
        if self.ma_short >= self.ma_long {
            anyhow::bail!(
                "ma_short ({}) must be smaller than ma_long ({})",
                self.ma_short,
                self.ma_long
            );
        }
        if self.rsi_oversold >= self.rsi_overbought {
            anyhow::bail!(
                "rsi_oversold ({}) must be below rsi_overbought ({})",
                self.rsi_oversold,
                self.rsi_overbought
            );
        }
        let required = self.ma_long.max(self.rsi_period) + 1;
        if (self.lookback as usize) < required {
            anyhow::bail!(
                "lookback ({}) is below the minimum of {} for the configured periods",
                self.lookback,
                required
            );
        }
        if self.order_quantity <= 0.0 {
            anyhow::bail!("order_quantity must be positive");
        }
        if self.poll_secs == 0 {
            anyhow::bail!("poll_secs must be at least 1");
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.account_mode, AccountMode::Demo);
        assert_eq!(cfg.symbols, vec!["BTCUSDT", "ETHUSDT"]);
        assert_eq!(cfg.interval, "30m");
        assert_eq!(cfg.lookback, 200);
        assert_eq!(cfg.ma_short, 20);
        assert_eq!(cfg.ma_long, 50);
        assert_eq!(cfg.rsi_period, 14);
        assert!((cfg.rsi_overbought - 70.0).abs() < f64::EPSILON);
        assert!((cfg.rsi_oversold - 30.0).abs() < f64::EPSILON);
        assert_eq!(cfg.poll_secs, 60);
    }

    #[test]
    fn default_config_validates() {
        RuntimeConfig::default().validate().unwrap();
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.account_mode, AccountMode::Demo);
        assert_eq!(cfg.ma_short, 20);
        assert_eq!(cfg.ma_long, 50);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "symbols": ["SOLUSDT"], "interval": "5m" }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.symbols, vec!["SOLUSDT"]);
        assert_eq!(cfg.interval, "5m");
        assert_eq!(cfg.lookback, 200);
        assert_eq!(cfg.rsi_period, 14);
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = RuntimeConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.symbols, cfg2.symbols);
        assert_eq!(cfg.ma_long, cfg2.ma_long);
        assert_eq!(cfg.poll_secs, cfg2.poll_secs);
    }

    #[test]
    fn save_then_load_roundtrips_through_a_file() {
        let path = std::env::temp_dir().join(format!(
            "crossline-config-{}.json",
            uuid::Uuid::new_v4()
        ));

        let mut cfg = RuntimeConfig::default();
        cfg.symbols = vec!["SOLUSDT".to_string()];
        cfg.poll_secs = 5;
        cfg.save(&path).unwrap();

        let loaded = RuntimeConfig::load(&path).unwrap();
        assert_eq!(loaded.symbols, vec!["SOLUSDT"]);
        assert_eq!(loaded.poll_secs, 5);
        assert_eq!(loaded.ma_long, cfg.ma_long);

        // The atomic rename leaves no tmp sibling behind.
        assert!(!path.with_extension("json.tmp").exists());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "crossline-config-missing-{}.json",
            uuid::Uuid::new_v4()
        ));
        assert!(RuntimeConfig::load(&path).is_err());
    }

    #[test]
    fn validate_rejects_inverted_ma_periods() {
        let mut cfg = RuntimeConfig::default();
        cfg.ma_short = 50;
        cfg.ma_long = 20;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_rsi_thresholds() {
        let mut cfg = RuntimeConfig::default();
        cfg.rsi_oversold = 80.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_short_lookback() {
        let mut cfg = RuntimeConfig::default();
        cfg.lookback = 50; // ma_long 50 needs at least 51
        assert!(cfg.validate().is_err());
        cfg.lookback = 51;
        cfg.validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_quantity_and_poll() {
        let mut cfg = RuntimeConfig::default();
        cfg.order_quantity = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = RuntimeConfig::default();
        cfg.poll_secs = 0;
        assert!(cfg.validate().is_err());
    }
}
