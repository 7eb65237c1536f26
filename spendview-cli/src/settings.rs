//! User settings: watched currencies/stocks and provider endpoints.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use spendview_enrich::{DEFAULT_EXCHANGE_URL, DEFAULT_STOCKS_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub user_currencies: Vec<String>,
    pub user_stocks: Vec<String>,
    pub exchange_api: ExchangeApi,
    pub stocks_api: StocksApi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeApi {
    pub base_url: String,
    /// Base currency rates are quoted against.
    pub base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StocksApi {
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_currencies: vec!["USD".to_string(), "EUR".to_string()],
            user_stocks: vec!["AAPL".to_string(), "AMZN".to_string()],
            exchange_api: ExchangeApi {
                base_url: DEFAULT_EXCHANGE_URL.to_string(),
                base: "RUB".to_string(),
            },
            stocks_api: StocksApi {
                base_url: DEFAULT_STOCKS_URL.to_string(),
            },
        }
    }
}

/// Load settings from a toml file, falling back to defaults when the file
/// does not exist.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let s = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write a default settings file unless one already exists.
pub fn init_settings(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Settings already exist: {}", path.display());
        return Ok(());
    }
    save_settings(path, &Settings::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back.user_currencies, vec!["USD", "EUR"]);
        assert_eq!(back.exchange_api.base, "RUB");
        assert_eq!(back.stocks_api.base_url, DEFAULT_STOCKS_URL);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = load_settings(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(settings.user_stocks, vec!["AAPL", "AMZN"]);
    }
}
