//! The main view: month-to-date card and top-transaction summaries plus
//! currency/stock enrichment, assembled into one JSON envelope.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;

use spendview_core::{
    cards_summary, greeting_at, month_to_date, top_transactions, CardSummary, TopTransaction,
    TransactionTable,
};
use spendview_enrich::{fetch_currency_rates, fetch_stock_prices, CurrencyRate, StockPrice};

use crate::settings::Settings;

const TOP_N: usize = 5;

#[derive(Debug, Serialize)]
struct MainView {
    greeting: String,
    cards: Vec<CardSummary>,
    top_transactions: Vec<TopTransaction>,
    currency_rates: Vec<CurrencyRate>,
    stock_prices: Vec<StockPrice>,
}

/// Assemble the main view for an instant given as `YYYY-MM-DD HH:MM:SS`.
/// Enrichment failures degrade to null values; only a malformed instant or
/// serialization failure is an error.
pub async fn main_view(
    table: &TransactionTable,
    date_str: &str,
    settings: &Settings,
    client: &reqwest::Client,
    stocks_api_key: Option<&str>,
) -> Result<String> {
    let instant = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("invalid date '{date_str}', expected YYYY-MM-DD HH:MM:SS"))?;

    let window = month_to_date(instant);
    let filtered = table.filter_by_range(window.start, window.end);

    let currency_rates = fetch_currency_rates(
        client,
        &settings.exchange_api.base_url,
        &settings.exchange_api.base,
        &settings.user_currencies,
    )
    .await;
    let stock_prices = fetch_stock_prices(
        client,
        &settings.stocks_api.base_url,
        stocks_api_key,
        &settings.user_stocks,
    )
    .await;

    let view = MainView {
        greeting: greeting_at(instant).to_string(),
        cards: cards_summary(&filtered),
        top_transactions: top_transactions(&filtered, TOP_N),
        currency_rates,
        stock_prices,
    };

    serde_json::to_string_pretty(&view).context("serializing main view")
}
