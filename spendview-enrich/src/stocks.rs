//! Stock quotes from a Financial Modeling Prep-compatible endpoint.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_STOCKS_URL: &str = "https://financialmodelingprep.com/api/v3/quote";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: Option<f64>,
}

/// Pull the requested symbols out of a quote array body
/// (`[{"symbol": ..., "price": ...}, ...]`). Always one entry per
/// requested symbol, in request order.
fn prices_from_body(body: &Value, stocks: &[String]) -> Vec<StockPrice> {
    let quotes = body.as_array();
    stocks
        .iter()
        .map(|sym| {
            let price = quotes.and_then(|items| {
                items
                    .iter()
                    .find(|item| item.get("symbol").and_then(Value::as_str) == Some(sym))
                    .and_then(|item| item.get("price"))
                    .and_then(Value::as_f64)
            });
            StockPrice {
                stock: sym.clone(),
                price,
            }
        })
        .collect()
}

async fn request_quotes(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    stocks: &[String],
) -> Result<Value> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), stocks.join(","));
    let mut req = client.get(&url);
    if let Some(key) = api_key {
        req = req.query(&[("apikey", key)]);
    }
    let resp = req
        .send()
        .await
        .context("stock quote request failed")?
        .error_for_status()
        .context("stock quote request returned an error status")?;
    resp.json().await.context("decoding stock quote body")
}

/// Fetch quotes for `stocks`. Never fails: a total request failure yields
/// a null price for every requested symbol.
pub async fn fetch_stock_prices(
    client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    stocks: &[String],
) -> Vec<StockPrice> {
    tracing::info!(?stocks, "requesting stock prices");
    match request_quotes(client, base_url, api_key, stocks).await {
        Ok(body) => prices_from_body(&body, stocks),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "stock prices unavailable");
            stocks
                .iter()
                .map(|sym| StockPrice {
                    stock: sym.clone(),
                    price: None,
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn syms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prices_from_body_matches_by_symbol() {
        let body = json!([
            {"symbol": "AMZN", "price": 3173.18},
            {"symbol": "AAPL", "price": 150.12}
        ]);
        let prices = prices_from_body(&body, &syms(&["AAPL", "AMZN", "TSLA"]));
        assert_eq!(prices.len(), 3);
        assert_eq!(prices[0], StockPrice { stock: "AAPL".into(), price: Some(150.12) });
        assert_eq!(prices[1], StockPrice { stock: "AMZN".into(), price: Some(3173.18) });
        assert_eq!(prices[2], StockPrice { stock: "TSLA".into(), price: None });
    }

    #[test]
    fn test_prices_from_malformed_body() {
        let prices = prices_from_body(&json!({"error": "rate limited"}), &syms(&["AAPL"]));
        assert_eq!(prices, vec![StockPrice { stock: "AAPL".into(), price: None }]);
        let prices = prices_from_body(&json!([{"symbol": "AAPL", "price": "n/a"}]), &syms(&["AAPL"]));
        assert_eq!(prices[0].price, None);
    }

    #[tokio::test]
    async fn test_total_failure_yields_one_null_per_symbol() {
        let client = reqwest::Client::new();
        let prices = fetch_stock_prices(
            &client,
            "http://127.0.0.1:9/quote",
            None,
            &syms(&["AAPL", "TSLA"]),
        )
        .await;
        assert_eq!(prices.len(), 2);
        assert!(prices.iter().all(|p| p.price.is_none()));
        assert_eq!(prices[0].stock, "AAPL");
        assert_eq!(prices[1].stock, "TSLA");
    }
}
