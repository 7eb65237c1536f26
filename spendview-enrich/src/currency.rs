//! Currency rates from an exchangerate.host-compatible endpoint.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_EXCHANGE_URL: &str = "https://api.exchangerate.host/latest";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: Option<f64>,
}

/// Pull the requested currencies out of a `{"rates": {...}}` body.
/// Always one entry per requested currency, in request order.
fn rates_from_body(body: &Value, currencies: &[String]) -> Vec<CurrencyRate> {
    let rates = body.get("rates").and_then(Value::as_object);
    currencies
        .iter()
        .map(|cur| CurrencyRate {
            currency: cur.clone(),
            rate: rates
                .and_then(|r| r.get(cur))
                .and_then(Value::as_f64),
        })
        .collect()
}

async fn request_rates(
    client: &reqwest::Client,
    base_url: &str,
    base: &str,
    currencies: &[String],
) -> Result<Value> {
    let symbols = currencies.join(",");
    let resp = client
        .get(base_url)
        .query(&[("base", base), ("symbols", symbols.as_str())])
        .send()
        .await
        .context("currency rate request failed")?
        .error_for_status()
        .context("currency rate request returned an error status")?;
    resp.json().await.context("decoding currency rate body")
}

/// Fetch rates for `currencies` against `base`. Never fails: a total
/// request failure yields a null rate for every requested currency.
pub async fn fetch_currency_rates(
    client: &reqwest::Client,
    base_url: &str,
    base: &str,
    currencies: &[String],
) -> Vec<CurrencyRate> {
    tracing::info!(?currencies, base, "requesting currency rates");
    match request_rates(client, base_url, base, currencies).await {
        Ok(body) => rates_from_body(&body, currencies),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "currency rates unavailable");
            currencies
                .iter()
                .map(|cur| CurrencyRate {
                    currency: cur.clone(),
                    rate: None,
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
    fn test_rates_from_body_keeps_order_and_length() {
        let body = json!({"rates": {"EUR": 87.08, "USD": 73.21}});
        let rates = rates_from_body(&body, &syms(&["USD", "EUR", "GBP"]));
        assert_eq!(rates.len(), 3);
        assert_eq!(rates[0], CurrencyRate { currency: "USD".into(), rate: Some(73.21) });
        assert_eq!(rates[1], CurrencyRate { currency: "EUR".into(), rate: Some(87.08) });
        assert_eq!(rates[2], CurrencyRate { currency: "GBP".into(), rate: None });
    }

    #[test]
    fn test_rates_from_malformed_body() {
        let rates = rates_from_body(&json!({"unexpected": true}), &syms(&["USD"]));
        assert_eq!(rates, vec![CurrencyRate { currency: "USD".into(), rate: None }]);
        let rates = rates_from_body(&json!({"rates": {"USD": "not a number"}}), &syms(&["USD"]));
        assert_eq!(rates[0].rate, None);
    }

    #[tokio::test]
    async fn test_total_failure_yields_one_null_per_symbol() {
        let client = reqwest::Client::new();
        // unroutable endpoint: the request itself fails
        let rates = fetch_currency_rates(
            &client,
            "http://127.0.0.1:9/latest",
            "RUB",
            &syms(&["USD", "EUR"]),
        )
        .await;
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].currency, "USD");
        assert_eq!(rates[0].rate, None);
        assert_eq!(rates[1].currency, "EUR");
        assert_eq!(rates[1].rate, None);
    }
}
