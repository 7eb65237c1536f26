//! spendview-enrich: currency-rate and stock-quote gateways.
//!
//! Both gateways are total: one entry per requested symbol, in request
//! order, with a null value on any per-symbol or whole-request failure.
//! The report assembler never sees an error from this crate.

pub mod currency;
pub mod stocks;

pub use currency::{fetch_currency_rates, CurrencyRate, DEFAULT_EXCHANGE_URL};
pub use stocks::{fetch_stock_prices, StockPrice, DEFAULT_STOCKS_URL};
