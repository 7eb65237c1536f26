//! Substring search over the description and category fields.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::table::Transaction;

/// One search hit, ready for JSON output: timestamps formatted as
/// `YYYY-MM-DD HH:MM:SS`, every missing sentinel an explicit null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub operation_date: Option<String>,
    pub payment_date: Option<String>,
    pub card_number: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub payment_amount: f64,
    pub operation_amount: Option<f64>,
    pub cashback: Option<f64>,
    pub rounded_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchRecord>,
}

fn format_ts(ts: Option<NaiveDateTime>) -> Option<String> {
    ts.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
}

// Coerced amounts can carry NaN only if a caller built rows by hand;
// render those as null rather than serializing a non-JSON number.
fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

fn matches(query_lower: &str, t: &Transaction) -> bool {
    let hit = |field: Option<&str>| {
        field
            .unwrap_or("")
            .to_lowercase()
            .contains(query_lower)
    };
    hit(t.description.as_deref()) || hit(t.category.as_deref())
}

/// Case-insensitive substring search of `query` against the description or
/// category of each row. Input order is preserved; `limit` truncates to
/// the first `limit` hits. Null fields behave as empty strings, so the
/// function never fails for any row shape.
pub fn search(query: &str, rows: &[Transaction], limit: Option<usize>) -> SearchResponse {
    let query_lower = query.to_lowercase();
    let results = rows
        .iter()
        .filter(|t| matches(&query_lower, t))
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| SearchRecord {
            operation_date: format_ts(t.operation_date),
            payment_date: format_ts(t.payment_date),
            card_number: t.card_number.clone(),
            category: t.category.clone(),
            description: t.description.clone(),
            payment_amount: t.payment_amount,
            operation_amount: finite(t.operation_amount),
            cashback: finite(t.cashback),
            rounded_amount: finite(t.rounded_amount),
        })
        .collect();
    SearchResponse {
        query: query.to_string(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(category: Option<&str>, description: Option<&str>) -> Transaction {
        Transaction {
            category: category.map(str::to_string),
            description: description.map(str::to_string),
            ..Transaction::default()
        }
    }

    #[test]
    fn test_matches_description_or_category_case_insensitive() {
        let rows = vec![
            row(Some("Supermarkets"), Some("Corner store")),
            row(Some("Transfers"), Some("Credit card payment")),
            row(None, Some("Farmers MARKET stall")),
        ];
        let resp = search("market", &rows, None);
        assert_eq!(resp.query, "market");
        assert_eq!(resp.results.len(), 2);
        assert_eq!(resp.results[0].category.as_deref(), Some("Supermarkets"));
        assert_eq!(
            resp.results[1].description.as_deref(),
            Some("Farmers MARKET stall")
        );
    }

    #[test]
    fn test_limit_truncates_in_order() {
        let rows = vec![
            row(Some("Food"), Some("a")),
            row(Some("Food"), Some("b")),
            row(Some("Food"), Some("c")),
        ];
        let resp = search("food", &rows, Some(2));
        assert_eq!(resp.results.len(), 2);
        assert_eq!(resp.results[0].description.as_deref(), Some("a"));
        assert_eq!(resp.results[1].description.as_deref(), Some("b"));
    }

    #[test]
    fn test_null_fields_never_match_nor_fail() {
        let rows = vec![row(None, None)];
        let resp = search("anything", &rows, None);
        assert!(resp.results.is_empty());
        // empty query matches everything, including all-null rows
        assert_eq!(search("", &rows, None).results.len(), 1);
    }

    #[test]
    fn test_output_normalizes_sentinels() {
        let mut t = row(Some("Supermarkets"), Some("Corner store"));
        t.operation_date = NaiveDate::from_ymd_opt(2021, 12, 31)
            .unwrap()
            .and_hms_opt(16, 44, 0);
        t.operation_amount = Some(f64::NAN);
        t.cashback = None;
        let resp = search("corner", &[t], None);
        let rec = &resp.results[0];
        assert_eq!(rec.operation_date.as_deref(), Some("2021-12-31 16:44:00"));
        assert_eq!(rec.payment_date, None);
        assert_eq!(rec.operation_amount, None);
        assert_eq!(rec.cashback, None);
    }
}
