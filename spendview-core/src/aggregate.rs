//! The aggregation engine: category spend over a trailing window, per-card
//! summaries, and top-N transactions by magnitude.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::table::TransactionTable;
use crate::window::trailing_window;

/// Trailing window length for the category-spend report, in calendar months.
const CATEGORY_WINDOW_MONTHS: u32 = 3;

/// Fixed cashback proxy: 1% of expenses.
const CASHBACK_DIVISOR: f64 = 100.0;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Spend in one category over the trailing three months ending at a
/// reference date.
///
/// `start_date`/`end_date` are `None` only for the degraded "required
/// column missing" case; see [`CategoryReport::is_unavailable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_spent: f64,
}

impl CategoryReport {
    fn unavailable(category: &str) -> Self {
        Self {
            category: category.to_string(),
            start_date: None,
            end_date: None,
            total_spent: 0.0,
        }
    }

    /// True when the source table lacked the columns this report needs.
    /// Distinct from a report whose window genuinely contained no spend.
    pub fn is_unavailable(&self) -> bool {
        self.start_date.is_none()
    }
}

/// Total spend for `category` over the three months ending at `end`.
///
/// Rows count when their operation date falls in `(start, end]`, their
/// category matches exactly (case-sensitive; a null category never
/// matches) and their payment amount is negative. The result is the
/// non-negative sum of magnitudes, rounded to 2 decimals.
///
/// When `end` is `None` it defaults to the latest operation date in the
/// table; a table with no valid dates is [`ReportError::NoValidDates`].
/// A table missing the operation-date or payment-amount column degrades
/// to an unavailable report instead of failing.
pub fn spending_by_category(
    table: &TransactionTable,
    category: &str,
    end: Option<NaiveDateTime>,
) -> Result<CategoryReport, ReportError> {
    if !table.columns.operation_date || !table.columns.payment_amount {
        tracing::warn!(
            category,
            "required columns missing; returning unavailable category report"
        );
        return Ok(CategoryReport::unavailable(category));
    }

    let end = match end {
        Some(e) => e,
        None => table
            .latest_operation_date()
            .ok_or(ReportError::NoValidDates)?,
    };
    let window = trailing_window(end, CATEGORY_WINDOW_MONTHS);

    let total: f64 = table
        .rows
        .iter()
        .filter(|t| {
            t.operation_date
                .map_or(false, |d| d > window.start && d <= window.end)
        })
        .filter(|t| t.category.as_deref() == Some(category) && t.payment_amount < 0.0)
        .map(|t| -t.payment_amount)
        .sum();

    Ok(CategoryReport {
        category: category.to_string(),
        start_date: Some(window.start.format("%Y-%m-%d").to_string()),
        end_date: Some(window.end.format("%Y-%m-%d").to_string()),
        total_spent: round2(total),
    })
}

/// Per-card expense and cashback totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub last_digits: String,
    pub total_spent: f64,
    pub cashback: f64,
}

fn last_four(card: &str) -> String {
    let chars: Vec<char> = card.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}

/// One summary per distinct card in the table, ordered by card identifier.
///
/// Only negative payment amounts contribute, as their magnitude. Cashback
/// is the fixed 1% proxy over that expense total. Rows with a null card
/// number are dropped. An empty table or a table without the card-number
/// column yields an empty list.
pub fn cards_summary(table: &TransactionTable) -> Vec<CardSummary> {
    if table.is_empty() || !table.columns.card_number {
        return Vec::new();
    }

    let mut expenses: BTreeMap<&str, f64> = BTreeMap::new();
    for t in &table.rows {
        let Some(card) = t.card_number.as_deref() else {
            continue;
        };
        let expense = if t.payment_amount < 0.0 {
            -t.payment_amount
        } else {
            0.0
        };
        *expenses.entry(card).or_insert(0.0) += expense;
    }

    expenses
        .into_iter()
        .map(|(card, total)| CardSummary {
            last_digits: last_four(card),
            total_spent: round2(total),
            cashback: round2(total / CASHBACK_DIVISOR),
        })
        .collect()
}

/// Read-only projection of one high-magnitude transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTransaction {
    /// Operation date as `DD.MM.YYYY`; null when the row has no date.
    pub date: Option<String>,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// The `top_n` transactions by absolute payment amount, descending.
///
/// The ranking sort is stable: rows of equal magnitude keep their original
/// table order. An empty table or a table without the payment-amount
/// column yields an empty list.
pub fn top_transactions(table: &TransactionTable, top_n: usize) -> Vec<TopTransaction> {
    if table.is_empty() || !table.columns.payment_amount {
        return Vec::new();
    }

    let mut ranked: Vec<usize> = (0..table.rows.len()).collect();
    ranked.sort_by(|&a, &b| {
        let (ka, kb) = (table.rows[a].abs_amount(), table.rows[b].abs_amount());
        kb.partial_cmp(&ka).unwrap_or(Ordering::Equal)
    });

    ranked
        .into_iter()
        .take(top_n)
        .map(|i| {
            let t = &table.rows[i];
            TopTransaction {
                date: t
                    .operation_date
                    .map(|d| d.format("%d.%m.%Y").to_string()),
                amount: t.payment_amount,
                category: t.category.clone(),
                description: t.description.clone(),
            }
        })
        .collect()
}
