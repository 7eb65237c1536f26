//! Normalized statement table: the bank-agnostic row every report consumes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One normalized row of a bank-statement export.
///
/// Dates and text that failed to parse are `None`; `payment_amount` coerces
/// to 0.0 instead so the aggregation engine never branches on a missing
/// primary amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub operation_date: Option<NaiveDateTime>,
    pub payment_date: Option<NaiveDateTime>,
    pub card_number: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Negative means expense/outflow; positive means inflow.
    pub payment_amount: f64,
    pub operation_amount: Option<f64>,
    pub cashback: Option<f64>,
    pub rounded_amount: Option<f64>,
}

impl Transaction {
    /// Returns true if this row is an expense (negative payment amount).
    pub fn is_expense(&self) -> bool {
        self.payment_amount < 0.0
    }

    /// Magnitude of the payment amount.
    pub fn abs_amount(&self) -> f64 {
        self.payment_amount.abs()
    }
}

/// Which columns the source export actually carried.
///
/// A column absent from the export is different from a null cell in a row:
/// reports degrade to empty results when a column they need was never
/// present at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    pub operation_date: bool,
    pub payment_date: bool,
    pub card_number: bool,
    pub category: bool,
    pub description: bool,
    pub payment_amount: bool,
    pub operation_amount: bool,
    pub cashback: bool,
    pub rounded_amount: bool,
}

impl Columns {
    /// Every column present (in-memory fixtures, fully-formed exports).
    pub const ALL: Columns = Columns {
        operation_date: true,
        payment_date: true,
        card_number: true,
        category: true,
        description: true,
        payment_amount: true,
        operation_amount: true,
        cashback: true,
        rounded_amount: true,
    };

    /// No columns present (empty or unrecognized export).
    pub const NONE: Columns = Columns {
        operation_date: false,
        payment_date: false,
        card_number: false,
        category: false,
        description: false,
        payment_amount: false,
        operation_amount: false,
        cashback: false,
        rounded_amount: false,
    };
}

/// The normalized transaction table: rows plus the column-presence record.
///
/// Treated as read-only by every report function; filtering returns a new
/// table rather than mutating the receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionTable {
    pub rows: Vec<Transaction>,
    pub columns: Columns,
}

impl TransactionTable {
    pub fn new(rows: Vec<Transaction>, columns: Columns) -> Self {
        Self { rows, columns }
    }

    /// An empty table with no columns present.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            columns: Columns::NONE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Latest non-null operation date in the table, if any row has one.
    pub fn latest_operation_date(&self) -> Option<NaiveDateTime> {
        self.rows.iter().filter_map(|t| t.operation_date).max()
    }

    /// Rows whose operation date falls in `[start, end]`, both ends
    /// inclusive. Rows without an operation date drop out. If the export
    /// had no operation-date column at all the result is an empty table.
    pub fn filter_by_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> TransactionTable {
        if !self.columns.operation_date {
            tracing::warn!("operation-date column missing; range filter yields empty table");
            return TransactionTable {
                rows: Vec::new(),
                columns: self.columns,
            };
        }
        let rows = self
            .rows
            .iter()
            .filter(|t| {
                t.operation_date
                    .map_or(false, |d| d >= start && d <= end)
            })
            .cloned()
            .collect();
        TransactionTable {
            rows,
            columns: self.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn row(date: Option<NaiveDateTime>, amount: f64) -> Transaction {
        Transaction {
            operation_date: date,
            payment_amount: amount,
            ..Transaction::default()
        }
    }

    #[test]
    fn test_expense_helpers() {
        let t = row(None, -160.89);
        assert!(t.is_expense());
        assert_eq!(t.abs_amount(), 160.89);
        assert!(!row(None, 42.0).is_expense());
    }

    #[test]
    fn test_latest_operation_date_skips_nulls() {
        let table = TransactionTable::new(
            vec![
                row(Some(dt(2021, 12, 20, 10)), -200.0),
                row(None, -5.0),
                row(Some(dt(2021, 12, 31, 16)), -160.89),
            ],
            Columns::ALL,
        );
        assert_eq!(table.latest_operation_date(), Some(dt(2021, 12, 31, 16)));
        assert_eq!(TransactionTable::empty().latest_operation_date(), None);
    }

    #[test]
    fn test_filter_by_range_inclusive_both_ends() {
        let table = TransactionTable::new(
            vec![
                row(Some(dt(2021, 12, 1, 0)), -1.0),
                row(Some(dt(2021, 12, 20, 10)), -2.0),
                row(Some(dt(2021, 12, 31, 16)), -3.0),
                row(None, -4.0),
            ],
            Columns::ALL,
        );
        let filtered = table.filter_by_range(dt(2021, 12, 20, 10), dt(2021, 12, 31, 16));
        assert_eq!(filtered.rows.len(), 2);
        assert_eq!(filtered.rows[0].payment_amount, -2.0);
        assert_eq!(filtered.rows[1].payment_amount, -3.0);
        // original table untouched
        assert_eq!(table.rows.len(), 4);
    }

    #[test]
    fn test_filter_without_date_column_is_empty() {
        let mut columns = Columns::ALL;
        columns.operation_date = false;
        let table = TransactionTable::new(vec![row(Some(dt(2021, 12, 1, 0)), -1.0)], columns);
        let filtered = table.filter_by_range(dt(2021, 1, 1, 0), dt(2022, 1, 1, 0));
        assert!(filtered.is_empty());
    }
}
