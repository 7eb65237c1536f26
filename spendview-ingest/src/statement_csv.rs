//! Parse a bank-statement CSV export into a [`TransactionTable`].
//!
//! The export is header-driven: columns are located by name and any column
//! may be absent. Malformed cells never fail a row; they coerce to the
//! field's missing sentinel (null date/number) or, for the payment amount,
//! to 0.0.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use spendview_core::{Columns, Transaction, TransactionTable};

const HDR_OPERATION_DATE: &str = "Operation Date";
const HDR_PAYMENT_DATE: &str = "Payment Date";
const HDR_CARD_NUMBER: &str = "Card Number";
const HDR_CATEGORY: &str = "Category";
const HDR_DESCRIPTION: &str = "Description";
const HDR_PAYMENT_AMOUNT: &str = "Payment Amount";
const HDR_OPERATION_AMOUNT: &str = "Operation Amount";
const HDR_CASHBACK: &str = "Cashback";
const HDR_ROUNDED_AMOUNT: &str = "Rounded Amount";

/// Statement timestamps come as `31.12.2021 16:44:00`; settlement dates
/// sometimes omit the time.
fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%d.%m.%Y %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%d.%m.%Y")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Strip currency symbols and group separators, accept a comma decimal
/// separator, then parse. `None` when nothing numeric remains.
fn parse_amount(cleanup: &Regex, s: &str) -> Option<f64> {
    let cleaned = cleanup.replace_all(s.trim(), "");
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace(',', "")
    } else {
        cleaned.replace(',', ".")
    };
    normalized.parse().ok()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[derive(Default)]
struct FieldIdx {
    operation_date: Option<usize>,
    payment_date: Option<usize>,
    card_number: Option<usize>,
    category: Option<usize>,
    description: Option<usize>,
    payment_amount: Option<usize>,
    operation_amount: Option<usize>,
    cashback: Option<usize>,
    rounded_amount: Option<usize>,
}

impl FieldIdx {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut idx = FieldIdx::default();
        for (i, name) in headers.iter().enumerate() {
            match name.trim() {
                HDR_OPERATION_DATE => idx.operation_date = Some(i),
                HDR_PAYMENT_DATE => idx.payment_date = Some(i),
                HDR_CARD_NUMBER => idx.card_number = Some(i),
                HDR_CATEGORY => idx.category = Some(i),
                HDR_DESCRIPTION => idx.description = Some(i),
                HDR_PAYMENT_AMOUNT => idx.payment_amount = Some(i),
                HDR_OPERATION_AMOUNT => idx.operation_amount = Some(i),
                HDR_CASHBACK => idx.cashback = Some(i),
                HDR_ROUNDED_AMOUNT => idx.rounded_amount = Some(i),
                _ => {}
            }
        }
        idx
    }

    fn columns(&self) -> Columns {
        Columns {
            operation_date: self.operation_date.is_some(),
            payment_date: self.payment_date.is_some(),
            card_number: self.card_number.is_some(),
            category: self.category.is_some(),
            description: self.description.is_some(),
            payment_amount: self.payment_amount.is_some(),
            operation_amount: self.operation_amount.is_some(),
            cashback: self.cashback.is_some(),
            rounded_amount: self.rounded_amount.is_some(),
        }
    }
}

fn cell<'r>(record: &'r csv::StringRecord, idx: Option<usize>) -> &'r str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}

/// Read a statement export from any reader. Only structural CSV problems
/// are errors; cell-level garbage coerces per the normalization policy.
pub fn read_statement<R: Read>(reader: R) -> Result<TransactionTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().context("reading statement header row")?;
    let idx = FieldIdx::from_headers(headers);
    let columns = idx.columns();
    let cleanup = Regex::new(r"[^\d.,\-]")?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.context("reading statement row")?;
        rows.push(Transaction {
            operation_date: parse_date(cell(&record, idx.operation_date)),
            payment_date: parse_date(cell(&record, idx.payment_date)),
            card_number: non_empty(cell(&record, idx.card_number)),
            category: non_empty(cell(&record, idx.category)),
            description: non_empty(cell(&record, idx.description)),
            payment_amount: parse_amount(&cleanup, cell(&record, idx.payment_amount))
                .unwrap_or(0.0),
            operation_amount: parse_amount(&cleanup, cell(&record, idx.operation_amount)),
            cashback: parse_amount(&cleanup, cell(&record, idx.cashback)),
            rounded_amount: parse_amount(&cleanup, cell(&record, idx.rounded_amount)),
        });
    }

    tracing::info!(rows = rows.len(), "loaded statement export");
    Ok(TransactionTable::new(rows, columns))
}

/// Load a statement export from disk.
pub fn load_statement_csv(path: impl AsRef<Path>) -> Result<TransactionTable> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "loading transactions");
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_statement(file)
}
