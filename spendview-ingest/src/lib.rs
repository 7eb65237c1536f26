//! spendview-ingest: loads bank-statement CSV exports into the normalized
//! transaction table.

pub mod statement_csv;

pub use statement_csv::{load_statement_csv, read_statement};
