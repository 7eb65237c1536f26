//! spendview-core: normalized statement table, date windows, and the
//! aggregation/search engine behind the spendview reports.

pub mod aggregate;
pub mod error;
pub mod greeting;
pub mod search;
pub mod table;
pub mod window;

pub use aggregate::{
    cards_summary, spending_by_category, top_transactions, CardSummary, CategoryReport,
    TopTransaction,
};
pub use error::ReportError;
pub use greeting::{greeting_at, greeting_for_hour};
pub use search::{search, SearchRecord, SearchResponse};
pub use table::{Columns, Transaction, TransactionTable};
pub use window::{month_to_date, trailing_window, Window};
