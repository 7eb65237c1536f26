//! Typed failures the reports surface to their callers.
//!
//! Soft conditions (missing columns, unparseable cells, enrichment misses)
//! degrade in place to empty or null data and a log entry; only the
//! conditions below cross a function boundary as errors.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The trailing-window end date was left to default but no row in the
    /// table has a parseable operation date. A zeroed report here would be
    /// indistinguishable from genuine zero spend, so this is a hard error.
    #[error("no valid operation dates in the table; cannot derive a report window")]
    NoValidDates,
}
