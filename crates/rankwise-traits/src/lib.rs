#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rankwise/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the rankwise factor-ranking workspace.
//!
//! This crate defines the table shapes every stage passes around (wide
//! factor tables, long records, ranked and composite tables), the trading
//! calendar, the error type, and the [`FactorSource`] abstraction used by
//! the pipeline.

/// The version of the rankwise-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod frame;
pub mod source;
pub mod table;
pub mod types;

// Re-exports
pub use error::{RankwiseError, Result};
pub use source::{FactorSource, InMemorySource};
pub use table::{
    CompositeRecord, CompositeTable, FactorTable, LongFactorRecord, LongFactorTable,
    RankedRecord, RankedTable,
};
pub use types::{Asset, DATE_FORMAT, Date, TradingCalendar, UNRANKED, parse_date};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
