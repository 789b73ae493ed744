#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rankwise/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # rankwise
//!
//! Cross-sectional factor ranking and weighted-rank aggregation.
//!
//! rankwise is an umbrella crate that re-exports the rankwise sub-crates and
//! adds [`FactorPipeline`], which runs every stage for a configured set of
//! factors.
//!
//! ## Quick Start
//!
//! ```rust
//! use rankwise::prelude::*;
//!
//! # fn main() -> rankwise::Result<()> {
//! let day = |d| Date::from_ymd_opt(2021, 1, d).unwrap();
//! let roe = FactorTable::new(
//!     vec![day(1)],
//!     vec!["A".to_string(), "B".to_string(), "C".to_string()],
//!     vec![vec![Some(0.10), Some(0.20), Some(0.30)]],
//! )?;
//! let source = InMemorySource::new().with_table("roe", roe);
//!
//! let config = PipelineConfig {
//!     factors: vec![FactorSpec::new("roe", false)],
//!     ..PipelineConfig::default()
//! };
//! let calendar = TradingCalendar::new(vec![day(4), day(5)])?;
//!
//! let composite = FactorPipeline::new(config)?.run(&source, Some(&calendar))?;
//! // Highest ROE ranks first
//! assert_eq!(composite.get(day(4), "C"), Some(1.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Table types, trading calendar, errors, and [`FactorSource`]
//! - [`calendar`] - Resampling onto trading days, melting, asset selection,
//!   and reporting quarters
//! - [`combine`] - Cross-sectional ranking and rank combination
//!
//! ## Architecture
//!
//! 1. **Resample** forward-fills each factor onto the trading calendar
//! 2. **Melt** turns the wide table into `(date, asset, value)` records
//! 3. **Rank** orders assets within each date, ties sharing the average rank
//! 4. **Combine** weights the ranks, keeps pairs ranked by every factor, and
//!    ranks the weighted sum

/// Version information for the rankwise crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod pipeline;

pub use pipeline::{FactorPipeline, FactorSpec, PipelineConfig};

// ============================================================================
// Core Types
// ============================================================================

/// Core types for rankwise.
///
/// Re-exports table types, the trading calendar, the error type, and the
/// [`FactorSource`] trait.
pub mod traits {
    pub use rankwise_traits::*;
}

// Re-export error types
pub use rankwise_traits::{RankwiseError, Result};

// Re-export common types
pub use rankwise_traits::{
    CompositeTable, Date, FactorSource, FactorTable, InMemorySource, LongFactorTable,
    RankedTable, TradingCalendar,
};

// ============================================================================
// Calendar
// ============================================================================

/// Trading-calendar resampling and reporting quarters.
///
/// ```rust
/// use rankwise::calendar::ReportingQuarter;
///
/// let q: ReportingQuarter = "2013-Q3".parse().unwrap();
/// let (start, end) = q.window();
/// assert_eq!(start.to_string(), "2013-11-15");
/// assert_eq!(end.to_string(), "2014-03-31");
/// ```
pub mod calendar {
    pub use rankwise_calendar::*;
}

// ============================================================================
// Ranking and Combination
// ============================================================================

/// Cross-sectional ranking and weighted rank combination.
///
/// ## Available Combiners
///
/// - **WeightedRankCombiner**: one fixed weight per factor
/// - **EqualWeightRankCombiner**: weight `1/N` for `N` factors
pub mod combine {
    pub use rankwise_combine::*;
}

pub use rankwise_combine::RankCombiner;

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust
/// use rankwise::prelude::*;
/// ```
pub mod prelude {
    pub use crate::calendar::{ReportingQuarter, melt, resample, resample_optional, select_assets};
    pub use crate::combine::{
        CrossSectionalRanker, EqualWeightRankCombiner, RankCombiner, RankOptions,
        WeightedRankCombiner, WeightedRankConfig, combine_weighted_ranks, factor_subsets,
        rank_long_table,
    };
    pub use crate::traits::*;
    pub use crate::{FactorPipeline, FactorSpec, PipelineConfig};
}
