//! Cross-sectional ranking and rank combination for rankwise.
//!
//! This crate ranks each factor within every date, then merges several
//! ranked factors into one composite ranking. Combination keeps only the
//! `(date, asset)` pairs that every factor ranked, sums the weighted ranks,
//! and ranks that sum again.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rankwise_combine::{EqualWeightRankCombiner, RankCombiner, RankOptions, rank_long_table};
//! use rankwise_traits::LongFactorTable;
//!
//! # fn example(momentum: LongFactorTable, value: LongFactorTable) -> rankwise_traits::Result<()> {
//! let momentum = rank_long_table(&momentum, &RankOptions::with_direction(true))?;
//! let value = rank_long_table(&value, &RankOptions::with_direction(false))?;
//!
//! let composite = EqualWeightRankCombiner::default().combine(&[momentum, value])?;
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod combiner;
mod equal_weight;
mod frame;
mod rank;
mod subsets;
mod weighted;

// Re-export main types
pub use aggregate::combine_weighted_ranks;
pub use combiner::RankCombiner;
pub use equal_weight::EqualWeightRankCombiner;
pub use frame::rank_dataframe;
pub use rank::{CrossSectionalRanker, RankOptions, average_ranks, rank_long_table};
pub use subsets::factor_subsets;
pub use weighted::{WeightedRankCombiner, WeightedRankConfig};
