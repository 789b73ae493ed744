#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rankwise/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Calendar handling for rankwise factor tables.
//!
//! Factor data often arrives at a lower frequency than the trading calendar
//! it is evaluated on. This crate expands such tables onto trading days by
//! forward fill, restricts them to an asset universe, melts them into the
//! long shape the ranker consumes, and maps dates to financial-report
//! publication quarters.
//!
//! # Examples
//!
//! ```rust
//! use rankwise_calendar::{melt, resample};
//! use rankwise_traits::{Date, FactorTable, TradingCalendar};
//!
//! let day = |d| Date::from_ymd_opt(2021, 1, d).unwrap();
//! let quarterly = FactorTable::new(
//!     vec![day(1)],
//!     vec!["2330".to_string()],
//!     vec![vec![Some(10.0)]],
//! )
//! .unwrap();
//! let calendar = TradingCalendar::new(vec![day(1), day(2), day(3)]).unwrap();
//!
//! let daily = resample(&quarterly, &calendar).unwrap();
//! assert_eq!(melt(&daily).unwrap().len(), 3);
//! ```

mod melt;
mod quarter;
mod resample;
mod select;

pub use melt::melt;
pub use quarter::ReportingQuarter;
pub use resample::{resample, resample_optional};
pub use select::select_assets;
