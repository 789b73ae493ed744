//! CLI subcommand modules.
//!
//! This module contains the implementations for all rankwise CLI subcommands.

pub(crate) mod combine;
pub(crate) mod quarter;
pub(crate) mod rank;
pub(crate) mod resample;
pub(crate) mod sweep;
