//! Chart rendering for combined comparison tables

pub mod palette;
pub mod plot;
