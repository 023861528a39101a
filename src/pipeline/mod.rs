//! Pipeline module - report comparison pipeline

pub mod compare;
