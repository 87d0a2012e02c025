//! Implementations that are useful accross the whole project
//!
//! Date management, entry definition and weekly aggregation

pub mod date;
pub mod entry;
pub mod summary;
