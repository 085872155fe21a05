//! Career listings and application intake for the hotel group's careers site.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
