//! Location lookup over village-level forecast tables.
//!
//! Each forecast parameter (rainfall, humidity, wind speed, temperature) is
//! a CSV keyed by VILLAGE / MANDAL / DISTRICT with one column per forecast
//! date. A query is matched case-insensitively against every table, the
//! matches are joined by location, and each location becomes a
//! [`report::ForecastReport`].

pub mod aggregate;
pub mod config;
pub mod error;
pub mod load;
pub mod matcher;
pub mod report;
pub mod table;
