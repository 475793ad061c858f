//! Data preparation and aggregation for the global terrorism dashboard.
//!
//! Two CSV files are loaded once into a [`context::DataContext`]; each
//! dashboard page is a pure view builder in [`views`] that turns those base
//! tables plus a few filter parameters into tables and series ready to chart.
pub mod catalog;
pub mod config;
pub mod context;
pub mod crosstab;
pub mod error;
pub mod geo;
pub mod loader;
pub mod output;
pub mod pages;
pub mod spending;
pub mod types;
pub mod util;
pub mod views;
