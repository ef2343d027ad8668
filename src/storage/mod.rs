//! In-memory table data
//!
//! - `dataset`: records and keyed datasets
//! - `loader`: table definitions and their loaders
//! - `registry`: load-once holder of every table's data
//! - `employees`: the built-in employees table

pub mod dataset;
pub mod loader;
pub mod registry;
pub mod employees;
