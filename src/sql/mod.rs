//! Engine-facing side of the tables
//!
//! This module provides:
//! - `types`: SQL types and runtime values
//! - `schema`: Field and schema definitions
//! - `table`: The scannable table source abstraction
//! - `function`: Scalar functions and their registry
//! - `catalog`: The namespace handed to the SQL engine

pub mod types;
pub mod schema;
pub mod table;
pub mod function;
pub mod catalog;
