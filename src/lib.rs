//! vectable - in-memory vector tables for an embedding SQL engine
//!
//! This crate provides:
//! - Typed, in-memory tables the engine can type-check and scan lazily
//! - A load-once registry of table data, safe to share across threads
//! - Decimal vector functions (SUM_ELEMENTS, SIMILARITY, COSINE_SIMILARITY)
//!   callable as SQL scalar functions over an encoded vector column
//!
//! SQL parsing, planning and execution belong to the engine.

pub mod config;
pub mod error;
pub mod sql;
pub mod storage;
pub mod telemetry;
pub mod vector;
