//! Decimal vectors and the functions evaluated over them
//!
//! - `codec`: the `::` delimited text form stored in vector columns
//! - `math`: SUM_ELEMENTS, SIMILARITY and COSINE_SIMILARITY

pub mod codec;
pub mod math;
