use std::fmt::Display;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::vector::codec;

/// Column and argument types as declared to the SQL engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlType {
    /// 64-bit signed integer
    BigInt,
    Varchar,
    /// Opaque column; holds an encoded vector
    Any,
    Decimal,
    Double,
    /// Array of decimals, the form of a vector literal in a query
    DecimalArray,
}

impl Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SqlType::BigInt => "BIGINT",
            SqlType::Varchar => "VARCHAR",
            SqlType::Any => "ANY",
            SqlType::Decimal => "DECIMAL",
            SqlType::Double => "DOUBLE",
            SqlType::DecimalArray => "DECIMAL ARRAY",
        };
        write!(f, "{}", name)
    }
}

/// Runtime value exchanged with the SQL engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
    /// Encoded vector column value, passed through untouched
    EncodedVector(String),
    Decimal(BigDecimal),
    Double(f64),
    DecimalArray(Vec<BigDecimal>),
}

impl Value {
    /// Returns the SQL type of the value, or None if it's Null
    pub fn sql_type(&self) -> Option<SqlType> {
        match self {
            Self::Null => None,
            Self::Integer(_) => Some(SqlType::BigInt),
            Self::Text(_) => Some(SqlType::Varchar),
            Self::EncodedVector(_) => Some(SqlType::Any),
            Self::Decimal(_) => Some(SqlType::Decimal),
            Self::Double(_) => Some(SqlType::Double),
            Self::DecimalArray(_) => Some(SqlType::DecimalArray),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::EncodedVector(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::DecimalArray(v) => write!(f, "[{}]", codec::encode(v).replace(codec::DELIMITER, ", ")),
        }
    }
}

/// A row is a vector of values, positionally aligned with the table schema
pub type Row = Vec<Value>;

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::{SqlType, Value};

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::EncodedVector("1::2".into()).to_string(), "1::2");
        assert_eq!(
            Value::DecimalArray(vec![BigDecimal::new(15.into(), 1), BigDecimal::from(2)]).to_string(),
            "[1.5, 2]"
        );
        assert_eq!(SqlType::DecimalArray.to_string(), "DECIMAL ARRAY");
    }

    #[test]
    fn test_sql_type() {
        assert_eq!(Value::Null.sql_type(), None);
        assert_eq!(Value::Text("a".into()).sql_type(), Some(SqlType::Varchar));
        assert_eq!(Value::EncodedVector("1".into()).sql_type(), Some(SqlType::Any));
        assert!(Value::Null.is_null());
    }
}
