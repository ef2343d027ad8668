use std::{collections::BTreeMap, fmt::Display, sync::Arc};

use bigdecimal::BigDecimal;
use tracing::debug;

use crate::{
    error::{Error, Result},
    sql::types::{SqlType, Value},
    vector::math,
};

/// Argument and return types of a scalar function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub args: Vec<SqlType>,
    pub returns: SqlType,
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
        write!(f, "({}) -> {}", args.join(", "), self.returns)
    }
}

/// Scalar function the SQL engine can call once per row or per query
///
/// A NULL argument yields a NULL result.
pub trait ScalarFunction: Send + Sync {
    fn name(&self) -> &'static str;
    fn signature(&self) -> Signature;
    fn invoke(&self, args: &[Value]) -> Result<Value>;
}

/// SUM_ELEMENTS(VARCHAR) -> DECIMAL
pub struct SumElements;

impl ScalarFunction for SumElements {
    fn name(&self) -> &'static str {
        "SUM_ELEMENTS"
    }

    fn signature(&self) -> Signature {
        Signature {
            args: vec![SqlType::Varchar],
            returns: SqlType::Decimal,
        }
    }

    fn invoke(&self, args: &[Value]) -> Result<Value> {
        check_arity(self.name(), args, 1)?;
        Ok(match column_arg(self.name(), &args[0])? {
            Some(column) => Value::Decimal(math::sum_elements(column)?),
            None => Value::Null,
        })
    }
}

/// SIMILARITY(VARCHAR, DECIMAL ARRAY) -> DOUBLE
pub struct Similarity;

impl ScalarFunction for Similarity {
    fn name(&self) -> &'static str {
        "SIMILARITY"
    }

    fn signature(&self) -> Signature {
        vector_pair_signature()
    }

    fn invoke(&self, args: &[Value]) -> Result<Value> {
        check_arity(self.name(), args, 2)?;
        let column = column_arg(self.name(), &args[0])?;
        let other = array_arg(self.name(), &args[1])?;
        Ok(match (column, other) {
            (Some(column), Some(other)) => Value::Double(math::similarity(column, other)?),
            _ => Value::Null,
        })
    }
}

/// COSINE_SIMILARITY(VARCHAR, DECIMAL ARRAY) -> DOUBLE
pub struct CosineSimilarity;

impl ScalarFunction for CosineSimilarity {
    fn name(&self) -> &'static str {
        "COSINE_SIMILARITY"
    }

    fn signature(&self) -> Signature {
        vector_pair_signature()
    }

    fn invoke(&self, args: &[Value]) -> Result<Value> {
        check_arity(self.name(), args, 2)?;
        let column = column_arg(self.name(), &args[0])?;
        let other = array_arg(self.name(), &args[1])?;
        Ok(match (column, other) {
            (Some(column), Some(other)) => Value::Double(math::cosine_similarity(column, other)),
            _ => Value::Null,
        })
    }
}

fn vector_pair_signature() -> Signature {
    Signature {
        args: vec![SqlType::Varchar, SqlType::DecimalArray],
        returns: SqlType::Double,
    }
}

fn check_arity(name: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::InvalidArgument(format!(
            "{} takes {} arguments, got {}",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}

/// Encoded vector operand; `None` for NULL
fn column_arg<'a>(name: &str, value: &'a Value) -> Result<Option<&'a str>> {
    match value {
        Value::Null => Ok(None),
        Value::Text(s) | Value::EncodedVector(s) => Ok(Some(s.as_str())),
        other => Err(Error::InvalidArgument(format!(
            "{} expects an encoded vector, got {}",
            name,
            type_name(other)
        ))),
    }
}

/// Decimal array operand; `None` for NULL
fn array_arg<'a>(name: &str, value: &'a Value) -> Result<Option<&'a [BigDecimal]>> {
    match value {
        Value::Null => Ok(None),
        Value::DecimalArray(v) => Ok(Some(v.as_slice())),
        other => Err(Error::InvalidArgument(format!(
            "{} expects a decimal array, got {}",
            name,
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> String {
    value
        .sql_type()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "NULL".into())
}

/// Scalar functions registered with the SQL engine, keyed by name
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: BTreeMap<&'static str, Arc<dyn ScalarFunction>>,
}

impl FunctionRegistry {
    /// Registry of the vector functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: BTreeMap::new(),
        };
        registry.register(Arc::new(SumElements));
        registry.register(Arc::new(Similarity));
        registry.register(Arc::new(CosineSimilarity));
        registry
    }

    pub fn register(&mut self, function: Arc<dyn ScalarFunction>) {
        self.functions.insert(function.name(), function);
    }

    /// Looks a function up by case-insensitive name
    pub fn get(&self, name: &str) -> Result<Arc<dyn ScalarFunction>> {
        self.functions
            .get(name.to_uppercase().as_str())
            .cloned()
            .ok_or_else(|| Error::FunctionNotFound(name.to_string()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.functions.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ScalarFunction>> {
        self.functions.values()
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let function = self.get(name)?;
        debug!(function = function.name(), args = args.len(), "call");
        function.invoke(args)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
