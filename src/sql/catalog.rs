use std::{collections::HashMap, sync::Arc};

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    sql::{
        function::FunctionRegistry,
        table::{MemoryTable, TableSource},
        types::{SqlType, Value},
    },
    storage::registry::Registry,
};

/// Column as declared to the SQL engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub sql_type: SqlType,
}

/// Namespace the SQL engine mounts: the tables it can scan and the scalar
/// functions it can call
pub struct Catalog {
    name: String,
    registry: Arc<Registry>,
    tables: HashMap<String, Arc<dyn TableSource>>,
    functions: FunctionRegistry,
}

impl Catalog {
    /// Binds one table source per loaded table
    ///
    /// Loads the registry if this is its first use; a loader failure is
    /// returned here.
    pub fn open(name: &str, registry: Arc<Registry>) -> Result<Self> {
        let mut tables: HashMap<String, Arc<dyn TableSource>> = HashMap::new();
        for (table_name, loaded) in registry.tables()? {
            let table = MemoryTable::new(table_name, loaded.schema.clone(), loaded.dataset.clone());
            tables.insert(table_name.clone(), Arc::new(table));
        }
        info!(catalog = name, tables = tables.len(), "catalog opened");

        Ok(Self {
            name: name.to_string(),
            registry,
            tables,
            functions: FunctionRegistry::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn table(&self, name: &str) -> Result<Arc<dyn TableSource>> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TableNotFound(format!("{}.{}", self.name, name)))
    }

    /// Table names, sorted
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(|n| n.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Ordered columns of a table with their engine types
    pub fn describe(&self, name: &str) -> Result<Vec<ColumnDescriptor>> {
        let table = self.table(name)?;
        Ok(table
            .schema()
            .fields()
            .iter()
            .map(|f| ColumnDescriptor {
                name: f.name.clone(),
                sql_type: f.field_type.sql_type(),
            })
            .collect())
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Invokes a registered scalar function
    pub fn call(&self, function: &str, args: &[Value]) -> Result<Value> {
        debug!(catalog = %self.name, function, "scalar call");
        self.functions.call(function, args)
    }
}
