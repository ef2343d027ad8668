use std::{collections::HashMap, sync::Arc};

use once_cell::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    error::{Error, Result},
    sql::schema::Schema,
    storage::{dataset::Dataset, employees::EmployeesTable, loader::TableDefinition},
};

/// Schema and frozen dataset of one loaded table
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub schema: Arc<Schema>,
    pub dataset: Arc<Dataset>,
}

/// Holder of every table's loaded data
///
/// Built once at startup and shared by handle (`Arc<Registry>`). The table
/// data is loaded on first access: concurrent first callers block until a
/// single initializer has run every loader, then all observe the same map.
/// A failed initialization is kept and returned on every later access.
pub struct Registry {
    definitions: Vec<Arc<dyn TableDefinition>>,
    tables: OnceCell<Result<HashMap<String, LoadedTable>>>,
}

impl Registry {
    pub fn new(definitions: Vec<Arc<dyn TableDefinition>>) -> Self {
        Self {
            definitions,
            tables: OnceCell::new(),
        }
    }

    /// Registry with the built-in tables
    pub fn builtin(config: &Config) -> Self {
        Self::new(vec![Arc::new(EmployeesTable::new(config))])
    }

    pub fn definitions(&self) -> &[Arc<dyn TableDefinition>] {
        &self.definitions
    }

    pub fn is_initialized(&self) -> bool {
        self.tables.get().is_some()
    }

    /// Returns every loaded table by name, loading them on first call
    pub fn tables(&self) -> Result<&HashMap<String, LoadedTable>> {
        self.tables
            .get_or_init(|| self.load_all())
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn table(&self, name: &str) -> Result<&LoadedTable> {
        self.tables()?
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn dataset(&self, name: &str) -> Result<Arc<Dataset>> {
        Ok(self.table(name)?.dataset.clone())
    }

    fn load_all(&self) -> Result<HashMap<String, LoadedTable>> {
        info!(tables = self.definitions.len(), "loading table data");

        let mut tables = HashMap::new();
        for definition in &self.definitions {
            let name = definition.table_name();
            let schema = definition.build_schema().inspect_err(|e| {
                error!(table = name, error = %e, "invalid table schema");
            })?;
            let dataset = definition.loader().load_data().map_err(|e| {
                error!(table = name, error = %e, "table loader failed");
                Error::Load {
                    table: name.to_string(),
                    reason: e.to_string(),
                }
            })?;
            debug!(table = name, records = dataset.len(), "table loaded");

            let loaded = LoadedTable {
                schema: Arc::new(schema),
                dataset: Arc::new(dataset),
            };
            if tables.insert(name.to_string(), loaded).is_some() {
                warn!(table = name, "table registered twice, keeping the later definition");
            }
        }

        info!(tables = tables.len(), "table data loaded");
        Ok(tables)
    }
}
