use crate::{error::Result, sql::schema::Schema, storage::dataset::Dataset};

/// Produces the complete dataset of one table
///
/// Called once per table per registry. Loaders need not be fail-safe: an
/// error aborts registry initialization.
pub trait Loader: Send + Sync {
    fn load_data(&self) -> Result<Dataset>;
}

/// A table the registry knows how to build
///
/// Adding a table means implementing this trait and adding the definition
/// to the registration list; nothing else changes.
pub trait TableDefinition: Send + Sync {
    /// Stable, unique table name
    fn table_name(&self) -> &str;

    /// Ordered field definitions, key first
    fn build_schema(&self) -> Result<Schema>;

    fn loader(&self) -> Box<dyn Loader>;
}
