use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    sql::{
        schema::{FieldType, Schema},
        types::{Row, Value},
    },
    storage::dataset::{Attribute, Dataset, Key, Record},
};

/// Lazy sequence of rows produced by a scan
pub type RowStream<'a> = Box<dyn Iterator<Item = Row> + Send + 'a>;

/// A table the SQL engine can type-check and scan
///
/// Implementations hold no mutable state: scans may run concurrently and
/// each call to `scan` starts over from the first record.
pub trait TableSource: Send + Sync {
    fn name(&self) -> &str;

    /// Ordered field definitions used to type-check queries
    fn schema(&self) -> &Schema;

    /// Materializes every record as a row, pulled on demand
    fn scan(&self) -> RowStream<'_>;
}

/// Table source over an in-memory dataset
#[derive(Debug, Clone)]
pub struct MemoryTable {
    name: String,
    schema: Arc<Schema>,
    dataset: Arc<Dataset>,
}

impl MemoryTable {
    pub fn new(name: &str, schema: Arc<Schema>, dataset: Arc<Dataset>) -> Self {
        Self {
            name: name.to_string(),
            schema,
            dataset,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl TableSource for MemoryTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn scan(&self) -> RowStream<'_> {
        debug!(table = %self.name, records = self.dataset.len(), "scan");
        Box::new(ScanIterator {
            table: &self.name,
            schema: &self.schema,
            inner: self.dataset.iter(),
        })
    }
}

/// Row iterator of a [`MemoryTable`] scan
pub struct ScanIterator<'a> {
    table: &'a str,
    schema: &'a Schema,
    inner: std::collections::btree_map::Iter<'a, Key, Record>,
}

impl<'a> Iterator for ScanIterator<'a> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, record)| materialize(self.table, self.schema, *key, record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Converts a record into a row laid out by the schema
///
/// Position 0 is always the key. Attribute values are copied verbatim,
/// vectors included. A missing attribute, or one whose type does not match
/// the declared field, is left empty and logged; the scan goes on.
fn materialize(table: &str, schema: &Schema, key: Key, record: &Record) -> Row {
    let mut row = Vec::with_capacity(schema.len());
    row.push(Value::Integer(key));

    for field in &schema.fields()[1..] {
        let value = match (field.field_type, record.get(&field.name)) {
            (FieldType::Integer, Some(Attribute::Integer(v))) => Value::Integer(*v),
            (FieldType::Text, Some(Attribute::Text(v))) => Value::Text(v.clone()),
            (FieldType::DecimalVector, Some(Attribute::Vector(v))) => {
                Value::EncodedVector(v.clone())
            }
            (expected, Some(found)) => {
                warn!(table, key, field = %field.name, ?expected, ?found, "unsupported attribute type, leaving value empty");
                Value::Null
            }
            (_, None) => {
                warn!(table, key, field = %field.name, "missing attribute, leaving value empty");
                Value::Null
            }
        };
        row.push(value);
    }
    row
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{MemoryTable, TableSource};
    use crate::{
        error::Result,
        sql::{
            schema::{FieldType, Schema},
            types::Value,
        },
        storage::dataset::{Attribute, Dataset, Record},
    };

    fn people() -> Result<MemoryTable> {
        let schema = Schema::builder("id")
            .field("name", FieldType::Text)
            .field("age", FieldType::Integer)
            .field("vec", FieldType::DecimalVector)
            .build()?;

        let dataset = Dataset::from_iter([
            (
                7,
                Record::new()
                    .with("name", Attribute::Text("ada".into()))
                    .with("age", Attribute::Integer(36))
                    .with("vec", Attribute::Vector("1::2.5".into())),
            ),
            (
                3,
                Record::new()
                    .with("name", Attribute::Integer(1))
                    .with("vec", Attribute::Vector("not decoded".into())),
            ),
        ]);
        Ok(MemoryTable::new("people", Arc::new(schema), Arc::new(dataset)))
    }

    #[test]
    fn test_scan() -> Result<()> {
        let table = people()?;
        assert_eq!(table.name(), "people");

        let rows: Vec<_> = table.scan().collect();
        assert_eq!(
            rows,
            vec![
                vec![
                    Value::Integer(3),
                    // type mismatch and missing attribute are left empty
                    Value::Null,
                    Value::Null,
                    Value::EncodedVector("not decoded".into()),
                ],
                vec![
                    Value::Integer(7),
                    Value::Text("ada".into()),
                    Value::Integer(36),
                    Value::EncodedVector("1::2.5".into()),
                ],
            ]
        );
        Ok(())
    }

    #[test]
    fn test_rows_align_with_schema() -> Result<()> {
        let table = people()?;
        let keys: Vec<i64> = table.dataset().iter().map(|(k, _)| *k).collect();

        let rows: Vec<_> = table.scan().collect();
        assert_eq!(rows.len(), keys.len());
        for (row, key) in rows.iter().zip(keys) {
            assert_eq!(row.len(), table.schema().len());
            assert_eq!(row[0], Value::Integer(key));
        }
        Ok(())
    }

    #[test]
    fn test_scan_is_restartable() -> Result<()> {
        let table = people()?;
        let mut first = table.scan();
        assert!(first.next().is_some());

        // a second scan starts over while the first is still open
        let second: Vec<_> = table.scan().collect();
        assert_eq!(second.len(), 2);
        assert_eq!(first.count(), 1);
        assert_eq!(table.dataset().len(), 2);
        Ok(())
    }

    #[test]
    fn test_key_only_schema() -> Result<()> {
        let schema = Schema::builder("id").build()?;
        let dataset = Dataset::from_iter([(1, Record::new())]);
        let table = MemoryTable::new("keys", Arc::new(schema), Arc::new(dataset));
        assert_eq!(table.scan().collect::<Vec<_>>(), vec![vec![Value::Integer(1)]]);
        Ok(())
    }
}
