use std::collections::{BTreeMap, HashMap, btree_map};

use crate::vector::codec::{self, DecimalVector};

/// Record key, the value of a table's first field
pub type Key = i64;

/// Typed attribute value of a record
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Integer(i64),
    Text(String),
    /// Encoded vector text
    Vector(String),
}

impl From<&DecimalVector> for Attribute {
    fn from(vector: &DecimalVector) -> Self {
        Attribute::Vector(codec::encode(vector.elements()))
    }
}

/// Named attributes of one record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    attributes: HashMap<String, Attribute>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value under the same name
    pub fn with(mut self, name: &str, value: Attribute) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Keyed records backing one table
///
/// Filled by a loader, then frozen behind an `Arc` by the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: BTreeMap<Key, Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the one it replaced
    pub fn insert(&mut self, key: Key, record: Record) -> Option<Record> {
        self.records.insert(key, record)
    }

    pub fn get(&self, key: Key) -> Option<&Record> {
        self.records.get(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Key, Record> {
        self.records.iter()
    }
}

impl FromIterator<(Key, Record)> for Dataset {
    fn from_iter<T: IntoIterator<Item = (Key, Record)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::{Attribute, Dataset, Record};
    use crate::vector::codec::DecimalVector;

    #[test]
    fn test_record() {
        let vector = DecimalVector::from(vec![BigDecimal::from(1), BigDecimal::new(25.into(), 1)]);
        let record = Record::new()
            .with("name", Attribute::Text("ada".into()))
            .with("age", Attribute::Integer(36))
            .with("vec", Attribute::from(&vector));

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("vec"), Some(&Attribute::Vector("1::2.5".into())));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_dataset() {
        let mut dataset = Dataset::new();
        assert!(dataset.insert(2, Record::new()).is_none());
        assert!(dataset.insert(1, Record::new()).is_none());

        let replaced = dataset.insert(2, Record::new().with("a", Attribute::Integer(1)));
        assert_eq!(replaced, Some(Record::new()));
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(dataset.get(2).map(|r| r.len()), Some(1));
    }
}
