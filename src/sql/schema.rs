use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    sql::types::SqlType,
};

/// Semantic type of a table field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Integer,
    Text,
    /// Encoded decimal vector, stored and scanned as text
    DecimalVector,
}

impl FieldType {
    /// Type the field is declared as to the SQL engine
    pub fn sql_type(self) -> SqlType {
        match self {
            FieldType::Integer => SqlType::BigInt,
            FieldType::Text => SqlType::Varchar,
            FieldType::DecimalVector => SqlType::Any,
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
}

/// Ordered field definitions of a table
///
/// The first field is the record key. Field order is the positional layout
/// of every scanned row. Only constructed through [`Schema::new`], so a
/// schema always has its key field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Builds a validated schema
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        let schema = Self { fields };
        schema.validate()?;
        Ok(schema)
    }

    pub fn builder(key: &str) -> SchemaBuilder {
        SchemaBuilder::new(key)
    }

    /// Validates the schema: a key field of integer type, unique names
    pub fn validate(&self) -> Result<()> {
        let key = match self.fields.first() {
            Some(key) => key,
            None => return Err(Error::InvalidSchema("schema has no fields".into())),
        };
        if key.field_type != FieldType::Integer {
            return Err(Error::InvalidSchema(format!(
                "key field {} must be an integer",
                key.name
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate field name {}",
                    field.name
                )));
            }
        }
        Ok(())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The key field, always at position 0
    pub fn key(&self) -> &Field {
        &self.fields[0]
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns the position of a field
    pub fn position(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or(Error::InvalidArgument(format!("field {} not found", name)))
    }
}

/// Ordered field name / type pairs, key first
pub struct SchemaBuilder {
    fields: Vec<Field>,
}

impl SchemaBuilder {
    fn new(key: &str) -> Self {
        Self {
            fields: vec![Field {
                name: key.to_string(),
                field_type: FieldType::Integer,
            }],
        }
    }

    pub fn field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push(Field {
            name: name.to_string(),
            field_type,
        });
        self
    }

    pub fn build(self) -> Result<Schema> {
        Schema::new(self.fields)
    }
}
