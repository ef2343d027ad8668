use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    config::Config,
    error::{Error, Result},
    sql::schema::{FieldType, Schema},
    storage::{
        dataset::{Attribute, Dataset, Record},
        loader::{Loader, TableDefinition},
    },
    vector::codec::{self, DecimalVector},
};

pub const TABLE_NAME: &str = "employees";

const NAMES: [(&str, &str); 50] = [
    ("Karter", "Dennis"), ("Maisie", "Franco"), ("Gage", "Wilkins"), ("Amalia", "Reilly"),
    ("Alvaro", "Barton"), ("Danna", "McGee"), ("Conner", "Fuller"), ("Oakley", "Parks"),
    ("Gianni", "Andrade"), ("Emmy", "Schmitt"), ("Murphy", "Knox"), ("Kallie", "Walls"),
    ("Larry", "Dejesus"), ("Julissa", "Quinn"), ("Rhys", "Richards"), ("Trinity", "Mack"),
    ("Esteban", "Holt"), ("Adelynn", "McBride"), ("Denver", "Beasley"), ("Jaylah", "Hartman"),
    ("Baker", "Mayo"), ("Aarya", "Martinez"), ("Alexander", "Gilbert"), ("Jocelyn", "Benton"),
    ("Jamal", "Robles"), ("Felicity", "Rowland"), ("Eliezer", "Fowler"), ("Lennon", "Erickson"),
    ("Johnny", "Finley"), ("Jovie", "Mathis"), ("Gustavo", "Waters"), ("Bristol", "Leal"),
    ("Cedric", "Huang"), ("Francesca", "Cunningham"), ("Alejandro", "Zimmerman"),
    ("Ariyah", "Morrison"), ("Maximus", "Ayala"), ("Blair", "Hernandez"), ("Mason", "McCullough"),
    ("Hana", "Zhang"), ("Isaias", "Stokes"), ("Miranda", "Hutchinson"), ("Korbin", "Caldwell"),
    ("Evelynn", "Kramer"), ("Kylan", "Reilly"), ("Tori", "Neal"), ("Eddie", "Butler"),
    ("Athena", "Liu"), ("Pedro", "Rich"), ("Sunny", "Goodman"),
];

/// Built-in `employees` table of synthetic people with a feature vector each
#[derive(Debug, Clone)]
pub struct EmployeesTable {
    seed: Option<u64>,
    dimension: usize,
    bound: f64,
}

impl EmployeesTable {
    pub fn new(config: &Config) -> Self {
        Self {
            seed: config.employee_seed,
            dimension: config.vector_dimension,
            bound: config.vector_bound,
        }
    }
}

impl TableDefinition for EmployeesTable {
    fn table_name(&self) -> &str {
        TABLE_NAME
    }

    fn build_schema(&self) -> Result<Schema> {
        Schema::builder("id")
            .field("firstname", FieldType::Text)
            .field("lastname", FieldType::Text)
            .field("email", FieldType::Text)
            .field("age", FieldType::Integer)
            .field("vec", FieldType::DecimalVector)
            .build()
    }

    fn loader(&self) -> Box<dyn Loader> {
        Box::new(EmployeesLoader {
            seed: self.seed,
            dimension: self.dimension,
            bound: self.bound,
        })
    }
}

/// Generates one record per entry of the fixed name list
pub struct EmployeesLoader {
    seed: Option<u64>,
    dimension: usize,
    bound: f64,
}

impl Loader for EmployeesLoader {
    fn load_data(&self) -> Result<Dataset> {
        if self.dimension == 0 || !(self.bound > 0.0 && self.bound.is_finite()) {
            return Err(Error::Config(format!(
                "cannot generate vectors of dimension {} bounded by {}",
                self.dimension, self.bound
            )));
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut dataset = Dataset::new();
        for (i, (first, last)) in NAMES.iter().enumerate() {
            let email = format!("{}.{}@gmail.com", first, last).to_lowercase();
            let age: i64 = rng.gen_range(20..70);

            let mut vector = DecimalVector::new();
            for _ in 0..self.dimension {
                let element: f64 = rng.gen_range(0.0..self.bound);
                // shortest round-trip text of the double, as the element's literal
                vector.push(codec::parse_decimal(&element.to_string())?);
            }
            debug!(id = i + 1, vector = %vector, "generated employee");

            let record = Record::new()
                .with("firstname", Attribute::Text(first.to_string()))
                .with("lastname", Attribute::Text(last.to_string()))
                .with("email", Attribute::Text(email))
                .with("age", Attribute::Integer(age))
                .with("vec", Attribute::from(&vector));
            dataset.insert(i as i64 + 1, record);
        }
        Ok(dataset)
    }
}
