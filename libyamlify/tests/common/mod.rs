//! Domain types shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use libyamlify::{impl_from_node, Describe, Field, Result, Values};

/// Root test directory.
pub fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// Read a fixture document from test/documents/.
pub fn document(name: &str) -> String {
    std::fs::read_to_string(test_root().join("documents").join(name)).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub nr: i32,
    pub city: String,
}

impl Describe for Address {
    const NAME: &'static str = "Address";

    fn fields() -> Vec<Field> {
        vec![
            Field::required::<String>("street"),
            Field::required::<i32>("nr"),
            Field::required::<String>("city"),
        ]
    }

    fn construct(mut values: Values) -> Result<Self> {
        Ok(Address {
            street: values.take("street")?,
            nr: values.take("nr")?,
            city: values.take("city")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub subject: String,
    pub classification: i32,
}

impl Describe for Grade {
    const NAME: &'static str = "Grade";

    fn fields() -> Vec<Field> {
        vec![
            Field::required::<String>("subject"),
            Field::required::<i32>("classification"),
        ]
    }

    fn construct(mut values: Values) -> Result<Self> {
        Ok(Grade {
            subject: values.take("subject")?,
            classification: values.take("classification")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub name: String,
    pub nr: i32,
    pub from: String,
    pub address: Option<Address>,
    pub grades: Vec<Grade>,
}

impl Describe for Student {
    const NAME: &'static str = "Student";

    fn fields() -> Vec<Field> {
        vec![
            Field::required::<String>("name"),
            Field::required::<i32>("nr"),
            Field::required::<String>("from"),
            Field::optional::<Option<Address>>("address"),
            Field::optional::<Vec<Grade>>("grades"),
        ]
    }

    fn construct(mut values: Values) -> Result<Self> {
        Ok(Student {
            name: values.take("name")?,
            nr: values.take("nr")?,
            from: values.take("from")?,
            address: values.take("address")?,
            grades: values.take("grades")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classroom {
    pub id: String,
    pub students: Vec<Student>,
}

impl Describe for Classroom {
    const NAME: &'static str = "Classroom";

    fn fields() -> Vec<Field> {
        vec![
            Field::required::<String>("id"),
            Field::required::<Vec<Student>>("students"),
        ]
    }

    fn construct(mut values: Values) -> Result<Self> {
        Ok(Classroom {
            id: values.take("id")?,
            students: values.take("students")?,
        })
    }
}

/// School reads `address` from `location` and `founded` from `established`.
#[derive(Debug, Clone, PartialEq)]
pub struct School {
    pub id: i32,
    pub name: String,
    pub address: Address,
    pub founded: i32,
}

impl Describe for School {
    const NAME: &'static str = "School";

    fn fields() -> Vec<Field> {
        vec![
            Field::required::<i32>("id"),
            Field::required::<String>("name"),
            Field::required::<Address>("address").key("location"),
            Field::required::<i32>("founded").key("established"),
        ]
    }

    fn construct(mut values: Values) -> Result<Self> {
        Ok(School {
            id: values.take("id")?,
            name: values.take("name")?,
            address: values.take("address")?,
            founded: values.take("founded")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub name: String,
    pub date: NaiveDate,
}

impl Describe for Book {
    const NAME: &'static str = "Book";

    fn fields() -> Vec<Field> {
        vec![
            Field::required::<String>("name"),
            Field::required::<NaiveDate>("date"),
        ]
    }

    fn construct(mut values: Values) -> Result<Self> {
        Ok(Book {
            name: values.take("name")?,
            date: values.take("date")?,
        })
    }
}

/// Counts every constructed professor.
pub static PROFESSORS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq)]
pub struct Professor {
    pub id: i32,
    pub name: String,
}

impl Professor {
    pub fn new(id: i32, name: String) -> Self {
        PROFESSORS.fetch_add(1, Ordering::SeqCst);
        Professor { id, name }
    }

    pub fn counter() -> usize {
        PROFESSORS.load(Ordering::SeqCst)
    }
}

impl Describe for Professor {
    const NAME: &'static str = "Professor";

    fn fields() -> Vec<Field> {
        vec![
            Field::required::<i32>("id"),
            Field::required::<String>("name"),
        ]
    }

    fn construct(mut values: Values) -> Result<Self> {
        Ok(Professor::new(values.take("id")?, values.take("name")?))
    }
}

impl_from_node!(Address, Grade, Student, Classroom, School, Book, Professor);

pub fn maria_candida() -> Student {
    Student {
        name: "Maria Candida".into(),
        nr: 873435,
        from: "Oleiros".into(),
        address: Some(Address {
            street: "Rua Rosa".into(),
            nr: 78,
            city: "Lisbon".into(),
        }),
        grades: vec![grade("LAE", 18), grade("PDM", 15), grade("PC", 19)],
    }
}

pub fn jose_carioca() -> Student {
    Student {
        name: "Jose Carioca".into(),
        nr: 1214398,
        from: "Tamega".into(),
        address: Some(Address {
            street: "Rua Azul".into(),
            nr: 12,
            city: "Porto".into(),
        }),
        grades: vec![grade("TDS", 20), grade("LAE", 18)],
    }
}

pub fn grade(subject: &str, classification: i32) -> Grade {
    Grade {
        subject: subject.into(),
        classification,
    }
}
