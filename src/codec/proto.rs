//! Schema-validated Protobuf binary codec.
//!
//! Wire layout mirrors the original `employee.proto`: an `Employees` root
//! message holding repeated `Employee { id = 1, name = 2, salary = 3 }`.
//! Message layout is fixed at compile time through prost derives; the
//! runtime schema resource carries the field validation rules, is loaded
//! once at startup, and is shared read-only across all calls.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use prost::Message;
use serde::Deserialize;

use crate::codec::Codec;
use crate::dataset::{Dataset, Record};
use crate::error::{DecodeError, EncodeError, SchemaError, VerificationError};

#[derive(Clone, PartialEq, Message)]
pub struct EmployeeProto {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(double, tag = "3")]
    pub salary: f64,
}

#[derive(Clone, PartialEq, Message)]
pub struct EmployeeListProto {
    #[prost(message, repeated, tag = "1")]
    pub employee: Vec<EmployeeProto>,
}

impl From<&Record> for EmployeeProto {
    fn from(r: &Record) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            salary: r.salary,
        }
    }
}

impl From<EmployeeProto> for Record {
    fn from(p: EmployeeProto) -> Self {
        Record::new(p.id, p.name, p.salary)
    }
}

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Positive,
    Unique,
    NonEmpty,
    NonNegative,
}

impl Constraint {
    fn as_str(&self) -> &'static str {
        match self {
            Constraint::Positive => "positive",
            Constraint::Unique => "unique",
            Constraint::NonEmpty => "non_empty",
            Constraint::NonNegative => "non_negative",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldRule {
    pub field: String,
    pub constraint: Constraint,
}

/// Field-rule schema resource for the `Employees` message.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSchema {
    pub schema_version: u32,
    pub message: String,
    pub fields: Vec<FieldRule>,
}

impl FieldSchema {
    /// Load the schema from a file. Missing or malformed resources abort
    /// the run before any benchmarking starts.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let bytes = fs::read(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    /// The schema shipped with the binary, used when no `--schema` file
    /// is given.
    pub fn embedded() -> Result<Self, SchemaError> {
        Self::from_slice(include_bytes!("../../schemas/employees.schema.json"))
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        let schema: FieldSchema = serde_json::from_slice(bytes)?;
        if schema.schema_version != SCHEMA_VERSION {
            return Err(SchemaError::UnsupportedVersion(schema.schema_version));
        }
        if schema.fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        for rule in &schema.fields {
            let applicable = matches!(
                (rule.field.as_str(), rule.constraint),
                ("id", Constraint::Positive)
                    | ("id", Constraint::Unique)
                    | ("name", Constraint::NonEmpty)
                    | ("salary", Constraint::NonNegative)
            );
            if !applicable {
                return Err(SchemaError::UnsupportedRule {
                    field: rule.field.clone(),
                    constraint: rule.constraint.as_str().to_string(),
                });
            }
        }
        Ok(schema)
    }

    /// Check dataset conformance, returning the first violation as a
    /// non-empty diagnostic.
    pub fn check(&self, dataset: &Dataset) -> Result<(), String> {
        for rule in &self.fields {
            match (rule.field.as_str(), rule.constraint) {
                ("id", Constraint::Positive) => {
                    for (i, r) in dataset.records().iter().enumerate() {
                        if r.id == 0 {
                            return Err(format!("record {}: id must be positive", i));
                        }
                    }
                }
                ("id", Constraint::Unique) => {
                    let mut seen = HashSet::new();
                    for (i, r) in dataset.records().iter().enumerate() {
                        if !seen.insert(r.id) {
                            return Err(format!("record {}: duplicate id {}", i, r.id));
                        }
                    }
                }
                ("name", Constraint::NonEmpty) => {
                    for (i, r) in dataset.records().iter().enumerate() {
                        if r.name.is_empty() {
                            return Err(format!("record {}: name must be non-empty", i));
                        }
                    }
                }
                ("salary", Constraint::NonNegative) => {
                    for (i, r) in dataset.records().iter().enumerate() {
                        if !(r.salary >= 0.0) {
                            return Err(format!(
                                "record {}: salary must be non-negative (got {})",
                                i, r.salary
                            ));
                        }
                    }
                }
                // Unreachable: rule applicability is validated at load time.
                _ => {}
            }
        }
        Ok(())
    }
}

pub struct ProtoCodec {
    schema: Arc<FieldSchema>,
}

impl ProtoCodec {
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        Self { schema }
    }
}

impl Codec for ProtoCodec {
    fn name(&self) -> &'static str {
        "proto"
    }

    fn file_extension(&self) -> &'static str {
        "proto"
    }

    fn encode(&self, dataset: &Dataset) -> Result<Vec<u8>, EncodeError> {
        // Conformance guard runs before any bytes are produced; a dataset
        // the schema rejects fails loudly instead of truncating.
        self.schema
            .check(dataset)
            .map_err(|diagnostic| EncodeError::SchemaMismatch { diagnostic })?;

        let list = EmployeeListProto {
            employee: dataset.records().iter().map(EmployeeProto::from).collect(),
        };
        Ok(list.encode_to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Dataset, DecodeError> {
        let list = EmployeeListProto::decode(bytes)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;
        Ok(Dataset::new(
            list.employee.into_iter().map(Record::from).collect(),
        ))
    }

    fn verify(&self, dataset: &Dataset) -> Result<(), VerificationError> {
        self.schema
            .check(dataset)
            .map_err(|diagnostic| VerificationError::Schema { diagnostic })
    }
}
