// Rust guideline compliant 2026-10-18

//! Pearly Model Library
//!
//! This crate provides the model layer of the Pearly framework:
//! - Value objects with typed fields and mode-dependent reads
//! - Type converters (string, number, date, datetime) and their registry
//! - Static schemas with custom getters, setters and object validators
//! - Dirty tracking, aggregated validation and snapshots
//! - Factories and collections for the view/controller layer
//! - Configuration and error types

pub mod collection;
pub mod config;
pub mod error;
pub mod escape;
pub mod factory;
pub mod registry;
pub mod schema;
pub mod spec;
pub mod types;
pub mod value;
pub mod vo;

pub use collection::VoCollection;
pub use config::Config;
pub use error::{Error, Result, ValidationFailure};
pub use escape::EscapeFn;
pub use factory::VoFactory;
pub use registry::{Context, TypeRegistry};
pub use schema::{schema_of, Record, Schema, SchemaBuilder};
pub use spec::FieldSpec;
pub use types::TypeConverter;
pub use value::Value;
pub use vo::{Mode, Snapshot, ValueObject};
