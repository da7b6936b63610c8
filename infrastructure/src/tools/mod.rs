//! Provider-facing tool serialization.

mod schema;

pub use schema::JsonSchemaToolConverter;
