//! JSON Schema for the Masonry configuration file.

use crate::config::MasonryConfig;

/// Schema identifier embedded as `$id`.
const SCHEMA_ID: &str = "https://masonry.dev/schema/config.schema.json";

/// Generates a JSON Schema for the Masonry configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(MasonryConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Generates a pretty-printed JSON Schema string for the configuration.
#[must_use]
pub fn generate_schema_json() -> String {
    let schema = generate_schema();
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
