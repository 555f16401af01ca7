use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One exercise of the catalog. The full set of ids is the whitelist that
/// generated routines are validated against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub difficulty: Option<String>,
}
