use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A user joined with their fitness profile.
///
/// Profile fields are free text as entered by the wider application; codes
/// outside the known vocabularies are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: i64,
    pub name: String,
    pub goal: Option<String>,
    pub experience_level: Option<String>,
    pub lifestyle: Option<String>,
    pub gender: Option<String>,
}
