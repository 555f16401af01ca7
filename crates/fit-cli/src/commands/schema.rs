use fit_core::entities::RoutineDetail;
use fit_core::responses::{GenerationFailure, GenerationResult};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `fitgen schema`. Needs neither config nor a database.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(args.type_name), flags.format)
}

fn schema(type_name: SchemaType) -> Schema {
    match type_name {
        SchemaType::GenerationResult => schema_for!(GenerationResult),
        SchemaType::GenerationFailure => schema_for!(GenerationFailure),
        SchemaType::Routine => schema_for!(RoutineDetail),
    }
}
