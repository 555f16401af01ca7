use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::RoutineCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Generate and store a routine for a user.
    Generate(GenerateArgs),
    /// Stored routines.
    Routine {
        #[command(subcommand)]
        action: RoutineCommands,
    },
    /// List the exercise catalog.
    Catalog,
    /// Print the JSON Schema of an output type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Id of the user to generate for.
    pub user_id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Output type to describe.
    #[arg(value_enum)]
    pub type_name: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    GenerationResult,
    GenerationFailure,
    Routine,
}
