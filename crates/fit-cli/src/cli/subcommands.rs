use clap::Subcommand;

/// Stored routine commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RoutineCommands {
    /// Get a routine with its exercises.
    Get { id: i64 },
    /// List a user's routines, newest first.
    List {
        #[arg(long)]
        user: i64,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}
