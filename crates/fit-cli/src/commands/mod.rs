use fit_config::FitConfig;
use fit_db::FitDb;

use crate::cli::{Commands, GlobalFlags};

pub mod catalog;
pub mod generate;
pub mod routine;
pub mod schema;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    db: FitDb,
    config: &FitConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    tracing::debug!(?command, db = %config.database.path, "dispatching command");
    match command {
        Commands::Generate(args) => generate::handle(&args, db, config, flags).await,
        Commands::Routine { action } => routine::handle(&action, &db, flags).await,
        Commands::Catalog => catalog::handle(&db, flags).await,
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
