use anyhow::Context;
use fit_db::FitDb;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RoutineCommands;
use crate::output::output;

/// Handle `fitgen routine`.
pub async fn handle(action: &RoutineCommands, db: &FitDb, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        RoutineCommands::Get { id } => {
            let detail = db
                .get_routine(*id)
                .await
                .with_context(|| format!("failed to load routine {id}"))?;
            output(&detail, flags.format)
        }
        RoutineCommands::List { user, limit } => {
            let routines = db.list_routines_for_user(*user, *limit).await?;
            output(&routines, flags.format)
        }
    }
}
