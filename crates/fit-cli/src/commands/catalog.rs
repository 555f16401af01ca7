use fit_db::FitDb;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `fitgen catalog`.
pub async fn handle(db: &FitDb, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = db.list_catalog().await?;
    output(&catalog, flags.format)
}
