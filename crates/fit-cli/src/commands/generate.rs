use anyhow::Context;
use fit_config::FitConfig;
use fit_db::FitDb;
use fit_model::GeminiClient;
use fit_routine::RoutineGenerator;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::output::output;
use crate::progress::Progress;

/// Handle `fitgen generate`.
///
/// A failed run still prints its failure body on stdout before the error is
/// returned, so scripted callers get the same `{error, stage, message}`
/// shape an HTTP caller would.
pub async fn handle(
    args: &GenerateArgs,
    db: FitDb,
    config: &FitConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let model_config = config.require_model()?;
    let client = GeminiClient::new(model_config).context("failed to build model client")?;
    let generator = RoutineGenerator::new(db, client);

    let progress = Progress::spinner(
        &format!("generating routine for user {}", args.user_id),
        flags,
    );
    match generator.generate_routine(args.user_id).await {
        Ok(result) => {
            progress.finish_clear();
            output(&result, flags.format)
        }
        Err(error) => {
            progress.finish_err(error.kind());
            output(&error.to_failure(), flags.format)?;
            Err(anyhow::Error::new(error)
                .context(format!("routine generation failed for user {}", args.user_id)))
        }
    }
}
