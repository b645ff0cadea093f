use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReassignArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &ReassignArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = match &args.from {
        Some(from) => {
            ctx.engine
                .reassign(&args.student, Some(from.as_str()), &args.to)
                .await?
        }
        None => ctx.engine.reassign_student(&args.student, &args.to).await?,
    };

    if let Some(Err(error)) = &report.counters.released {
        tracing::error!(%error, "previous supervisor counter not released");
    }
    if let Some(Err(error)) = &report.counters.claimed {
        tracing::error!(%error, "new supervisor counter not claimed");
    }
    if let Err(error) = &report.projects {
        tracing::error!(%error, "projects still point at the previous supervisor");
    }
    output(&report, flags.format)
}
