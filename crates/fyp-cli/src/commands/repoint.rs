use crate::cli::GlobalFlags;
use crate::cli::root_commands::RepointArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &RepointArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = ctx
        .engine
        .repointer()
        .repoint(&args.student, &args.supervisor)
        .await?;
    output(&summary, flags.format)
}
