use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Assign(args) => commands::assign::handle(&args, ctx, flags).await,
        Commands::Register(args) => commands::register::handle(args, ctx, flags).await,
        Commands::Reassign(args) => commands::reassign::handle(&args, ctx, flags).await,
        Commands::Repoint(args) => commands::repoint::handle(&args, ctx, flags).await,
        Commands::Supervisors => commands::supervisors::handle(ctx, flags).await,
        Commands::Students(args) => commands::students::handle(&args, ctx, flags).await,
    }
}
