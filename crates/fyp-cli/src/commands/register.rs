use fyp_assign::NewStudent;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RegisterArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: RegisterArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let student = NewStudent {
        id: args.id,
        username: args.username,
        email: args.email,
        school_id: args.school,
        department_id: args.department,
    };
    let report = ctx.engine.register_student(&student).await?;

    if let Some(Err(error)) = &report.counter {
        tracing::error!(%error, student_id = %report.student_id, "registration left the supervisor counter stale");
    }
    output(&report, flags.format)
}
