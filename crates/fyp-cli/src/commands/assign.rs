use fyp_assign::Assignment;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AssignArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AssignResponse {
    school_id: String,
    school_name: String,
    department_id: String,
    department_name: String,
    assignment: Assignment,
}

/// Dry run of the tier search. Nothing is written.
pub async fn handle(args: &AssignArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let engine = &ctx.engine;
    let assignment = engine.find_assignment(&args.school, &args.department).await;

    output(
        &AssignResponse {
            school_id: args.school.clone(),
            school_name: engine.school_name(&args.school).await,
            department_id: args.department.clone(),
            department_name: engine.department_name(&args.department).await,
            assignment,
        },
        flags.format,
    )
}
