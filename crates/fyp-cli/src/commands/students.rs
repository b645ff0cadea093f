use fyp_core::entities::Student;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::StudentsArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StudentsResponse {
    supervisor_id: String,
    supervisor_name: String,
    students: Vec<Student>,
    count: usize,
}

pub async fn handle(args: &StudentsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let students = ctx.engine.students_of(&args.supervisor).await?;
    let count = students.len();

    output(
        &StudentsResponse {
            supervisor_id: args.supervisor.clone(),
            supervisor_name: ctx.engine.supervisor_name(&args.supervisor).await,
            students,
            count,
        },
        flags.format,
    )
}
