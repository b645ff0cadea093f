use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SupervisorRow {
    id: String,
    name: String,
    department_id: String,
    active: bool,
    current_students: u32,
    max_students: u32,
    remaining: u32,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    supervisors: Vec<SupervisorRow>,
    count: usize,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let supervisors: Vec<SupervisorRow> = ctx
        .engine
        .list_supervisors()
        .await?
        .into_iter()
        .map(|sup| SupervisorRow {
            remaining: sup.remaining_capacity(),
            id: sup.id,
            name: sup.name,
            department_id: sup.department_id,
            active: sup.active,
            current_students: sup.current_students,
            max_students: sup.max_students,
        })
        .collect();

    let count = supervisors.len();
    output(&ListResponse { supervisors, count }, flags.format)
}
