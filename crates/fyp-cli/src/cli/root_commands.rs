use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show which supervisor a student would get, without writing anything
    Assign(AssignArgs),
    /// Register a student and assign a supervisor
    Register(RegisterArgs),
    /// Move a student to another supervisor
    Reassign(ReassignArgs),
    /// Point all of a student's projects at a supervisor
    Repoint(RepointArgs),
    /// List supervisors and their load
    Supervisors,
    /// List the students of one supervisor
    Students(StudentsArgs),
}

impl Commands {
    /// Whether the command writes to the directory.
    #[must_use]
    pub const fn mutates(&self) -> bool {
        matches!(self, Self::Register(_) | Self::Reassign(_) | Self::Repoint(_))
    }
}

#[derive(Debug, Args)]
pub struct AssignArgs {
    #[arg(long)]
    pub school: String,
    #[arg(long)]
    pub department: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// User id issued at sign-up
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub school: String,
    #[arg(long)]
    pub department: String,
}

#[derive(Debug, Args)]
pub struct ReassignArgs {
    #[arg(long)]
    pub student: String,
    /// New supervisor id
    #[arg(long)]
    pub to: String,
    /// Current supervisor id (read from the student record when omitted)
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(Debug, Args)]
pub struct RepointArgs {
    #[arg(long)]
    pub student: String,
    #[arg(long)]
    pub supervisor: String,
}

#[derive(Debug, Args)]
pub struct StudentsArgs {
    #[arg(long)]
    pub supervisor: String,
}
