//! Directory fixtures shared by the engine integration tests.

#![allow(dead_code)]

use fyp_core::enums::Collection;
use fyp_store::{DirectoryStore, MemoryStore, Query, fields_from};
use serde_json::json;

pub const SCHOOL: &str = "sch-eng";
pub const OTHER_SCHOOL: &str = "sch-arts";
pub const DEPT: &str = "dep-cs";
pub const OTHER_DEPT: &str = "dep-ee";

/// Seed an active supervisor named `Dr. <id>`.
pub async fn supervisor(store: &MemoryStore, id: &str, school: &str, dept: &str, current: u32, max: u32) {
    store
        .seed(
            Collection::Supervisors,
            id,
            fields_from([
                ("name", json!(format!("Dr. {id}"))),
                ("schoolId", json!(school)),
                ("departmentId", json!(dept)),
                ("active", json!(true)),
                ("currentStudents", json!(current)),
                ("maxStudents", json!(max)),
            ]),
        )
        .await;
}

pub async fn inactive_supervisor(store: &MemoryStore, id: &str, school: &str, dept: &str) {
    store
        .seed(
            Collection::Supervisors,
            id,
            fields_from([
                ("name", json!(format!("Dr. {id}"))),
                ("schoolId", json!(school)),
                ("departmentId", json!(dept)),
                ("active", json!(false)),
                ("currentStudents", json!(0)),
                ("maxStudents", json!(10)),
            ]),
        )
        .await;
}

pub async fn student(store: &MemoryStore, id: &str, supervisor_id: Option<&str>) {
    store
        .seed(
            Collection::Users,
            id,
            fields_from([
                ("username", json!(id)),
                ("email", json!(format!("{id}@uni.test"))),
                ("role", json!("student")),
                ("schoolId", json!(SCHOOL)),
                ("departmentId", json!(DEPT)),
                ("supervisorId", json!(supervisor_id)),
            ]),
        )
        .await;
}

pub async fn project(store: &MemoryStore, id: &str, student_id: &str, supervisor_id: &str) {
    store
        .seed(
            Collection::Projects,
            id,
            fields_from([
                ("studentId", json!(student_id)),
                ("supervisorId", json!(supervisor_id)),
                ("title", json!(format!("Project {id}"))),
            ]),
        )
        .await;
}

pub async fn load(store: &MemoryStore, supervisor_id: &str) -> u64 {
    store
        .get(Collection::Supervisors, supervisor_id)
        .await
        .unwrap()
        .and_then(|doc| doc.get_u64("currentStudents"))
        .unwrap()
}

pub async fn student_supervisor(store: &MemoryStore, student_id: &str) -> Option<String> {
    store
        .get(Collection::Users, student_id)
        .await
        .unwrap()
        .unwrap()
        .get_str("supervisorId")
        .map(str::to_string)
}

pub async fn project_supervisors(store: &MemoryStore, student_id: &str) -> Vec<String> {
    store
        .query(&Query::new(Collection::Projects).where_eq("studentId", student_id))
        .await
        .unwrap()
        .iter()
        .map(|doc| doc.get_str("supervisorId").unwrap_or_default().to_string())
        .collect()
}
