//! Tiered supervisor search against the in-memory store.

mod common;

use common::{DEPT, OTHER_DEPT, OTHER_SCHOOL, SCHOOL, inactive_supervisor, supervisor};
use fyp_assign::{Assignment, AssignmentEngine, AssignmentSettings};
use fyp_core::enums::{Collection, Tier};
use fyp_store::{MemoryStore, Operation, fields_from};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn engine(store: MemoryStore) -> AssignmentEngine<MemoryStore> {
    AssignmentEngine::new(store)
}

#[tokio::test]
async fn picks_first_department_supervisor_with_capacity() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-a", SCHOOL, DEPT, 2, 5).await;
    supervisor(&store, "sup-b", SCHOOL, DEPT, 5, 5).await;
    // Least loaded but already full.
    supervisor(&store, "sup-f", SCHOOL, DEPT, 1, 1).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(
        found,
        Assignment::Assigned {
            supervisor_id: "sup-a".into(),
            supervisor_name: "Dr. sup-a".into(),
            tier: Tier::Department,
        }
    );
}

#[tokio::test]
async fn falls_back_to_other_department_in_school() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-c", SCHOOL, DEPT, 3, 3).await;
    supervisor(&store, "sup-e", SCHOOL, OTHER_DEPT, 1, 4).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found.supervisor_id(), "sup-e");
    assert_eq!(found.tier(), Some(Tier::School));
}

#[tokio::test]
async fn everyone_full_yields_unassigned() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-c", SCHOOL, DEPT, 3, 3).await;
    supervisor(&store, "sup-e", SCHOOL, OTHER_DEPT, 4, 4).await;
    supervisor(&store, "sup-z", OTHER_SCHOOL, "dep-art", 6, 6).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found, Assignment::Unassigned);
    assert_eq!(found.supervisor_id(), "");
}

#[tokio::test]
async fn empty_directory_yields_unassigned() {
    let found = engine(MemoryStore::new()).find_assignment(SCHOOL, DEPT).await;
    assert!(!found.is_assigned());
}

#[tokio::test]
async fn department_wins_over_less_loaded_outsiders() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-dept", SCHOOL, DEPT, 4, 5).await;
    supervisor(&store, "sup-school", SCHOOL, OTHER_DEPT, 0, 5).await;
    supervisor(&store, "sup-far", OTHER_SCHOOL, "dep-art", 0, 5).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found.supervisor_id(), "sup-dept");
    assert_eq!(found.tier(), Some(Tier::Department));
}

#[tokio::test]
async fn school_tier_groups_by_department_before_load() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-b", SCHOOL, "dep-b", 0, 5).await;
    supervisor(&store, "sup-a", SCHOOL, "dep-a", 3, 5).await;

    let found = engine(store).find_assignment(SCHOOL, "dep-z").await;

    assert_eq!(found.supervisor_id(), "sup-a");
}

#[tokio::test]
async fn global_tier_only_considers_least_loaded() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-tight", OTHER_SCHOOL, "dep-art", 2, 2).await;
    supervisor(&store, "sup-roomy", OTHER_SCHOOL, "dep-art", 3, 10).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found, Assignment::Unassigned);
}

#[tokio::test]
async fn global_tier_assigns_from_other_school() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-far", OTHER_SCHOOL, "dep-art", 1, 3).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found.supervisor_id(), "sup-far");
    assert_eq!(found.tier(), Some(Tier::Any));
}

#[tokio::test]
async fn inactive_supervisors_are_never_chosen() {
    let store = MemoryStore::new();
    inactive_supervisor(&store, "sup-off", SCHOOL, DEPT).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found, Assignment::Unassigned);
}

#[rstest]
#[case(0, 1, true)]
#[case(4, 5, true)]
#[case(5, 5, false)]
#[case(7, 5, false)]
#[tokio::test]
async fn never_selects_a_full_supervisor(#[case] current: u32, #[case] max: u32, #[case] assigned: bool) {
    let store = MemoryStore::new();
    supervisor(&store, "sup-only", SCHOOL, DEPT, current, max).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found.is_assigned(), assigned);
}

#[tokio::test]
async fn missing_capacity_defaults_to_five() {
    let store = MemoryStore::new();
    store
        .seed(
            Collection::Supervisors,
            "sup-legacy",
            fields_from([
                ("departmentId", json!(DEPT)),
                ("schoolId", json!(SCHOOL)),
                ("active", json!(true)),
                ("currentStudents", json!(4)),
            ]),
        )
        .await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found.supervisor_id(), "sup-legacy");
    assert_eq!(found.supervisor_name(), "Unknown Supervisor");
}

/// Seed an active supervisor in `DEPT` with no `maxStudents` field.
async fn uncapped_supervisor(store: &MemoryStore, id: &str, current: u32) {
    store
        .seed(
            Collection::Supervisors,
            id,
            fields_from([
                ("name", json!(format!("Dr. {id}"))),
                ("departmentId", json!(DEPT)),
                ("schoolId", json!(SCHOOL)),
                ("active", json!(true)),
                ("currentStudents", json!(current)),
            ]),
        )
        .await;
}

#[rstest]
#[case(1, true)]
#[case(2, false)]
#[case(3, false)]
#[tokio::test]
async fn missing_capacity_uses_configured_default(#[case] current: u32, #[case] assigned: bool) {
    let store = MemoryStore::new();
    uncapped_supervisor(&store, "sup-legacy", current).await;
    let settings = AssignmentSettings {
        default_max_students: 2,
        ..AssignmentSettings::default()
    };

    let found = AssignmentEngine::with_settings(store, settings)
        .find_assignment(SCHOOL, DEPT)
        .await;

    assert_eq!(found.is_assigned(), assigned);
}

#[tokio::test]
async fn explicit_capacity_ignores_configured_default() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-a", SCHOOL, DEPT, 3, 5).await;
    let settings = AssignmentSettings {
        default_max_students: 2,
        ..AssignmentSettings::default()
    };

    let found = AssignmentEngine::with_settings(store, settings)
        .find_assignment(SCHOOL, DEPT)
        .await;

    assert_eq!(found.supervisor_id(), "sup-a");
}

#[tokio::test]
async fn failed_tier_query_falls_through_to_next_tier() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-dept", SCHOOL, DEPT, 0, 5).await;
    supervisor(&store, "sup-school", SCHOOL, OTHER_DEPT, 0, 5).await;
    store.fail_next_in(Operation::Query, Collection::Supervisors).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found.supervisor_id(), "sup-school");
    assert_eq!(found.tier(), Some(Tier::School));
}

#[tokio::test]
async fn every_tier_failing_yields_unassigned() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-dept", SCHOOL, DEPT, 0, 5).await;
    store.fail_always(Operation::Query).await;

    let found = engine(store).find_assignment(SCHOOL, DEPT).await;

    assert_eq!(found, Assignment::Unassigned);
}

#[tokio::test]
async fn search_writes_nothing() {
    let store = MemoryStore::new();
    supervisor(&store, "sup-a", SCHOOL, DEPT, 2, 5).await;
    let engine = engine(store);

    engine.find_assignment(SCHOOL, DEPT).await;

    assert_eq!(common::load(engine.store(), "sup-a").await, 2);
}
