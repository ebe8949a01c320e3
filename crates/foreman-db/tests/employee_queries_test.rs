//! Integration tests for employee queries and project membership.

use foreman_db::models::TaskStatus;
use foreman_db::queries::employees;
use foreman_db::queries::projects::{self, NewProject};
use foreman_db::queries::tasks::{self, NewTask};
use foreman_test_utils::{create_test_db, drop_test_db};

async fn seed_project(pool: &sqlx::PgPool, name: &str) -> i64 {
    projects::insert_project(
        pool,
        &NewProject {
            name: name.to_string(),
            description: String::new(),
            lead_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn employees_with_tasks_aggregates_left_join() {
    let (pool, db_name) = create_test_db().await;

    let alice = employees::insert_employee(&pool, "Alice").await.unwrap();
    let bob = employees::insert_employee(&pool, "Bob").await.unwrap();
    let project_id = seed_project(&pool, "Apollo").await;

    for title in ["design", "review"] {
        tasks::insert_task(
            &pool,
            &NewTask {
                project_id,
                title: title.to_string(),
                description: String::new(),
                assigned_to: Some(alice.id),
            },
        )
        .await
        .unwrap();
    }

    let listed = employees::list_employees_with_tasks(&pool).await.unwrap();
    assert_eq!(listed.len(), 2);

    let alice_entry = listed.iter().find(|e| e.id == alice.id).unwrap();
    assert_eq!(alice_entry.tasks.len(), 2);
    assert!(alice_entry.tasks.iter().all(|t| t.status == TaskStatus::Pending));

    // Bob appears even with zero tasks.
    let bob_entry = listed.iter().find(|e| e.id == bob.id).unwrap();
    assert!(bob_entry.tasks.is_empty());

    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn membership_assign_is_idempotent() {
    let (pool, db_name) = create_test_db().await;

    let alice = employees::insert_employee(&pool, "Alice").await.unwrap();
    let project_id = seed_project(&pool, "Apollo").await;

    employees::assign_to_project(&pool, alice.id, project_id).await.unwrap();
    // Second assignment hits ON CONFLICT DO NOTHING.
    employees::assign_to_project(&pool, alice.id, project_id).await.unwrap();

    assert!(employees::remove_from_project(&pool, alice.id, project_id).await.unwrap());
    assert!(!employees::remove_from_project(&pool, alice.id, project_id).await.unwrap());

    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn assign_and_complete_task() {
    let (pool, db_name) = create_test_db().await;

    let alice = employees::insert_employee(&pool, "Alice").await.unwrap();
    let project_id = seed_project(&pool, "Apollo").await;
    let task = tasks::insert_task(
        &pool,
        &NewTask {
            project_id,
            title: "design".to_string(),
            description: String::new(),
            assigned_to: None,
        },
    )
    .await
    .unwrap();

    assert!(tasks::assign_task(&pool, task.id, alice.id).await.unwrap());
    assert!(tasks::complete_task(&pool, task.id).await.unwrap());

    let updated = tasks::get_task(&pool, task.id).await.unwrap().unwrap();
    assert_eq!(updated.assigned_to, Some(alice.id));
    assert_eq!(updated.status, TaskStatus::Completed);

    // Missing task ids report false rather than erroring.
    assert!(!tasks::assign_task(&pool, 999_999, alice.id).await.unwrap());
    assert!(!tasks::complete_task(&pool, 999_999).await.unwrap());

    drop_test_db(&db_name).await;
}
