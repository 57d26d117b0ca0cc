//! Integration tests for the mocks crate
//!
//! Tests the mock implementations and utilities to ensure they work correctly
//! and provide the expected testing capabilities.

use mocks::*;
use proptest::prelude::*;
use std::sync::Arc;
use task_core::{TaskError, TaskRepository, TaskStatus};

#[tokio::test]
async fn test_mock_repository_passes_contract() {
    let repo = MockTaskRepository::new();
    test_repository_contract(&repo).await;
}

#[tokio::test]
async fn test_contract_through_arc() {
    let repo = Arc::new(MockTaskRepository::new());
    test_repository_contract(&repo).await;
}

#[tokio::test]
async fn test_mock_repository_basic_operations() {
    let repo = MockTaskRepository::new();

    let new_task = create_new_task();
    let task = repo.create(new_task.clone()).await.unwrap();

    assert_eq!(task.id, 1);
    assert_task_matches_new(&task, &new_task);
    repo.assert_called("create");

    let retrieved = repo.get_by_id(task.id).await.unwrap().unwrap();
    assert_task_equals(&retrieved, &task);
    repo.assert_called("get_by_id");
    repo.assert_not_called("delete");
}

#[tokio::test]
async fn test_mock_repository_error_injection() {
    let repo = MockTaskRepository::new();

    repo.inject_error(TaskError::Connection("test error".to_string()));

    let result = repo.get_by_id(1).await;
    assert!(matches!(result.unwrap_err(), TaskError::Connection(_)));

    // Clear error and try again
    repo.inject_error(TaskError::Database("unused".to_string()));
    repo.clear_error();
    let result = repo.get_by_id(1).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_buy_milk_scenario() {
    let repo = MockTaskRepository::new();

    let created = repo
        .create(
            NewTaskBuilder::new()
                .with_title("Buy milk")
                .with_description("2%")
                .with_status(TaskStatus::Pending)
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(created.title, "Buy milk");

    let rejected = repo
        .update(
            created.id,
            UpdateTaskBuilder::from_task(&created).with_title("").build(),
        )
        .await;
    assert_validation_error(rejected);

    repo.delete(created.id).await.unwrap();
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    assert_not_found(repo.delete(created.id).await);
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let repo = Arc::new(MockTaskRepository::new());

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.create(NewTaskBuilder::new().with_title(format!("Task {i}")).build())
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);

    let listed = repo.list().await.unwrap();
    assert_eq!(listed.len(), 20);
    assert_newest_first(&listed);
}

#[tokio::test]
async fn test_unusual_titles_round_trip() {
    let repo = MockTaskRepository::new();
    for title in unusual_valid_titles() {
        let created = repo.create(create_new_task_titled(&title)).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, title);
    }
}

#[tokio::test]
async fn test_seeded_tasks_keep_timestamps_until_updated() {
    let created_at = chrono::Utc::now() - chrono::Duration::days(2);
    let edited_at = created_at + chrono::Duration::hours(5);
    let edited = TaskBuilder::new()
        .with_id(100_000)
        .with_created_at(created_at)
        .with_updated_at(edited_at)
        .build();
    let random = generate_random_task();

    let repo = MockTaskRepository::with_tasks(vec![edited.clone(), random.clone()]);
    assert_eq!(repo.len(), 2);

    let fetched = repo.get_by_id(edited.id).await.unwrap().unwrap();
    assert_task_equals(&fetched, &edited);
    assert_eq!(fetched.updated_at, edited_at);

    let update = create_update_task();
    let updated = repo.update(edited.id, update.clone()).await.unwrap();
    assert_task_matches_update(&updated, &update);
    assert_eq!(updated.created_at, created_at);
    assert!(updated.updated_at > edited_at);

    let update = generate_update();
    let updated = repo.update(random.id, update.clone()).await.unwrap();
    assert_task_matches_update(&updated, &update);
    assert!(updated.updated_at >= random.updated_at);

    // New ids continue after the largest seeded one
    let created = repo.create(create_new_task()).await.unwrap();
    assert_eq!(created.id, 100_001);
}

proptest! {
    #[test]
    fn created_tasks_read_back_identically(new_task in new_task_strategy()) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let repo = MockTaskRepository::new();
            let created = repo.create(new_task.clone()).await.unwrap();
            let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
            assert_task_matches_new(&fetched, &new_task);
        });
    }

    #[test]
    fn updates_replace_every_field(update in update_task_strategy()) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let repo = MockTaskRepository::new();
            let created = repo.create(create_new_task()).await.unwrap();
            let updated = repo.update(created.id, update.clone()).await.unwrap();
            assert_task_matches_update(&updated, &update);
            assert_eq!(updated.created_at, created.created_at);
            assert!(updated.updated_at > created.updated_at);
        });
    }
}
