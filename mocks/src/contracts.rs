//! Contract test helpers for validating trait implementations
//!
//! Provides standardized tests that any implementation of core traits
//! should pass, ensuring consistent behavior across different implementations.
//! The suites only compare counts relative to their own writes, so they can
//! run against a database that already holds rows.

use crate::{assert_newest_first, create_new_task, NewTaskBuilder, UpdateTaskBuilder};
use task_core::{TaskError, TaskRepository, TaskStatus};

/// Test any TaskRepository implementation with comprehensive contract tests
///
/// This function runs a suite of tests that any TaskRepository implementation
/// should pass to be considered compliant with the expected contract.
pub async fn test_repository_contract<R: TaskRepository>(repo: &R) {
    test_health_check_contract(repo).await;
    test_create_contract(repo).await;
    test_get_contract(repo).await;
    test_update_contract(repo).await;
    test_delete_contract(repo).await;
    test_list_contract(repo).await;
    test_validation_contract(repo).await;
}

/// Test task creation contract
pub async fn test_create_contract<R: TaskRepository>(repo: &R) {
    let new_task = create_new_task();
    let task = repo
        .create(new_task.clone())
        .await
        .expect("Create should succeed");

    assert!(task.id > 0, "Created task should have positive ID");
    assert_eq!(task.title, new_task.title, "Created task should preserve title");
    assert_eq!(
        task.description, new_task.description,
        "Created task should preserve description"
    );
    assert_eq!(task.status, TaskStatus::Pending, "Status should default to pending");
    assert_eq!(task.created_at, task.updated_at, "Fresh task timestamps should match");

    // Explicit status is kept
    let completed = repo
        .create(NewTaskBuilder::new().with_status(TaskStatus::Completed).build())
        .await
        .expect("Create with explicit status should succeed");
    assert_eq!(completed.status, TaskStatus::Completed);

    // Ids are unique
    assert_ne!(task.id, completed.id, "Each task should get a unique ID");
}

/// Test retrieval contract
pub async fn test_get_contract<R: TaskRepository>(repo: &R) {
    let created = repo
        .create(
            NewTaskBuilder::new()
                .with_title("Contract get")
                .with_description("fetch me")
                .with_status(TaskStatus::InProgress)
                .build(),
        )
        .await
        .expect("Create should succeed");

    let fetched = repo
        .get_by_id(created.id)
        .await
        .expect("Get should succeed")
        .expect("Created task should be found");
    assert_eq!(fetched.title, created.title);
    assert_eq!(fetched.description, created.description);
    assert_eq!(fetched.status, created.status);
    assert_eq!(fetched.created_at, created.created_at);

    // Absence is not an error
    let missing = repo
        .get_by_id(i32::MAX)
        .await
        .expect("Get of missing id should not error");
    assert!(missing.is_none(), "Missing task should be None");
}

/// Test full replacement update contract
pub async fn test_update_contract<R: TaskRepository>(repo: &R) {
    let created = repo
        .create(NewTaskBuilder::new().with_title("Before update").build())
        .await
        .expect("Create should succeed");
    let bystander = repo
        .create(NewTaskBuilder::new().with_title("Bystander").build())
        .await
        .expect("Create should succeed");

    let update = UpdateTaskBuilder::from_task(&created)
        .with_title("After update")
        .with_description("new details")
        .with_status(TaskStatus::Completed)
        .build();
    let updated = repo
        .update(created.id, update)
        .await
        .expect("Update should succeed");

    assert_eq!(updated.id, created.id, "Update must not change id");
    assert_eq!(updated.created_at, created.created_at, "Update must not change created_at");
    assert!(updated.updated_at > created.updated_at, "Update must advance updated_at");
    assert_eq!(updated.title, "After update");
    assert_eq!(updated.description, "new details");
    assert_eq!(updated.status, TaskStatus::Completed);

    // Only the target row changes
    let untouched = repo
        .get_by_id(bystander.id)
        .await
        .expect("Get should succeed")
        .expect("Bystander should exist");
    assert_eq!(untouched, bystander, "Other rows must not change");

    // Re-applying identical values still succeeds
    let same = UpdateTaskBuilder::from_task(&updated).build();
    let again = repo
        .update(created.id, same)
        .await
        .expect("No-op update should still succeed");
    assert_eq!(again.title, updated.title);

    // Missing row
    let result = repo
        .update(i32::MAX, UpdateTaskBuilder::new().build())
        .await;
    assert!(
        matches!(result, Err(TaskError::NotFound(_))),
        "Update of missing task should be NotFound, got {result:?}"
    );
}

/// Test delete contract, including idempotent not-found on repeat
pub async fn test_delete_contract<R: TaskRepository>(repo: &R) {
    let created = repo
        .create(NewTaskBuilder::new().with_title("Delete me").build())
        .await
        .expect("Create should succeed");
    let before = repo.list().await.expect("List should succeed").len();

    repo.delete(created.id).await.expect("Delete should succeed");

    let gone = repo.get_by_id(created.id).await.expect("Get should succeed");
    assert!(gone.is_none(), "Deleted task should not be found");

    for _ in 0..3 {
        let result = repo.delete(created.id).await;
        assert!(
            matches!(result, Err(TaskError::NotFound(_))),
            "Repeated delete should be NotFound, got {result:?}"
        );
    }

    let after = repo.list().await.expect("List should succeed").len();
    assert_eq!(after, before - 1, "Exactly one row should be gone");
}

/// Test listing order and cardinality
pub async fn test_list_contract<R: TaskRepository>(repo: &R) {
    let before = repo.list().await.expect("List should succeed").len();

    let mut ids = Vec::new();
    for i in 0..3 {
        let task = repo
            .create(NewTaskBuilder::new().with_title(format!("List {i}")).build())
            .await
            .expect("Create should succeed");
        ids.push(task.id);
    }
    repo.delete(ids[1]).await.expect("Delete should succeed");

    let tasks = repo.list().await.expect("List should succeed");
    assert_eq!(tasks.len(), before + 2, "List size should be creates minus deletes");
    assert_newest_first(&tasks);

    let newest = tasks.first().expect("List should not be empty");
    assert_eq!(newest.id, ids[2], "Most recent create should come first");
}

/// Test that invalid input never produces a row
pub async fn test_validation_contract<R: TaskRepository>(repo: &R) {
    let before = repo.list().await.expect("List should succeed").len();

    for title in crate::invalid_titles() {
        let result = repo.create(NewTaskBuilder::new().with_title(title.clone()).build()).await;
        assert!(
            matches!(result, Err(TaskError::Validation(_))),
            "Title {title:?} should be rejected, got {result:?}"
        );
    }

    let created = repo
        .create(create_new_task())
        .await
        .expect("Create should succeed");
    let result = repo
        .update(created.id, UpdateTaskBuilder::from_task(&created).with_title("").build())
        .await;
    assert!(matches!(result, Err(TaskError::Validation(_))));

    let unchanged = repo
        .get_by_id(created.id)
        .await
        .expect("Get should succeed")
        .expect("Task should exist");
    assert_eq!(unchanged.title, created.title, "Rejected update must not apply");

    let after = repo.list().await.expect("List should succeed").len();
    assert_eq!(after, before + 1, "Only the valid create should add a row");
}

/// Test health check contract
pub async fn test_health_check_contract<R: TaskRepository>(repo: &R) {
    repo.health_check()
        .await
        .expect("Health check should pass for healthy repository");
}
