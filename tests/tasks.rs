#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tomatobox::db::store::Store;
    use tomatobox::db::tasks::TaskFilter;
    use tomatobox::libs::category::{CategoryTree, DEFAULT_CATEGORY_ID};
    use tomatobox::libs::error::{AppError, StorageError, ValidationError};
    use tomatobox::libs::registry::TaskRegistry;
    use tomatobox::libs::task::{Task, TaskPriority, TaskStatus};
    use test_context::{test_context, AsyncTestContext};

    struct RegistryTestContext {
        store: Store,
        registry: TaskRegistry,
    }

    impl AsyncTestContext for RegistryTestContext {
        async fn setup() -> Self {
            let store = Store::open_in_memory().unwrap();
            let registry = TaskRegistry::new(store.clone());
            RegistryTestContext { store, registry }
        }
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_add_assigns_id_and_defaults(ctx: &mut RegistryTestContext) {
        let task = ctx.registry.add(Task::new("Write report")).await.unwrap();

        let id = task.id.expect("id assigned on insert");
        let stored = ctx.registry.get(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Write report");
        assert_eq!(stored.category_id, DEFAULT_CATEGORY_ID);
        assert_eq!(stored.priority, TaskPriority::Medium);
        assert_eq!(stored.status, TaskStatus::NotStarted);
        assert!(stored.completed_at.is_none());
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_blank_title_is_rejected_before_storing(ctx: &mut RegistryTestContext) {
        let err = ctx.registry.add(Task::new("   ")).await.unwrap_err();

        assert!(err.is_validation());
        assert!(matches!(err, AppError::Validation(ValidationError::EmptyTitle)));
        assert!(ctx.store.get_all_tasks().await.unwrap().is_empty());
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_unknown_category_is_rejected(ctx: &mut RegistryTestContext) {
        let err = ctx.registry.add(Task::new("Orphan").with_category(99)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::UnknownCategory(99))));

        let category = CategoryTree::new(ctx.store.clone()).add("Work", None).await.unwrap();
        let task = ctx.registry.add(Task::new("Filed").with_category(category.id.unwrap())).await.unwrap();
        assert_eq!(task.category_id, category.id.unwrap());
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_projection_changes_only_on_load(ctx: &mut RegistryTestContext) {
        ctx.registry.add(Task::new("First")).await.unwrap();
        assert!(ctx.registry.tasks().is_empty());

        assert_eq!(ctx.registry.load().await.unwrap().len(), 1);

        let second = ctx.registry.add(Task::new("Second")).await.unwrap();
        assert_eq!(ctx.registry.tasks().len(), 1);
        assert!(ctx.registry.find(second.id.unwrap()).is_none());

        ctx.registry.load().await.unwrap();
        let titles: Vec<&str> = ctx.registry.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_complete_and_reopen(ctx: &mut RegistryTestContext) {
        let task = ctx.registry.add(Task::new("Ship it")).await.unwrap();

        let done = ctx.registry.complete(&task).await.unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        let stored = ctx.registry.get(task.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::Completed);
        assert!(stored.completed_at.is_some());

        let again = ctx.registry.complete(&stored).await.unwrap();
        assert!(again.completed_at >= stored.completed_at);

        let reopened = ctx.registry.reopen(&again).await.unwrap();
        assert_eq!(reopened.status, TaskStatus::NotStarted);
        let stored = ctx.registry.get(task.id.unwrap()).await.unwrap().unwrap();
        assert!(stored.completed_at.is_none());
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_start_only_moves_not_started(ctx: &mut RegistryTestContext) {
        let task = ctx.registry.add(Task::new("Focus")).await.unwrap();

        let started = ctx.registry.start(&task).await.unwrap();
        assert_eq!(started.status, TaskStatus::InProgress);

        let done = ctx.registry.complete(&started).await.unwrap();
        let unchanged = ctx.registry.start(&done).await.unwrap();
        assert_eq!(unchanged.status, TaskStatus::Completed);
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_update_requires_stored_task(ctx: &mut RegistryTestContext) {
        let err = ctx.registry.update(&Task::new("Never stored")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::MissingId { entity: "task" })));

        let mut ghost = Task::new("Ghost");
        ghost.id = Some(404);
        let err = ctx.registry.update(&ghost).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(StorageError::NotFound { id: 404, .. })));
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_add_rejects_completed_task_without_completion_time(ctx: &mut RegistryTestContext) {
        let mut task = Task::new("Claimed done");
        task.status = TaskStatus::Completed;

        let err = ctx.registry.add(task).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::InconsistentCompletion)));
        assert!(ctx.store.get_all_tasks().await.unwrap().is_empty());
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_update_rejects_completion_time_on_open_task(ctx: &mut RegistryTestContext) {
        let task = ctx.registry.add(Task::new("Still open")).await.unwrap();
        let id = task.id.unwrap();

        let mut edited = task.clone();
        edited.completed_at = Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap());
        let err = ctx.registry.update(&edited).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::InconsistentCompletion)));

        let stored = ctx.registry.get(id).await.unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::NotStarted);
        assert!(stored.completed_at.is_none());
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_update_persists_every_field(ctx: &mut RegistryTestContext) {
        let mut task = ctx.registry.add(Task::new("Draft")).await.unwrap();
        let due = NaiveDate::from_ymd_opt(2030, 1, 15).unwrap().and_hms_opt(17, 0, 0).unwrap();

        task.title = "Final".to_string();
        task.description = Some("Polish wording".to_string());
        task.priority = TaskPriority::High;
        task.estimated_minutes = Some(50);
        task.due_at = Some(due);
        ctx.registry.update(&task).await.unwrap();

        let stored = ctx.registry.get(task.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored, task);
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_remove(ctx: &mut RegistryTestContext) {
        let task = ctx.registry.add(Task::new("Temporary")).await.unwrap();
        let id = task.id.unwrap();

        ctx.registry.remove(id).await.unwrap();
        assert!(ctx.registry.get(id).await.unwrap().is_none());
        assert!(matches!(ctx.registry.remove(id).await, Err(StorageError::NotFound { .. })));
    }

    #[test_context(RegistryTestContext)]
    #[tokio::test]
    async fn test_filters(ctx: &mut RegistryTestContext) {
        let category = CategoryTree::new(ctx.store.clone()).add("Home", None).await.unwrap();
        let category_id = category.id.unwrap();

        let open = ctx.registry.add(Task::new("Open")).await.unwrap();
        let filed = ctx.registry.add(Task::new("Filed").with_category(category_id)).await.unwrap();
        ctx.registry.complete(&filed).await.unwrap();

        let open_tasks = ctx.store.get_tasks(TaskFilter::Open).await.unwrap();
        assert_eq!(open_tasks.len(), 1);
        assert_eq!(open_tasks[0].id, open.id);

        let by_category = ctx.store.get_tasks(TaskFilter::ByCategory(category_id)).await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, filed.id);

        let completed = ctx.store.get_tasks(TaskFilter::ByStatus(TaskStatus::Completed)).await.unwrap();
        assert_eq!(completed.len(), 1);
    }
}
