#[cfg(test)]
mod tests {
    use tomatobox::db::store::Store;
    use tomatobox::libs::category::{flatten_tree, CategoryTree, DEFAULT_CATEGORY_ID};
    use tomatobox::libs::error::{AppError, StorageError, ValidationError};
    use tomatobox::libs::registry::TaskRegistry;
    use tomatobox::libs::task::Task;
    use test_context::{test_context, AsyncTestContext};

    struct CategoryTestContext {
        store: Store,
        tree: CategoryTree,
    }

    impl AsyncTestContext for CategoryTestContext {
        async fn setup() -> Self {
            let store = Store::open_in_memory().unwrap();
            let tree = CategoryTree::new(store.clone());
            CategoryTestContext { store, tree }
        }
    }

    #[test_context(CategoryTestContext)]
    #[tokio::test]
    async fn test_roots_and_children(ctx: &mut CategoryTestContext) {
        let work = ctx.tree.add("Work", None).await.unwrap();
        let work_id = work.id.unwrap();
        ctx.tree.add("Meetings", Some(work_id)).await.unwrap();
        ctx.tree.add("Code review", Some(work_id)).await.unwrap();
        ctx.tree.add("Home", None).await.unwrap();

        let roots: Vec<String> = ctx.tree.roots().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(roots.len(), 2);
        assert!(roots.contains(&"Work".to_string()));

        let children = ctx.tree.children(work_id).await.unwrap();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.parent_id == Some(work_id)));

        let names: Vec<(usize, String)> = flatten_tree(&ctx.tree.all().await.unwrap())
            .into_iter()
            .map(|n| (n.depth, n.category.name))
            .collect();
        assert_eq!(
            names,
            vec![
                (0, "Home".to_string()),
                (0, "Work".to_string()),
                (1, "Code review".to_string()),
                (1, "Meetings".to_string()),
            ]
        );
    }

    #[test_context(CategoryTestContext)]
    #[tokio::test]
    async fn test_add_validates_name_and_parent(ctx: &mut CategoryTestContext) {
        let err = ctx.tree.add("  ", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::EmptyCategoryName)));

        let err = ctx.tree.add("Lost", Some(42)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::UnknownCategory(42))));
    }

    #[test_context(CategoryTestContext)]
    #[tokio::test]
    async fn test_reparent_rejects_cycles(ctx: &mut CategoryTestContext) {
        let a = ctx.tree.add("A", None).await.unwrap().id.unwrap();
        let b = ctx.tree.add("B", Some(a)).await.unwrap().id.unwrap();
        let c = ctx.tree.add("C", Some(b)).await.unwrap().id.unwrap();

        let err = ctx.tree.reparent(a, Some(c)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::CategoryCycle { .. })));
        let err = ctx.tree.reparent(a, Some(a)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::CategoryCycle { .. })));

        let moved = ctx.tree.reparent(c, None).await.unwrap();
        assert_eq!(moved.parent_id, None);
        assert_eq!(ctx.tree.roots().await.unwrap().len(), 2);
    }

    #[test_context(CategoryTestContext)]
    #[tokio::test]
    async fn test_rename(ctx: &mut CategoryTestContext) {
        let id = ctx.tree.add("Wrok", None).await.unwrap().id.unwrap();
        ctx.tree.rename(id, "Work").await.unwrap();
        assert_eq!(ctx.store.get_category(id).await.unwrap().unwrap().name, "Work");

        let err = ctx.tree.rename(77, "Nope").await.unwrap_err();
        assert!(matches!(err, AppError::Storage(StorageError::NotFound { id: 77, .. })));
    }

    #[test_context(CategoryTestContext)]
    #[tokio::test]
    async fn test_delete_moves_tasks_to_default_and_lifts_children(ctx: &mut CategoryTestContext) {
        let parent = ctx.tree.add("Work", None).await.unwrap().id.unwrap();
        let middle = ctx.tree.add("Projects", Some(parent)).await.unwrap().id.unwrap();
        let leaf = ctx.tree.add("Backend", Some(middle)).await.unwrap().id.unwrap();

        let registry = TaskRegistry::new(ctx.store.clone());
        let task = registry.add(Task::new("Refactor").with_category(middle)).await.unwrap();

        ctx.tree.delete(middle).await.unwrap();

        assert!(ctx.store.get_category(middle).await.unwrap().is_none());
        let leaf = ctx.store.get_category(leaf).await.unwrap().unwrap();
        assert_eq!(leaf.parent_id, Some(parent));
        let task = registry.get(task.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(task.category_id, DEFAULT_CATEGORY_ID);

        assert!(matches!(ctx.tree.delete(middle).await, Err(StorageError::NotFound { .. })));
    }
}
