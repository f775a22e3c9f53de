mod common;

#[cfg(test)]
mod tests {
    use super::common::{task, MockTaskService};
    use tasklion::libs::error::{Operation, TaskError};
    use tasklion::libs::store::{IntentPhase, Outcome, TaskStore};
    use tasklion::libs::task::{NewTask, Priority, TaskPatch};
    use tasklion::libs::view_state::{NotificationLevel, Theme, ViewAction, ViewState};

    fn store_with(tasks: Vec<tasklion::libs::task::Task>) -> TaskStore<MockTaskService> {
        TaskStore::new(MockTaskService::with_tasks(tasks))
    }

    #[tokio::test]
    async fn test_refresh_loads_collection() {
        let store = store_with(vec![task(1, "Write docs"), task(2, "Review PR")]);
        assert!(store.tasks().is_empty());

        assert_eq!(store.refresh().await, Outcome::Synced);

        let titles: Vec<_> = store.tasks().into_iter().map(|task| task.title).collect();
        assert_eq!(titles, vec!["Write docs", "Review PR"]);
        assert!(!store.loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_create_adds_exactly_one_task() {
        let store = store_with(vec![task(1, "Existing")]);
        store.refresh().await;

        let deadline = tasklion::libs::task::timestamp::parse("2024-06-01T12:00:00Z");
        let new_task = NewTask::new("Plan sprint")
            .with_description("Pick the stories")
            .with_priority(Priority::High)
            .with_deadline(deadline);

        assert_eq!(store.create(new_task).await, Outcome::Synced);

        let tasks = store.tasks();
        assert_eq!(tasks.len(), 2);
        let created = tasks.iter().find(|task| task.title == "Plan sprint").unwrap();
        assert_eq!(created.description, "Pick the stories");
        assert_eq!(created.priority, Priority::High);
        assert_eq!(created.deadline, deadline);
        assert!(!created.completed);
        assert!(created.importance_score.is_none());
    }

    #[tokio::test]
    async fn test_every_mutation_is_followed_by_list() {
        let store = store_with(vec![task(1, "A")]);

        store.create(NewTask::new("B")).await;
        store.update(1, TaskPatch::completed(true)).await;
        store.delete(1).await;
        store.optimize().await;

        assert_eq!(
            store.service().calls(),
            vec![
                Operation::Create,
                Operation::List,
                Operation::Update,
                Operation::List,
                Operation::Delete,
                Operation::List,
                Operation::Optimize,
                Operation::List,
            ]
        );
    }

    #[tokio::test]
    async fn test_toggle_completed_changes_only_that_flag() {
        let mut other = task(2, "Other");
        other.priority = Priority::Low;
        let store = store_with(vec![task(1, "Target"), other]);
        store.refresh().await;
        let before = store.tasks();

        assert_eq!(store.toggle_completed(1).await, Outcome::Synced);

        let after = store.tasks();
        assert!(after[0].completed);
        let mut expected = before[0].clone();
        expected.completed = true;
        assert_eq!(after[0], expected);
        assert_eq!(after[1], before[1]);

        store.toggle_completed(1).await;
        assert!(!store.task(1).unwrap().completed);
    }

    #[tokio::test]
    async fn test_toggle_completed_of_unknown_task() {
        let store = store_with(vec![task(1, "A")]);
        store.refresh().await;

        let outcome = store.toggle_completed(99).await;

        assert_eq!(outcome, Outcome::Failed(TaskError::NotFound { id: 99 }));
        assert_eq!(store.service().calls(), vec![Operation::List]);
    }

    #[tokio::test]
    async fn test_toggle_completed_without_snapshot_reports_fetch_failure() {
        let store = store_with(vec![task(1, "A")]);
        store.service().fail_next(Operation::List);

        let outcome = store.toggle_completed(1).await;

        assert!(matches!(outcome, Outcome::Failed(TaskError::FetchFailed { .. })));
        assert!(!store.synced());
        assert_eq!(store.service().calls(), vec![Operation::List]);

        assert_eq!(store.toggle_completed(1).await, Outcome::Synced);
        assert!(store.synced());
        assert!(store.task(1).unwrap().completed);
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_id() {
        let store = store_with(vec![task(1, "A"), task(2, "B"), task(3, "C")]);
        store.refresh().await;

        assert_eq!(store.delete(2).await, Outcome::Synced);

        let ids: Vec<_> = store.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let store = store_with(vec![task(1, "A")]);
        store.refresh().await;
        let before = store.tasks();

        let outcome = store.delete(42).await;

        assert_eq!(outcome, Outcome::Failed(TaskError::NotFound { id: 42 }));
        assert_eq!(store.tasks(), before);
        assert_eq!(store.error(), Some(TaskError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_snapshot() {
        let store = store_with(vec![task(1, "A")]);
        store.refresh().await;
        let before = serde_json::to_string(&store.tasks()).unwrap();

        for operation in [Operation::Create, Operation::Update, Operation::Delete, Operation::Optimize] {
            store.service().fail_next(operation);
        }

        let outcomes = vec![
            store.create(NewTask::new("B")).await,
            store.update(1, TaskPatch::completed(true)).await,
            store.delete(1).await,
            store.optimize().await,
        ];

        let errors: Vec<_> = outcomes.iter().map(|outcome| outcome.error().and_then(TaskError::operation)).collect();
        assert_eq!(
            errors,
            vec![
                Some(Operation::Create),
                Some(Operation::Update),
                Some(Operation::Delete),
                Some(Operation::Optimize)
            ]
        );
        assert!(matches!(outcomes[1], Outcome::Failed(TaskError::UpdateFailed { .. })));
        assert_eq!(serde_json::to_string(&store.tasks()).unwrap(), before);
        assert!(matches!(store.error(), Some(TaskError::OptimizeFailed { .. })));
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_failure_sets_error_notification() {
        let store = store_with(Vec::new());
        store.service().fail_next(Operation::Create);

        store.create(NewTask::new("A")).await;

        let notification = store.view().notification.unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert!(notification.message.starts_with("Failed to create task"));
    }

    #[tokio::test]
    async fn test_next_intent_clears_error() {
        let store = store_with(vec![task(1, "A")]);
        store.service().fail_next(Operation::Delete);
        store.delete(1).await;
        assert!(store.error().is_some());

        assert_eq!(store.refresh().await, Outcome::Synced);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_refetch_is_not_reported_as_failed_mutation() {
        let store = store_with(Vec::new());
        store.service().fail_next(Operation::List);

        let outcome = store.create(NewTask::new("Saved anyway")).await;

        match outcome {
            Outcome::Failed(TaskError::RefetchFailed { operation, .. }) => assert_eq!(operation, Operation::Create),
            other => panic!("unexpected outcome: {:?}", other),
        }
        // The server has it, the local snapshot does not yet.
        assert_eq!(store.service().server_tasks().len(), 1);
        assert!(store.tasks().is_empty());

        store.refresh().await;
        assert_eq!(store.tasks().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_task_never_reaches_service() {
        let store = store_with(Vec::new());

        let outcome = store.create(NewTask::new("   ")).await;

        assert!(matches!(outcome, Outcome::Failed(TaskError::InvalidTask(_))));
        assert!(store.service().calls().is_empty());

        let outcome = store.update(1, TaskPatch::default()).await;
        assert!(matches!(outcome, Outcome::Failed(TaskError::InvalidTask(_))));
        assert!(store.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_optimize_scores_all_or_nothing() {
        let mut done = task(3, "Done already");
        done.completed = true;
        let store = store_with(vec![task(1, "A"), task(2, "B"), done]);

        assert_eq!(store.optimize().await, Outcome::Synced);

        let tasks = store.tasks();
        assert_eq!(tasks.len(), 3);
        for task in &tasks {
            assert!(task.analysis_consistent());
            let fields = [
                task.importance_score.is_some(),
                task.importance_explanation.is_some(),
                task.insights.is_some(),
            ];
            assert!(fields.iter().all(|f| *f) || fields.iter().all(|f| !*f), "task {} is half scored", task.id);
        }
        assert_eq!(tasks.iter().filter(|task| task.is_analyzed()).count(), 2);
    }

    #[tokio::test]
    async fn test_orphan_scoring_fields_are_dropped() {
        let mut broken = task(1, "A");
        broken.importance_explanation = Some("left over".to_string());
        broken.insights = Some(vec!["stale".to_string()]);
        let store = store_with(vec![broken]);

        store.refresh().await;

        let task = store.task(1).unwrap();
        assert!(task.importance_explanation.is_none());
        assert!(task.insights.is_none());
    }

    #[tokio::test]
    async fn test_create_then_delete_end_to_end() {
        let store = store_with(Vec::new());
        store.refresh().await;
        assert!(store.tasks().is_empty());

        store.create(NewTask::new("A").with_priority(Priority::High)).await;

        let tasks = store.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "A");
        assert_eq!(tasks[0].priority, Priority::High);
        assert!(!tasks[0].completed);
        assert!(tasks[0].importance_score.is_none());

        store.delete(tasks[0].id).await;
        assert!(store.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_stale_list_response_is_discarded() {
        let store = store_with(vec![task(1, "Old")]);
        let release = store.service().gate_next_list();

        let (slow, fast) = tokio::join!(store.refresh(), async {
            store.service().edit_server(|tasks| tasks.push(task(2, "New")));
            let outcome = store.refresh().await;
            let _ = release.send(());
            outcome
        });

        assert_eq!(fast, Outcome::Synced);
        assert_eq!(slow, Outcome::Superseded);
        assert_eq!(store.tasks().len(), 2);
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_concurrent_deletes_converge() {
        let store = store_with(vec![task(1, "A"), task(2, "B"), task(3, "C")]);
        store.refresh().await;

        let (first, second) = tokio::join!(store.delete(1), store.delete(2));

        assert!(first.is_ok());
        assert!(second.is_ok());
        let ids: Vec<_> = store.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[tokio::test]
    async fn test_pending_intent_phases() {
        let store = store_with(vec![task(1, "A")]);
        let release = store.service().gate_next_list();

        let (outcome, seen) = tokio::join!(store.delete(1), async {
            tokio::task::yield_now().await;
            let seen = store.pending_intents();
            let loading = store.loading();
            let _ = release.send(());
            (seen, loading)
        });

        assert_eq!(outcome, Outcome::Synced);
        let (pending, loading) = seen;
        assert!(loading);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].operation, Operation::Delete);
        assert_eq!(pending[0].phase, IntentPhase::Refetching);
        assert!(store.pending_intents().is_empty());
    }

    #[tokio::test]
    async fn test_success_notification_and_snapshot() {
        let store = TaskStore::with_view(MockTaskService::new(), ViewState::with_theme(Theme::Dark));

        store.create(NewTask::new("A")).await;
        store.dispatch(ViewAction::OpenDrawer);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.tasks.len(), 1);
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.view.theme, Theme::Dark);
        assert!(snapshot.view.drawer_open);
        let notification = snapshot.view.notification.unwrap();
        assert_eq!(notification.level, NotificationLevel::Success);
        assert_eq!(notification.message, "Task created successfully");

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["view"]["theme"], "dark");
        assert_eq!(json["tasks"][0]["priority"], "medium");
    }
}
