#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::sync::Arc;
    use test_context::{test_context, AsyncTestContext};
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::time::{sleep, Duration};
    use tomatobox::db::store::Store;
    use tomatobox::libs::error::{StateError, ValidationError};
    use tomatobox::libs::ledger::SessionLedger;
    use tomatobox::libs::notify::{Notifier, Silent, SoundPlayer};
    use tomatobox::libs::session::{SessionMode, WorkSession};
    use tomatobox::libs::timer::{Completion, TimerDurations, TimerState};
    use tomatobox::libs::timer_service::{TimerEvent, TimerService};

    #[derive(Default)]
    struct RecordingNotifier {
        modes: Mutex<Vec<SessionMode>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify_completion(&self, mode: SessionMode) {
            self.modes.lock().push(mode);
        }
    }

    struct FailingSound;

    impl SoundPlayer for FailingSound {
        fn play_completion_sound(&self) -> anyhow::Result<()> {
            anyhow::bail!("no audio device")
        }
    }

    struct TimerTestContext {
        store: Store,
        notifier: Arc<RecordingNotifier>,
        service: TimerService,
    }

    impl AsyncTestContext for TimerTestContext {
        async fn setup() -> Self {
            let store = Store::open_in_memory().unwrap();
            let notifier = Arc::new(RecordingNotifier::default());
            let service = TimerService::new(
                TimerDurations::default(),
                SessionLedger::new(store.clone()),
                notifier.clone(),
                Arc::new(Silent),
            );
            TimerTestContext { store, notifier, service }
        }
    }

    /// Drains events until the ledger write is reported.
    async fn run_until_recorded(events: &mut UnboundedReceiver<TimerEvent>) -> (Vec<u64>, Vec<Completion>, WorkSession) {
        let mut ticks = Vec::new();
        let mut completions = Vec::new();
        loop {
            match events.recv().await.expect("service dropped") {
                TimerEvent::Tick { ticks: n, .. } => ticks.push(n),
                TimerEvent::Completed(c) => completions.push(c),
                TimerEvent::SessionRecorded(session) => return (ticks, completions, session),
                TimerEvent::RecordFailed(e) => panic!("record failed: {}", e),
                _ => {}
            }
        }
    }

    async fn wait_for_tick(events: &mut UnboundedReceiver<TimerEvent>, target: u64) {
        loop {
            if let Some(TimerEvent::Tick { ticks, .. }) = events.recv().await {
                if ticks == target {
                    return;
                }
            }
        }
    }

    #[test_context(TimerTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_one_minute_work_session_is_recorded(ctx: &mut TimerTestContext) {
        let mut events = ctx.service.subscribe();
        ctx.service.start(SessionMode::Work, 1, Some(3)).unwrap();

        let (ticks, completions, session) = run_until_recorded(&mut events).await;

        assert_eq!(ticks, (1..=60).collect::<Vec<u64>>());
        assert_eq!(
            completions,
            vec![Completion {
                mode: SessionMode::Work,
                duration_minutes: 1
            }]
        );
        assert_eq!(session.duration, 1);
        assert_eq!(session.task_id, Some(3));
        assert!(!session.is_break_session);

        assert_eq!(ctx.service.snapshot().state, TimerState::Completed { mode: SessionMode::Work });
        assert_eq!(*ctx.notifier.modes.lock(), vec![SessionMode::Work]);
        assert_eq!(SessionLedger::new(ctx.store.clone()).completed_today().await.unwrap(), 1);
    }

    #[test_context(TimerTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_break_is_recorded_as_break(ctx: &mut TimerTestContext) {
        let mut events = ctx.service.subscribe();
        ctx.service.start(SessionMode::Break, 1, None).unwrap();

        let (_, _, session) = run_until_recorded(&mut events).await;

        assert!(session.is_break_session);
        assert_eq!(SessionLedger::new(ctx.store.clone()).completed_today().await.unwrap(), 0);
        assert_eq!(*ctx.notifier.modes.lock(), vec![SessionMode::Break]);
    }

    #[test_context(TimerTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_remaining(ctx: &mut TimerTestContext) {
        let mut events = ctx.service.subscribe();
        ctx.service.start(SessionMode::Work, 1, None).unwrap();
        wait_for_tick(&mut events, 10).await;

        ctx.service.pause().unwrap();
        assert_eq!(
            ctx.service.snapshot().state,
            TimerState::Idle {
                remaining: 50,
                mode: SessionMode::Work
            }
        );

        sleep(Duration::from_secs(120)).await;
        assert_eq!(ctx.service.snapshot().state.remaining(), 50);
        assert_eq!(ctx.service.snapshot().ticks, 10);

        ctx.service.resume().unwrap();
        let (ticks, completions, session) = run_until_recorded(&mut events).await;
        assert_eq!(ticks, (11..=60).collect::<Vec<u64>>());
        assert_eq!(completions.len(), 1);
        assert_eq!(session.duration, 1);
    }

    #[test_context(TimerTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_toggle_pause_alternates(ctx: &mut TimerTestContext) {
        let mut events = ctx.service.subscribe();
        ctx.service.start(SessionMode::Work, 1, None).unwrap();
        wait_for_tick(&mut events, 20).await;

        assert_eq!(ctx.service.toggle_pause(), Ok(true));
        sleep(Duration::from_secs(90)).await;
        assert_eq!(ctx.service.snapshot().state.remaining(), 40);

        assert_eq!(ctx.service.toggle_pause(), Ok(false));
        assert!(ctx.service.snapshot().state.is_running());

        let (ticks, completions, _) = run_until_recorded(&mut events).await;
        assert_eq!(ticks, (21..=60).collect::<Vec<u64>>());
        assert_eq!(completions.len(), 1);

        assert!(matches!(
            ctx.service.toggle_pause(),
            Err(StateError::InvalidTransition { action: "resume", .. })
        ));
    }

    #[test_context(TimerTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_invalid_transitions_are_errors(ctx: &mut TimerTestContext) {
        assert!(matches!(ctx.service.pause(), Err(StateError::InvalidTransition { action: "pause", .. })));

        ctx.service.start(SessionMode::Work, 1, None).unwrap();
        assert!(matches!(ctx.service.resume(), Err(StateError::InvalidTransition { action: "resume", .. })));
        assert_eq!(ctx.service.start(SessionMode::Work, 0, None), Err(ValidationError::NonPositiveDuration));
    }

    #[test_context(TimerTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_switch_mode_loads_canonical_break(ctx: &mut TimerTestContext) {
        ctx.service.start(SessionMode::Work, 25, None).unwrap();
        sleep(Duration::from_millis(3500)).await;

        assert_eq!(ctx.service.switch_mode(), SessionMode::Break);
        assert_eq!(
            ctx.service.snapshot().state,
            TimerState::Idle {
                remaining: 300,
                mode: SessionMode::Break
            }
        );

        let ticks = ctx.service.snapshot().ticks;
        sleep(Duration::from_secs(10)).await;
        assert_eq!(ctx.service.snapshot().ticks, ticks);
    }

    #[test_context(TimerTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_cancel_does_not_record(ctx: &mut TimerTestContext) {
        let mut events = ctx.service.subscribe();
        ctx.service.start(SessionMode::Work, 1, None).unwrap();
        wait_for_tick(&mut events, 5).await;

        ctx.service.cancel();
        sleep(Duration::from_secs(120)).await;

        assert!(!ctx.service.snapshot().state.is_running());
        assert_eq!(ctx.service.snapshot().state.remaining(), 55);
        assert!(ctx.store.get_all_sessions().await.unwrap().is_empty());
        assert!(ctx.notifier.modes.lock().is_empty());
    }

    #[test_context(TimerTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_running_countdown(ctx: &mut TimerTestContext) {
        let mut events = ctx.service.subscribe();
        ctx.service.start(SessionMode::Work, 1, None).unwrap();
        wait_for_tick(&mut events, 30).await;
        ctx.service.start(SessionMode::Work, 2, None).unwrap();

        let (ticks, completions, session) = run_until_recorded(&mut events).await;

        assert_eq!(ticks.len(), 120);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(completions.len(), 1);
        assert_eq!(session.duration, 2);
        assert_eq!(ctx.store.get_all_sessions().await.unwrap().len(), 1);
    }

    #[test_context(TimerTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_watch_sees_latest_state(ctx: &mut TimerTestContext) {
        let mut watch = ctx.service.watch();
        ctx.service.start(SessionMode::Work, 1, None).unwrap();

        watch.changed().await.unwrap();
        assert!(watch.borrow_and_update().state.is_running());

        sleep(Duration::from_secs(61)).await;
        assert_eq!(watch.borrow().state, TimerState::Completed { mode: SessionMode::Work });
    }

    #[tokio::test(start_paused = true)]
    async fn test_sound_failure_does_not_block_recording() {
        let store = Store::open_in_memory().unwrap();
        let service = TimerService::new(
            TimerDurations::default(),
            SessionLedger::new(store.clone()),
            Arc::new(Silent),
            Arc::new(FailingSound),
        );
        let mut events = service.subscribe();
        service.start(SessionMode::Work, 1, None).unwrap();

        let (_, completions, _) = run_until_recorded(&mut events).await;
        assert_eq!(completions.len(), 1);
        assert_eq!(store.get_all_sessions().await.unwrap().len(), 1);
    }
}
