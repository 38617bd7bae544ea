#[cfg(test)]
mod tests {
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use tempfile::TempDir;
    use tomatobox::libs::config::{Config, PomodoroConfig, CONFIG_FILE_NAME};
    use tomatobox::libs::data_storage::DataStorage;
    use tomatobox::libs::error::ValidationError;
    use test_context::{test_context, TestContext};

    /// Tests in this file share the process environment.
    static ENV_LOCK: Mutex<()> = const_mutex(());

    struct ConfigTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert!(config.pomodoro.is_none());

        let pomodoro = config.pomodoro();
        assert_eq!(pomodoro.work_minutes, 25);
        assert_eq!(pomodoro.break_minutes, 5);
        assert_eq!(pomodoro.daily_goal, 4);
        assert!(pomodoro.sound);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(_ctx: &mut ConfigTestContext) {
        let config = Config {
            pomodoro: Some(PomodoroConfig {
                work_minutes: 50,
                break_minutes: 10,
                daily_goal: 6,
                sound: false,
            }),
        };
        config.save().unwrap();

        assert_eq!(Config::read().unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_section_uses_defaults(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(path, r#"{ "pomodoro": { "work_minutes": 45 } }"#).unwrap();

        let pomodoro = Config::read().unwrap().pomodoro();
        assert_eq!(pomodoro.work_minutes, 45);
        assert_eq!(pomodoro.break_minutes, 5);
        assert_eq!(pomodoro.daily_goal, 4);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_zero_duration_is_invalid(_ctx: &mut ConfigTestContext) {
        let pomodoro = PomodoroConfig {
            break_minutes: 0,
            ..PomodoroConfig::default()
        };
        assert_eq!(pomodoro.durations(), Err(ValidationError::NonPositiveDuration));

        let durations = PomodoroConfig::default().durations().unwrap();
        assert_eq!(durations.work_minutes, 25);
    }
}
