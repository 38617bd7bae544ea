#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64),
    TaskUpdated(String),
    TaskCompleted(String),
    TaskStarted(String),
    TaskReopened(String),
    TaskDeleted(i64),
    TaskNotFound(i64),
    TasksHeader,
    NoTasks,
    TaskDetailsHeader(String),
    TaskFocusedMinutes(u32, usize),
    ConfirmDeleteTask(String),
    NoChangesDetected,
    PromptTaskTitle,
    PromptTaskDescription,

    // === CATEGORY MESSAGES ===
    CategoryCreated(String, i64),
    CategoryRenamed(String),
    CategoryMoved(String),
    ConfirmDeleteCategory(i64),
    CategoryDeleted(i64),
    CategoriesHeader,
    NoCategories,

    // === TIMER MESSAGES ===
    TimerStarted { mode: String, minutes: u32 },
    TimerStartedForTask { mode: String, minutes: u32, task: String },
    TimerRemaining(String),
    TimerCancelled,
    TimerInterruptHint,
    TimerPaused(String),
    TimerResumed(String),
    WorkSessionComplete,
    BreakComplete,
    SessionRecorded(u32),
    SessionRecordFailed(String),
    NextModeHint(String),

    // === GOAL MESSAGES ===
    DailyProgress { completed: u32, goal: u32, percent: u32 },
    DailyGoalReached,
    DailyGoalSet(u32),
    SessionsHeader(i64),
    NoSessions,
    InvalidWindow(i64),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModulePomodoro,
    PromptWorkMinutes,
    PromptBreakMinutes,
    PromptDailyGoal,
    PromptSound,

    // === DATABASE MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),

    // === GENERIC ===
    OperationCancelled,
}
