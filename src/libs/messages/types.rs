//! Every user-facing text of the application as one enum.
//!
//! Variants are grouped by area; their wording lives in `display.rs`.

#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    TasksLoaded,
    TasksOptimized,
    TasksHeader,
    NoTasks,
    TaskDetailsHeader(i64),
    TaskNotInList(i64),
    TaskCompletedState { title: String, completed: bool },
    ConfirmDeleteTasks(usize),
    DeleteCancelled,
    NothingToUpdate,
    ImportanceScore(u8),
    ImportanceNotAnalyzed,
    AnalyzedAt(String),
    InsightsHeader,

    // === SUMMARY MESSAGES ===
    SummaryHeader,
    SummaryCounts { total: usize, completed: usize, analyzed: usize },

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleServer,
    ConfigModuleUi,
    ApiUrlOverridden(String),

    // === PROMPTS ===
    PromptSelectModules,
    PromptServerApiUrl,
    PromptTheme,

    // === ERRORS ===
    InvalidPriority(String),
    InvalidTheme(String),
    InvalidDeadline(String),
    CommandFailed(String),
}
