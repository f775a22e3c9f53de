//! Display implementation for application messages.
//!
//! Single source of truth for user-facing wording. Messages with dynamic
//! content interpolate their parameters here, never at the call site.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated => "Task created successfully".to_string(),
            Message::TaskUpdated => "Task updated successfully".to_string(),
            Message::TaskDeleted => "Task deleted successfully".to_string(),
            Message::TasksLoaded => "Tasks loaded".to_string(),
            Message::TasksOptimized => "Tasks optimized successfully".to_string(),
            Message::TasksHeader => "Tasks".to_string(),
            Message::NoTasks => "No tasks yet. Add one with `tasklion add <title>`".to_string(),
            Message::TaskDetailsHeader(id) => format!("Task #{}", id),
            Message::TaskNotInList(id) => format!("Task #{} is not in the list", id),
            Message::TaskCompletedState { title, completed } => match completed {
                true => format!("'{}' marked as completed", title),
                false => format!("'{}' marked as not completed", title),
            },
            Message::ConfirmDeleteTasks(count) => match count {
                1 => "Delete this task?".to_string(),
                n => format!("Delete {} tasks?", n),
            },
            Message::DeleteCancelled => "Deletion cancelled".to_string(),
            Message::NothingToUpdate => "Nothing to update. Pass at least one field to change".to_string(),
            Message::ImportanceScore(percent) => format!("AI Analysis: {}% Important", percent),
            Message::ImportanceNotAnalyzed => "Not analyzed yet. Run `tasklion optimize`".to_string(),
            Message::AnalyzedAt(time) => format!("Analyzed at {}", time),
            Message::InsightsHeader => "Insights:".to_string(),

            // === SUMMARY MESSAGES ===
            Message::SummaryHeader => "Summary".to_string(),
            Message::SummaryCounts {
                total,
                completed,
                analyzed,
            } => format!("{} tasks, {} completed, {} analyzed", total, completed, analyzed),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleServer => "Task service settings".to_string(),
            Message::ConfigModuleUi => "Display settings".to_string(),
            Message::ApiUrlOverridden(url) => format!("Using task service at {} from TASKLION_API_URL", url),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptServerApiUrl => "Enter the task service API URL".to_string(),
            Message::PromptTheme => "Select a theme".to_string(),

            // === ERRORS ===
            Message::InvalidPriority(error) => format!("Invalid priority: {}", error),
            Message::InvalidTheme(error) => format!("Invalid theme: {}", error),
            Message::InvalidDeadline(error) => format!("Invalid deadline: {}", error),
            Message::CommandFailed(error) => format!("Command failed: {}", error),
        };
        write!(f, "{}", text)
    }
}
