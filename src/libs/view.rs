//! Terminal rendering of the task collection.

use super::formatter::{
    completion_mark, format_deadline, format_importance, format_timestamp, priority_style, truncate, DESCRIPTION_WIDTH,
};
use super::list::TaskList;
use super::messages::Message;
use super::task::Task;
use super::view_state::{Theme, ViewState};
use crate::msg_print;
use prettytable::format::consts::{FORMAT_BOX_CHARS, FORMAT_DEFAULT};
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    /// Table of all tasks in collection order.
    pub fn tasks_table(tasks: &[Task], theme: Theme) -> Table {
        let mut table = Table::new();
        table.set_format(match theme {
            Theme::Light => *FORMAT_DEFAULT,
            Theme::Dark => *FORMAT_BOX_CHARS,
        });

        table.set_titles(row!["ID", "DONE", "TITLE", "DESCRIPTION", "PRIORITY", "DEADLINE", "IMPORTANCE"]);
        for task in tasks {
            table.add_row(Row::new(vec![
                Cell::new(&task.id.to_string()),
                Cell::new(completion_mark(task.completed)),
                Cell::new(&task.title),
                Cell::new(&truncate(&task.description, DESCRIPTION_WIDTH)),
                Cell::new(task.priority.as_str()).style_spec(priority_style(task.priority, theme)),
                Cell::new(&format_deadline(&task.deadline)),
                Cell::new(&format_importance(task.importance_percent())),
            ]));
        }
        table
    }

    /// Lines of the detail panel of one task.
    pub fn task_details(task: &Task) -> Vec<String> {
        let mut lines = vec![Message::TaskDetailsHeader(task.id).to_string(), task.title.clone()];
        if !task.description.is_empty() {
            lines.push(task.description.clone());
        }
        lines.push(format!("Created: {}", format_timestamp(&task.created_at)));

        match task.importance_percent() {
            Some(percent) => {
                lines.push(Message::ImportanceScore(percent).to_string());
                if let Some(category) = task.importance_category() {
                    lines.push(format!("Category: {}", category));
                }
                if let Some(explanation) = &task.importance_explanation {
                    lines.push(explanation.clone());
                }
                if let Some(insights) = task.insights.as_ref().filter(|insights| !insights.is_empty()) {
                    lines.push(Message::InsightsHeader.to_string());
                    lines.extend(insights.iter().map(|insight| format!("  • {}", insight)));
                }
                if let Some(time) = &task.analysis_time {
                    lines.push(Message::AnalyzedAt(format_timestamp(time)).to_string());
                }
            }
            None => lines.push(Message::ImportanceNotAnalyzed.to_string()),
        }
        lines
    }

    pub fn summary(tasks: &[Task]) -> Message {
        Message::SummaryCounts {
            total: tasks.len(),
            completed: tasks.iter().filter(|task| task.completed).count(),
            analyzed: tasks.iter().filter(|task| task.is_analyzed()).count(),
        }
    }

    /// Prints the list, the expanded task and, with the drawer open, the summary.
    pub fn render(tasks: &[Task], list: &TaskList, view: &ViewState) {
        if tasks.is_empty() {
            msg_print!(Message::NoTasks);
        } else {
            msg_print!(Message::TasksHeader, true);
            Self::tasks_table(tasks, view.theme).printstd();
        }

        if let Some(task) = list.expanded().and_then(|id| tasks.iter().find(|task| task.id == id)) {
            msg_print!(Self::task_details(task).join("\n"), true);
        }

        if view.drawer_open {
            msg_print!(Message::SummaryHeader, true);
            msg_print!(Self::summary(tasks));
        }
    }
}
