use std::cmp::Ordering;

use serde::Serialize;

use crate::analysis::task_table::locale_cmp;
use crate::analysis::{Priority, TaskTable};

/// One task of the task table, flattened with its row's metadata.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlatTask {
    pub assignee: String,
    pub task: String,
    pub assigned_date: String,
    pub deadline: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortField {
    #[default]
    Name,
    Task,
    AssignedDate,
    Deadline,
    Priority,
}

#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub search: Option<String>,
    pub priority: Option<Priority>,
    pub sort: SortField,
    pub descending: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_tasks: usize,
    pub high_priority_tasks: usize,
    pub tasks_per_person: f64,
}

/// Flattens the table, then filters by priority and by a case-insensitive
/// search over assignee, task, assigned date and deadline, then sorts.
pub fn flatten_tasks(table: &TaskTable, query: &TaskQuery) -> Vec<FlatTask> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
        .map(str::to_lowercase);

    let mut tasks: Vec<FlatTask> = table
        .rows
        .iter()
        .flat_map(|row| {
            row.tasks.iter().map(move |task| FlatTask {
                assignee: row.assignee.clone(),
                task: task.clone(),
                assigned_date: row.assigned_date.clone(),
                deadline: row.deadline.clone(),
                priority: row.priority,
            })
        })
        .filter(|task| query.priority.is_none_or(|priority| task.priority == priority))
        .filter(|task| {
            needle.as_deref().is_none_or(|needle| {
                [&task.assignee, &task.task, &task.assigned_date, &task.deadline]
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle))
            })
        })
        .collect();

    tasks.sort_by(|left, right| {
        let ordering = compare(left, right, query.sort);
        if query.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    tasks
}

fn compare(left: &FlatTask, right: &FlatTask, field: SortField) -> Ordering {
    match field {
        SortField::Name => locale_cmp(&left.assignee, &right.assignee),
        SortField::Task => locale_cmp(&left.task, &right.task),
        SortField::AssignedDate => locale_cmp(&left.assigned_date, &right.assigned_date),
        SortField::Deadline => locale_cmp(&left.deadline, &right.deadline),
        SortField::Priority => left.priority.severity().cmp(&right.priority.severity()),
    }
}

pub fn statistics(table: &TaskTable) -> Statistics {
    let people = table.rows.len();
    let total_tasks = table.metadata.total_tasks;
    Statistics {
        total_tasks,
        high_priority_tasks: table.metadata.high_priority_tasks,
        tasks_per_person: if people == 0 {
            0.0
        } else {
            total_tasks as f64 / people as f64
        },
    }
}
