use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::analysis::model::{
    ActionItem, Priority, TaskTable, TaskTableMetadata, TaskTableRow, NOT_SPECIFIED,
};
use crate::analysis::participants::ParticipantMap;

/// Case-insensitive ordering with an exact comparison as tie-break, so the
/// result is total and stable across runs.
pub fn locale_cmp(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Groups action items per assignee.
///
/// The deadline is the smallest due date by plain string comparison, not by
/// calendar date: `"Friday"` sorts before `"Monday"` and `"10 January"`
/// before `"2 January"`.
pub fn build_task_table(
    items: &[ActionItem],
    participants: &ParticipantMap,
    assigned_on: NaiveDate,
) -> TaskTable {
    let mut sorted: Vec<&ActionItem> = items.iter().collect();
    sorted.sort_by(|left, right| locale_cmp(&left.assignee, &right.assignee));

    let mut groups: Vec<(&str, Vec<&ActionItem>)> = Vec::new();
    for item in sorted {
        match groups
            .iter_mut()
            .find(|(assignee, _)| *assignee == item.assignee)
        {
            Some((_, members)) => members.push(item),
            None => groups.push((item.assignee.as_str(), vec![item])),
        }
    }

    let assigned_date = assigned_on.format("%Y-%m-%d").to_string();
    let rows = groups
        .into_iter()
        .map(|(assignee, members)| TaskTableRow {
            assignee: participants
                .full_name_for(assignee)
                .unwrap_or(assignee)
                .to_owned(),
            tasks: members.iter().map(|item| item.task.clone()).collect(),
            assigned_date: assigned_date.clone(),
            deadline: earliest_deadline(&members).unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
            priority: highest_priority(&members),
        })
        .collect();

    TaskTable {
        rows,
        metadata: TaskTableMetadata {
            total_tasks: items.len(),
            tasks_with_deadlines: items.iter().filter(|item| item.has_due_date()).count(),
            high_priority_tasks: items
                .iter()
                .filter(|item| item.priority == Priority::High)
                .count(),
        },
    }
}

fn earliest_deadline(items: &[&ActionItem]) -> Option<String> {
    items
        .iter()
        .filter_map(|item| item.due_date.as_deref())
        .filter(|due| !due.trim().is_empty())
        .min()
        .map(str::to_owned)
}

fn highest_priority(items: &[&ActionItem]) -> Priority {
    items
        .iter()
        .map(|item| item.priority)
        .max_by_key(|priority| priority.severity())
        .unwrap_or_default()
}
