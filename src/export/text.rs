use crate::analysis::{AnalysisResult, TaskTable};

/// Plain-text share format: one block per assignee, tasks as bullets.
pub fn share_text(table: &TaskTable) -> String {
    table
        .rows
        .iter()
        .map(|row| {
            let tasks = row
                .tasks
                .iter()
                .map(|task| {
                    format!(
                        "- {task} (Priority: {}, Deadline: {})",
                        row.priority, row.deadline
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}:\n{tasks}", row.assignee)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Human-readable report of a whole analysis, used by the `text` output format.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Analysis: {}\n", result.id));
    out.push_str(&format!("Created at: {}\n\n", result.created_at));

    out.push_str("SUMMARY\n");
    out.push_str(&result.summary);
    out.push_str("\n\nKEY DECISIONS\n");
    for decision in &result.key_decisions {
        out.push_str(&format!("- {decision}\n"));
    }

    out.push_str("\nACTION ITEMS\n");
    out.push_str(&format!(
        "{:<24} {:<8} {:<16} {}\n",
        "ASSIGNEE", "PRIORITY", "DUE", "TASK"
    ));
    for item in &result.action_items {
        out.push_str(&format!(
            "{:<24} {:<8} {:<16} {}\n",
            item.assignee,
            item.priority,
            item.due_date.as_deref().unwrap_or("-"),
            item.task
        ));
    }

    let metadata = &result.task_table.metadata;
    out.push_str(&format!(
        "\nTASKS BY ASSIGNEE ({} total, {} with deadlines, {} high priority)\n",
        metadata.total_tasks, metadata.tasks_with_deadlines, metadata.high_priority_tasks
    ));
    out.push_str(&share_text(&result.task_table));
    out.push('\n');

    let entities = &result.entities;
    out.push_str("\nENTITIES\n");
    out.push_str(&format!("People: {}\n", entities.people.join(", ")));
    out.push_str(&format!("Organizations: {}\n", entities.organizations.join(", ")));
    out.push_str(&format!("Dates: {}\n", entities.dates.join(", ")));
    out.push_str(&format!("Topics: {}\n", entities.topics.join(", ")));

    out
}
