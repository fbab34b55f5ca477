use chrono::{TimeZone, Utc};
use quorum::analysis::{AnalysisResult, Analyzer, AnalyzerTables, Priority, TaskStatus, Transcript};
use quorum::export::{self, SortField, TaskQuery};

const WEEKLY_SYNC: &str = "Participants: Tom Wilson (TW), Jane Smith (JS)\n\
    TW: Jane, please review the budget by next Friday. This is urgent.\n\
    JS: We agreed to keep the launch in March.";

const SAME_ASSIGNEE: &str = "Participants: Tom Wilson (TW), Jane Smith (JS)\n\
    TW: Jane, please send the vendor contract by Monday. This is urgent.\n\
    TW: Jane, please update the onboarding guide by Friday when you have time.";

const NUMBERED_PLAN: &str = "Planning call\n\
    The decisions for today are:\n\
    1. Priya will finalize the vendor list by Friday\n\
    2. Amit will draft the launch plan before next week\n\
    \n\
    Thanks everyone.";

fn analyze(content: &str) -> AnalysisResult {
    let analyzer = Analyzer::with_defaults().expect("analyzer");
    analyzer.analyze(&Transcript::from_text("meeting", content))
}

fn assert_result_invariants(result: &AnalysisResult) {
    assert!(!result.action_items.is_empty());
    assert!(!result.key_decisions.is_empty());
    assert!(!result.summary.is_empty());
    for item in &result.action_items {
        assert!(item.task.chars().count() > 10, "short task `{}`", item.task);
        assert_eq!(item.status, TaskStatus::Pending);
    }

    let metadata = &result.task_table.metadata;
    assert_eq!(metadata.total_tasks, result.action_items.len());
    assert_eq!(
        metadata.high_priority_tasks,
        result
            .action_items
            .iter()
            .filter(|item| item.priority == Priority::High)
            .count()
    );
    assert_eq!(
        metadata.tasks_with_deadlines,
        result
            .action_items
            .iter()
            .filter(|item| item.has_due_date())
            .count()
    );
    let row_tasks: usize = result.task_table.rows.iter().map(|row| row.tasks.len()).sum();
    assert_eq!(row_tasks, metadata.total_tasks);
}

#[test]
fn addressed_request_resolves_to_participant_with_deadline_and_urgency() {
    let result = analyze(WEEKLY_SYNC);
    assert_result_invariants(&result);

    assert_eq!(result.action_items.len(), 1);
    let item = &result.action_items[0];
    assert_eq!(item.assignee, "Jane Smith");
    assert_eq!(item.priority, Priority::High);
    assert!(item
        .due_date
        .as_deref()
        .is_some_and(|due| due.contains("next Friday")));

    assert_eq!(
        result.key_decisions,
        vec!["JS: We agreed to keep the launch in March."]
    );
    assert_eq!(result.entities.people, vec!["Tom Wilson", "Jane Smith"]);
}

#[test]
fn transcript_without_cues_gets_canned_items_and_decisions() {
    let result = analyze("Hello. How are you. Nice weather.");
    assert_result_invariants(&result);

    let fallbacks = AnalyzerTables::default().fallbacks;
    let tasks: Vec<&str> = result
        .action_items
        .iter()
        .map(|item| item.task.as_str())
        .collect();
    let expected: Vec<&str> = fallbacks
        .action_items
        .iter()
        .map(|item| item.task.as_str())
        .collect();
    assert_eq!(tasks.len(), 5);
    assert_eq!(tasks, expected);
    assert_eq!(result.key_decisions.len(), 4);
    assert_eq!(result.key_decisions, fallbacks.decisions);
    assert_eq!(result.task_table.rows.len(), 5);
}

#[test]
fn same_assignee_rows_keep_string_order_deadline_and_highest_priority() {
    let result = analyze(SAME_ASSIGNEE);
    assert_result_invariants(&result);

    let due: Vec<Option<&str>> = result
        .action_items
        .iter()
        .map(|item| item.due_date.as_deref())
        .collect();
    assert_eq!(due, vec![Some("Monday"), Some("Friday")]);
    let priorities: Vec<Priority> = result.action_items.iter().map(|item| item.priority).collect();
    assert_eq!(priorities, vec![Priority::High, Priority::Low]);

    assert_eq!(result.task_table.rows.len(), 1);
    let row = &result.task_table.rows[0];
    assert_eq!(row.assignee, "Jane Smith");
    assert_eq!(row.tasks.len(), 2);
    assert_eq!(row.deadline, "Friday");
    assert_eq!(row.priority, Priority::High);
}

#[test]
fn numbered_plan_lines_are_taken_whole_by_the_line_scan() {
    let result = analyze(NUMBERED_PLAN);
    assert_result_invariants(&result);

    // The `will` trigger matches first, so the decisions-block parser never
    // runs and the numbering stays in the task text.
    let tasks: Vec<&str> = result
        .action_items
        .iter()
        .map(|item| item.task.as_str())
        .collect();
    assert_eq!(
        tasks,
        vec![
            "1. Priya will finalize the vendor list by Friday",
            "2. Amit will draft the launch plan before next week",
        ]
    );

    let assignees: Vec<&str> = result
        .action_items
        .iter()
        .map(|item| item.assignee.as_str())
        .collect();
    assert_eq!(assignees, vec!["Priya", "Amit"]);
    assert_eq!(result.action_items[0].due_date.as_deref(), Some("Friday"));
    assert_eq!(result.action_items[1].due_date.as_deref(), Some("next week"));
    assert_eq!(
        result.key_decisions,
        vec![
            "1. Priya will finalize the vendor list by Friday",
            "2. Amit will draft the launch plan before next week",
        ]
    );
}

#[test]
fn negated_urgency_still_ranks_high() {
    let result = analyze("Raj will update the wiki, this is not urgent.");
    assert_result_invariants(&result);

    assert_eq!(result.action_items.len(), 1);
    assert_eq!(result.action_items[0].assignee, "Raj");
    assert_eq!(result.action_items[0].priority, Priority::High);
    assert_eq!(result.task_table.metadata.high_priority_tasks, 1);
}

#[test]
fn fixed_clock_makes_analysis_repeatable() {
    let analyzer = Analyzer::with_defaults().expect("analyzer");
    let transcript = Transcript::from_text("weekly sync", WEEKLY_SYNC);
    let now = Utc
        .with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
        .single()
        .expect("time");

    let first = analyzer.analyze_at(&transcript, now);
    let second = analyzer.analyze_at(&transcript, now);
    assert_eq!(first, second);
    assert_eq!(first.transcript_id, transcript.id);
    assert_eq!(first.task_table.rows[0].assigned_date, "2026-10-19");
}

#[test]
fn analyzer_is_shareable_across_threads() {
    let analyzer = std::sync::Arc::new(Analyzer::with_defaults().expect("analyzer"));
    let handles: Vec<_> = [WEEKLY_SYNC, SAME_ASSIGNEE, NUMBERED_PLAN]
        .into_iter()
        .map(|content| {
            let analyzer = std::sync::Arc::clone(&analyzer);
            std::thread::spawn(move || {
                analyzer
                    .analyze(&Transcript::from_text("parallel", content))
                    .action_items
                    .len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().expect("join"))
        .collect();
    assert_eq!(counts, vec![1, 2, 2]);
}

#[test]
fn exports_agree_with_the_task_table() {
    let result = analyze(SAME_ASSIGNEE);

    let share = export::share_text(&result.task_table);
    assert!(share.starts_with("Jane Smith:\n- "));
    assert!(share.contains("(Priority: high, Deadline: Friday)"));

    let query = TaskQuery {
        search: Some("onboarding".to_owned()),
        sort: SortField::Task,
        ..TaskQuery::default()
    };
    let tasks = export::flatten_tasks(&result.task_table, &query);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].assignee, "Jane Smith");

    let stats = export::statistics(&result.task_table);
    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.high_priority_tasks, 1);
    assert!((stats.tasks_per_person - 2.0).abs() < f64::EPSILON);

    let json: serde_json::Value =
        serde_json::from_str(&export::to_json(&result).expect("json")).expect("parse");
    assert_eq!(
        json.pointer("/taskTable/rows/0/deadline")
            .and_then(serde_json::Value::as_str),
        Some("Friday")
    );
}
