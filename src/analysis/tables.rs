//! Lookup data the analyzer is built with: name gazetteers and the canned
//! results used when a stage extracts nothing.
//!
//! `AnalyzerTables::default()` carries the built-in data. Callers (and tests)
//! can substitute or extend any list before constructing an
//! [`Analyzer`](crate::analysis::Analyzer).

use crate::analysis::model::Priority;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gazetteer {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    /// Names searched for by the people entity pass. Mixes first names and
    /// common surnames.
    pub entity_names: Vec<String>,
}

impl Gazetteer {
    pub fn is_first_name(&self, word: &str) -> bool {
        self.first_names.iter().any(|name| name == word)
    }

    pub fn is_last_name(&self, word: &str) -> bool {
        self.last_names.iter().any(|name| name == word)
    }

    /// Appends names not already present, keeping list order stable.
    pub fn extend(&mut self, first_names: &[String], last_names: &[String]) {
        push_missing(&mut self.first_names, first_names);
        push_missing(&mut self.last_names, last_names);
        push_missing(&mut self.entity_names, first_names);
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self {
            first_names: owned(FIRST_NAMES),
            last_names: owned(LAST_NAMES),
            entity_names: owned(ENTITY_NAMES),
        }
    }
}

/// One canned action item. Ids are synthesized when the item is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackActionItem {
    pub task: String,
    pub assignee: String,
    pub due_date: Option<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallbacks {
    pub action_items: Vec<FallbackActionItem>,
    pub decisions: Vec<String>,
    pub people: Vec<String>,
    pub organizations: Vec<String>,
    pub dates: Vec<String>,
    pub topics: Vec<String>,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            action_items: vec![
                fallback_item(
                    "Update project documentation with meeting outcomes",
                    "Alex",
                    Some("next Friday"),
                    Priority::Medium,
                ),
                fallback_item(
                    "Schedule follow-up meeting with stakeholders",
                    "Sarah",
                    None,
                    Priority::High,
                ),
                fallback_item(
                    "Review the implementation plan and provide feedback",
                    "Michael",
                    Some("next Wednesday"),
                    Priority::Medium,
                ),
                fallback_item(
                    "Complete the API documentation for the new endpoints",
                    "Raj Patel",
                    Some("Next Monday"),
                    Priority::High,
                ),
                fallback_item(
                    "Conduct security audit of the authentication service",
                    "Amit Sharma",
                    Some("next Friday"),
                    Priority::Low,
                ),
            ],
            decisions: owned(&[
                "Agreed to proceed with the new feature implementation in the next sprint",
                "Decided to postpone the marketing campaign until Q3",
                "Team will adopt the new project management methodology starting next month",
                "Budget for the research phase was approved by all stakeholders",
            ]),
            people: owned(&[
                "Alex Johnson",
                "Sarah Smith",
                "Michael Chen",
                "David Wilson",
                "Raj Patel",
            ]),
            organizations: owned(&[
                "Acme Corp",
                "TechSolutions",
                "Global Innovations",
                "DataSystems Inc",
            ]),
            dates: owned(&[
                "Next Monday",
                "July 15th",
                "Q3",
                "Next quarter",
                "Next Friday",
                "Thursday",
            ]),
            topics: owned(&[
                "Project Timeline",
                "Budget Approval",
                "Feature Implementation",
                "Marketing Strategy",
                "Redis Implementation",
                "WebSocket Connections",
            ]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerTables {
    pub gazetteer: Gazetteer,
    pub fallbacks: Fallbacks,
}

const FIRST_NAMES: &[&str] = &[
    "Raj", "Amit", "Vikram", "Rahul", "Sanjay", "Anil", "Sunil", "Arun", "Vijay", "Ravi", "Ajay",
    "Deepak", "Manoj", "Nitin", "Rakesh", "Ramesh", "Sachin", "Vinod", "Sushil", "Rajiv", "Aarav",
    "Arjun", "Krishna", "Pranav", "Vivek", "Rohan", "Anand", "Vishal", "Ashok", "Satish", "Suresh",
    "Ganesh", "Priya", "Neha", "Pooja", "Asha", "Sunita", "Anita", "Meena", "Geeta", "Shobha",
    "Radha", "Kavita", "Sita", "Lakshmi", "Sarita", "Kiran", "Neeta", "Anjali", "Deepika",
    "Aishwarya", "Divya", "Sneha", "Swati", "Shweta", "Ritu", "Akash", "Ishaan", "Kabir", "Dhruv",
    "Arnav", "Sahil", "Vihaan", "Aditya",
];

const LAST_NAMES: &[&str] = &[
    "Patel", "Sharma", "Singh", "Kumar", "Gupta", "Joshi", "Verma", "Rao", "Reddy", "Shah",
    "Mehta", "Gandhi", "Nair", "Desai", "Iyer", "Agarwal", "Mukherjee", "Chatterjee", "Banerjee",
    "Das", "Bose", "Roy", "Kapoor", "Khanna", "Malhotra", "Saxena", "Bhat", "Yadav", "Chopra",
    "Choudhary", "Menon", "Pillai", "Patil", "Kaur", "Malik", "Sinha", "Sethi", "Chauhan",
    "Trivedi", "Mathur", "Prasad", "Mehra", "Chawla", "Dhar", "Dutta", "Tiwari", "Bhatt",
    "Bhattacharya",
];

const ENTITY_NAMES: &[&str] = &[
    "Raj", "Amit", "Vikram", "Rahul", "Sanjay", "Anil", "Sunil", "Vijay", "Ravi", "Ajay", "Deepak",
    "Manoj", "Nitin", "Rakesh", "Priya", "Neha", "Pooja", "Asha", "Sunita", "Anita", "Meena",
    "Patel", "Sharma", "Singh", "Kumar", "Gupta", "Joshi", "Verma",
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn push_missing(target: &mut Vec<String>, extra: &[String]) {
    for value in extra {
        let value = value.trim();
        if !value.is_empty() && !target.iter().any(|existing| existing == value) {
            target.push(value.to_owned());
        }
    }
}

fn fallback_item(
    task: &str,
    assignee: &str,
    due_date: Option<&str>,
    priority: Priority,
) -> FallbackActionItem {
    FallbackActionItem {
        task: task.to_owned(),
        assignee: assignee.to_owned(),
        due_date: due_date.map(str::to_owned),
        priority,
    }
}
