//! Story breakdown: an ordered keyword rule table mapping a user story to
//! canned task templates.
//!
//! Deliberately simple stand-in for an external content-generation service:
//! rules are evaluated in a fixed priority order against the story action,
//! first match wins, no randomness. Callers feed the output to
//! `scheduler::assign_batch` in the order returned here.

use crate::item::WorkItem;
use serde::{Deserialize, Serialize};

/// A backlog user story in the Agile "as a / I want / so that" shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    pub id: String,
    /// "As a ..."
    pub role: String,
    /// "I want to ..."
    pub action: String,
    /// "So that ..."
    pub benefit: String,
}

impl UserStory {
    pub fn new(
        id: impl Into<String>,
        role: impl Into<String>,
        action: impl Into<String>,
        benefit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            action: action.into(),
            benefit: benefit.into(),
        }
    }
}

/// One task produced by the breakdown, ready to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTask {
    pub description: String,
    /// Who picks it up ("Quality", "Scrum Master", ...).
    pub role: String,
    pub hours: f64,
}

fn task(description: impl Into<String>, role: &str, hours: f64) -> GeneratedTask {
    GeneratedTask {
        description: description.into(),
        role: role.to_string(),
        hours,
    }
}

/// Break a story into an ordered list of tasks using the keyword table.
pub fn breakdown_story(story: &UserStory) -> Vec<GeneratedTask> {
    let action = story.action.to_lowercase();

    // Feedback / reporting flows
    if action.contains("feedback") || action.contains("report") {
        return vec![
            task(format!("[US] Feedback module setup ({})", story.role), "IT/Process", 1.5),
            task("[US] Operator training on the feedback flow", "Supervisor", 1.0),
            task("[US] Flow test and log verification", "Quality", 1.0),
        ];
    }

    // Checklists / audits
    if action.contains("checklist") || action.contains("audit") {
        return vec![
            task("[US] Checklist draft review", "Quality", 2.0),
            task("[US] Checklist validation on the line", "Production", 2.0),
            task("[US] Official document release", "Engineering", 1.0),
        ];
    }

    // Visual management boards
    if action.contains("board") || action.contains("visual") {
        return vec![
            task("[US] Physical board installation", "Team", 1.0),
            task("[US] Card and column definition", "Scrum Master", 1.0),
            task("[US] First stand-up session", "Everyone", 0.5),
        ];
    }

    // Default: analyze, implement, verify.
    vec![
        task(format!("[US] Analysis and design: {}", story.action), "Engineering", 2.0),
        task(format!("[US] Implementation: {}", story.action), "Operations", 2.0),
        task(format!("[US] Definition-of-done check: {}", story.benefit), "Quality", 1.0),
    ]
}

/// Convert generated tasks into schedulable work items, traced back to the
/// story they came from.
pub fn to_work_items(story: &UserStory, tasks: &[GeneratedTask]) -> Vec<WorkItem> {
    tasks
        .iter()
        .map(|t| WorkItem::new(story.id.clone(), t.hours))
        .collect()
}
