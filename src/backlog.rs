//! Work items to print.
//!
//! A backlog file lists stories in print order, each with its tasks:
//!
//! ```yaml
//! stories:
//!   - id: 12
//!     subject: Checkout flow
//!     story_points: 5
//!     position: 1
//!     fixed_version: Sprint 4
//!     ancestors: [{ tracker: Epic, id: 3 }]
//!     tasks:
//!       - id: 40
//!         subject: Payment form
//!         estimated_hours: 2.5
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::model::{AncestryHop, WorkItem};

/// Supplies the direct children of an item, in display order.
pub trait WorkItemProvider {
    fn children(&self, parent: &WorkItem) -> Vec<WorkItem>;
}

/// Items with no children.
pub struct NoChildren;

impl WorkItemProvider for NoChildren {
    fn children(&self, _parent: &WorkItem) -> Vec<WorkItem> {
        Vec::new()
    }
}

#[derive(Debug, Deserialize)]
struct BacklogFile {
    #[serde(default)]
    stories: Vec<StoryRecord>,
}

#[derive(Debug, Deserialize)]
struct StoryRecord {
    id: u32,
    subject: String,
    #[serde(default = "default_story_tracker")]
    tracker: String,
    description: Option<String>,
    story_points: Option<f32>,
    position: Option<u32>,
    fixed_version: Option<String>,
    category: Option<String>,
    #[serde(default)]
    ancestors: Vec<AncestryHop>,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    id: u32,
    subject: String,
    #[serde(default = "default_task_tracker")]
    tracker: String,
    description: Option<String>,
    estimated_hours: Option<f32>,
    category: Option<String>,
}

fn default_story_tracker() -> String {
    "Story".into()
}

fn default_task_tracker() -> String {
    "Task".into()
}

/// Stories and their tasks read from a backlog file.
#[derive(Debug, Default)]
pub struct Backlog {
    stories: Vec<WorkItem>,
    tasks: HashMap<u32, Vec<WorkItem>>,
}

impl Backlog {
    pub fn from_yaml_str(text: &str) -> Result<Self, Error> {
        let file: BacklogFile =
            serde_yaml::from_str(text).map_err(|e| Error::Store(format!("backlog: {e}")))?;

        let mut backlog = Backlog::default();
        for record in file.stories {
            let mut ancestry = record.ancestors;
            ancestry.push(AncestryHop {
                tracker: record.tracker,
                id: record.id,
            });

            let tasks = record
                .tasks
                .into_iter()
                .map(|t| {
                    let mut task_ancestry = ancestry.clone();
                    task_ancestry.push(AncestryHop {
                        tracker: t.tracker,
                        id: t.id,
                    });
                    WorkItem {
                        id: t.id,
                        subject: t.subject,
                        description: t.description,
                        estimated_hours: t.estimated_hours,
                        category: t.category,
                        ancestry: task_ancestry,
                        ..WorkItem::default()
                    }
                })
                .collect();
            backlog.tasks.insert(record.id, tasks);

            backlog.stories.push(WorkItem {
                id: record.id,
                subject: record.subject,
                description: record.description,
                story_points: record.story_points,
                category: record.category,
                fixed_version: record.fixed_version,
                ancestry,
                position: record.position,
                ..WorkItem::default()
            });
        }
        Ok(backlog)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn stories(&self) -> &[WorkItem] {
        &self.stories
    }
}

impl WorkItemProvider for Backlog {
    fn children(&self, parent: &WorkItem) -> Vec<WorkItem> {
        self.tasks.get(&parent.id).cloned().unwrap_or_default()
    }
}
