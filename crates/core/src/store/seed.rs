//! Baseline dataset for fallback mode
//!
//! Mirrors the fixed sample data the application ships with: 3 tabs,
//! 16 categories and 12 tasks. Seed timestamps are spaced one millisecond
//! apart so list order is deterministic.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::model::{Category, Tab, Task};

const TABS: [(&str, &str); 3] = [
    ("Work", "#3B82F6"),
    ("Personal", "#10B981"),
    ("RTSE", "#F59E0B"),
];

// (name, tab index, color)
const CATEGORIES: [(&str, usize, &str); 16] = [
    ("Ad hoc", 0, "#3B82F6"),
    ("Connectors / API Pilot project", 0, "#8B5CF6"),
    ("Customer First / Program", 0, "#EC4899"),
    ("REA general", 0, "#06B6D4"),
    ("Emails/Online", 1, "#10B981"),
    ("Weekend jobs", 1, "#10B981"),
    ("Home improvement", 1, "#06B6D4"),
    ("Shopping", 1, "#8B5CF6"),
    ("Research", 1, "#3B82F6"),
    ("Ad hoc", 1, "#EC4899"),
    ("Xero improvements", 2, "#F59E0B"),
    ("Katana improvements", 2, "#F59E0B"),
    ("Pipedrive improvements", 2, "#F59E0B"),
    ("Board meeting tasks", 2, "#EF4444"),
    ("General", 2, "#8B5CF6"),
    ("Research", 2, "#EC4899"),
];

// (title, category index, priority)
const TASKS: [(&str, usize, bool); 12] = [
    ("Better documentation for Pilot project at Epic level", 1, false),
    ("Design Program Governance structure", 2, false),
    ("Update the new About section on JPD", 2, true),
    ("New Amp - speakers", 7, false),
    ("Prune plant in entrance", 6, false),
    ("Investigate how to integrate invoices into Katana", 11, false),
    ("Set up shade for new car", 5, false),
    ("Mow lawn", 5, false),
    ("Update REA searches", 9, false),
    ("Update ING bank move saving to spending", 4, false),
    ("Supplements for gym", 8, false),
    ("Heatmap of Mine visits", 13, false),
];

/// Build the baseline dataset with fresh ids.
pub fn baseline() -> (Vec<Tab>, Vec<Category>, Vec<Task>) {
    let base = Utc::now();
    let mut step = 0i64;
    let mut next_created_at = || {
        step += 1;
        base + Duration::milliseconds(step)
    };

    let tabs: Vec<Tab> = TABS
        .iter()
        .map(|(name, color)| Tab {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: color.to_string(),
            created_at: next_created_at(),
        })
        .collect();

    let categories: Vec<Category> = CATEGORIES
        .iter()
        .map(|(name, tab_index, color)| Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            tab_id: tabs[*tab_index].id,
            color: color.to_string(),
            created_at: next_created_at(),
        })
        .collect();

    let tasks: Vec<Task> = TASKS
        .iter()
        .map(|(title, category_index, priority)| {
            let created_at = next_created_at();
            Task {
                id: Uuid::new_v4(),
                title: title.to_string(),
                completed: false,
                priority: *priority,
                category_id: categories[*category_index].id,
                created_at,
                updated_at: created_at,
            }
        })
        .collect();

    (tabs, categories, tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_shape() {
        let (tabs, categories, tasks) = baseline();
        assert_eq!(tabs.len(), 3);
        assert_eq!(categories.len(), 16);
        assert_eq!(tasks.len(), 12);
    }

    #[test]
    fn test_baseline_references_resolve() {
        let (tabs, categories, tasks) = baseline();
        for category in &categories {
            assert!(tabs.iter().any(|tab| tab.id == category.tab_id));
        }
        for task in &tasks {
            assert!(categories.iter().any(|cat| cat.id == task.category_id));
        }
    }

    #[test]
    fn test_baseline_created_at_is_ascending() {
        let (tabs, categories, tasks) = baseline();
        assert!(tabs.windows(2).all(|w| w[0].created_at < w[1].created_at));
        assert!(categories
            .windows(2)
            .all(|w| w[0].created_at < w[1].created_at));
        assert!(tasks.windows(2).all(|w| w[0].created_at < w[1].created_at));
    }
}
