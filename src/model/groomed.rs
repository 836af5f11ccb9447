use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification derived from keyword heuristics; never read back from the
/// service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Bug,
    Feature,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bug => "Bug",
            Category::Feature => "Feature",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One groomed backlog entry: the raw feature's identity plus derived
/// category, priority, and a trimmed summary. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroomedFeature {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub category: Category,
    pub priority: Priority,
    pub status: String,
}
