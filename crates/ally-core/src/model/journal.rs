use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood_id: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl JournalEntry {
    /// First line of the content, cut at `max` characters.
    pub fn preview(&self, max: usize) -> String {
        let first = self.content.lines().next().unwrap_or_default();
        if first.chars().count() <= max {
            first.to_string()
        } else {
            let cut: String = first.chars().take(max.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }
}

/// Partial journal body used for both create and update. Absent fields are
/// left out of the JSON so the backend keeps (or defaults) them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalEntryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalAnalysis {
    pub entry_id: String,
    pub sentiment_score: f64,
    pub sentiment_label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}
