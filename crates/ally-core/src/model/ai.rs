use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<&'a [ChatMessage]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Sentiment score in `[0, 1]` (higher is more positive) with a label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingExercise {
    pub name: String,
    pub description: String,
    pub inhale_duration: u32,
    pub hold_duration: u32,
    pub exhale_duration: u32,
    pub cycles: u32,
}

impl BreathingExercise {
    /// Seconds one full inhale-hold-exhale cycle takes.
    pub fn cycle_seconds(&self) -> u32 {
        self.inhale_duration
            .saturating_add(self.hold_duration)
            .saturating_add(self.exhale_duration)
    }

    /// Seconds for the recommended number of cycles.
    pub fn total_seconds(&self) -> u32 {
        self.cycle_seconds().saturating_mul(self.cycles)
    }
}
