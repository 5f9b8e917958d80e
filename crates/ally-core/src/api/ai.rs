use super::ApiClient;
use crate::error::Result;
use crate::model::{BreathingExercise, ChatMessage, ChatRequest, ChatResponse, SentimentResult};

/// Client for `/ai`: chat turns, sentiment scoring, and the breathing catalog.
#[derive(Debug, Clone)]
pub struct AiClient {
    api: ApiClient,
}

impl AiClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// One chat turn. `history` carries the earlier turns, oldest first.
    pub async fn chat(
        &self,
        message: &str,
        history: Option<&[ChatMessage]>,
    ) -> Result<ChatResponse> {
        let body = ChatRequest { message, history };
        self.api.post("/ai/chat", &body).await
    }

    pub async fn sentiment(&self, text: &str) -> Result<SentimentResult> {
        let body = serde_json::json!({ "text": text });
        self.api.post("/ai/sentiment", &body).await
    }

    pub async fn breathing_exercises(&self) -> Result<Vec<BreathingExercise>> {
        self.api.get("/ai/breathing-exercises").await
    }
}
