use super::ApiClient;
use crate::error::Result;
use crate::model::{JournalAnalysis, JournalEntry, JournalEntryInput, ListQuery};

/// Client for `/journals`.
#[derive(Debug, Clone)]
pub struct JournalsClient {
    api: ApiClient,
}

impl JournalsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<JournalEntry>> {
        self.api.get_list("/journals/", query).await
    }

    pub async fn get(&self, id: &str) -> Result<JournalEntry> {
        self.api.get(&format!("/journals/{id}")).await
    }

    pub async fn create(&self, entry: &JournalEntryInput) -> Result<JournalEntry> {
        self.api.post("/journals/", entry).await
    }

    pub async fn update(&self, id: &str, entry: &JournalEntryInput) -> Result<JournalEntry> {
        self.api.put(&format!("/journals/{id}"), entry).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&format!("/journals/{id}")).await
    }

    /// Server-side sentiment analysis of one entry.
    pub async fn analyze(&self, id: &str) -> Result<JournalAnalysis> {
        self.api.get(&format!("/journals/{id}/analysis")).await
    }
}
