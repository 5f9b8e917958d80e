use chrono::NaiveDate;

use super::ApiClient;
use crate::error::Result;
use crate::model::{AggregationPeriod, ListQuery, Mood, MoodAggregation, MoodInput};

/// Client for `/moods`.
#[derive(Debug, Clone)]
pub struct MoodsClient {
    api: ApiClient,
}

impl MoodsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Mood>> {
        self.api.get_list("/moods/", query).await
    }

    pub async fn get(&self, id: &str) -> Result<Mood> {
        self.api.get(&format!("/moods/{id}")).await
    }

    pub async fn create(&self, mood: &MoodInput) -> Result<Mood> {
        self.api.post("/moods/", mood).await
    }

    pub async fn update(&self, id: &str, mood: &MoodInput) -> Result<Mood> {
        self.api.put(&format!("/moods/{id}"), mood).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&format!("/moods/{id}")).await
    }

    /// Average scores bucketed by `period`. The backend picks the range when
    /// a bound is left out.
    pub async fn aggregate(
        &self,
        period: AggregationPeriod,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<MoodAggregation> {
        self.api
            .get_list(
                &format!("/moods/aggregate/{period}"),
                &aggregate_range(start_date, end_date),
            )
            .await
    }
}

/// Date bounds for an aggregation. Paging never applies, and only supplied
/// bounds reach the query string.
fn aggregate_range(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> ListQuery {
    ListQuery {
        start_date,
        end_date,
        ..ListQuery::default()
    }
}
