use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mood {
    pub id: String,
    pub score: i32,
    #[serde(default)]
    pub notes: Option<String>,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Partial mood body used for both create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPeriod {
    Day,
    Week,
    Month,
}

impl std::fmt::Display for AggregationPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl std::str::FromStr for AggregationPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(format!("unknown period: {s} (expected day, week, or month)")),
        }
    }
}

/// One bucket of an aggregation. `period` is the bucket key, e.g.
/// `2024-03-04` for days and weeks or `2024-03` for months.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodBucket {
    pub period: String,
    pub average_score: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodAggregation {
    pub period: AggregationPeriod,
    #[serde(default)]
    pub data: Vec<MoodBucket>,
    pub average_score: f64,
}

/// Pagination and date filters shared by the journal and mood listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ListQuery {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
