//! Generated report records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated report file, kept for later download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    /// Path of the file relative to the reports directory
    pub file: String,
    pub user_id: Uuid,
    pub generated_at: DateTime<Utc>,
}

/// Report flavors the backend can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[default]
    Movements,
    TopProducts,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Movements => "movements",
            ReportType::TopProducts => "top_products",
        }
    }
}
