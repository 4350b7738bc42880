//! Courses: rides, re-queried through a structured date/status filter
//! rather than a free-text search.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const LIST_ENDPOINT: &str = "list-course-dash";
/// Structured filter endpoint (POST body, same page envelope back).
/// Courses have no free-text search route; filtering is date/status only.
pub const FILTER_ENDPOINT: &str = "filter-course";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Course {
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub lieu_depart: Option<String>,
    #[serde(default)]
    pub lieu_arrive: Option<String>,
    #[serde(default)]
    pub date_depart: Option<String>,
    #[serde(default)]
    pub heure_depart: Option<String>,
    #[serde(default)]
    pub montant: Option<f64>,
    #[serde(default)]
    pub statut: Option<String>,
    // 0/1 on the wire
    #[serde(default)]
    pub is_paid: Option<i64>,
    #[serde(default)]
    pub transaction_type: Option<String>,
}

impl Course {
    pub fn paid(&self) -> bool {
        self.is_paid.unwrap_or(0) != 0
    }

    pub fn amount_xaf(&self) -> f64 {
        self.montant.unwrap_or(0.0)
    }

    pub fn route(&self) -> String {
        format!(
            "{} → {}",
            self.lieu_depart.as_deref().unwrap_or("?"),
            self.lieu_arrive.as_deref().unwrap_or("?")
        )
    }
}

/// Structured filter state for the course list.
///
/// Fields are created from user input and consumed on an explicit apply;
/// an entirely empty filter degrades to the default listing rather than
/// hitting the filter endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debut: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fin: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut: Option<String>,
}

impl CourseFilter {
    pub fn is_empty(&self) -> bool {
        self.debut.is_none() && self.fin.is_none() && self.statut.is_none()
    }
}
