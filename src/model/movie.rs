//! Movie records, request payloads and partial updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A row from the `movies` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date_of_issue: NaiveDate,
    pub rating: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub date_of_issue: NaiveDate,
    pub rating: f64,
}

impl NewMovie {
    pub fn into_movie(self, id: i64) -> Movie {
        Movie {
            id,
            title: self.title,
            description: self.description,
            date_of_issue: self.date_of_issue,
            rating: self.rating,
        }
    }
}

/// Validated partial update. A supplied empty description or 0.0 rating is a real value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_of_issue: Option<NaiveDate>,
    pub rating: Option<f64>,
}

impl MoviePatch {
    pub fn merge_into(self, current: Movie) -> Movie {
        Movie {
            id: current.id,
            title: self.title.unwrap_or(current.title),
            description: self.description.unwrap_or(current.description),
            date_of_issue: self.date_of_issue.unwrap_or(current.date_of_issue),
            rating: self.rating.unwrap_or(current.rating),
        }
    }
}

/// Request body for creating a movie, optionally linked to existing actors.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct MovieInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(example = "2010-07-16")]
    pub date_of_issue: String,
    pub rating: f64,
    #[serde(default)]
    pub actor_ids: Vec<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct MoviePatchInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_of_issue: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}
