//! Whitelisted ORDER BY for movie listings.

use crate::error::ValidationError;
use serde::Deserialize;
use std::str::FromStr;
use utoipa::IntoParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Title,
    Rating,
    DateOfIssue,
}

impl SortColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Title => "title",
            SortColumn::Rating => "rating",
            SortColumn::DateOfIssue => "date_of_issue",
        }
    }
}

impl FromStr for SortColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortColumn::Id),
            "title" => Ok(SortColumn::Title),
            "rating" => Ok(SortColumn::Rating),
            "date_of_issue" => Ok(SortColumn::DateOfIssue),
            _ => Err(ValidationError::SortColumn(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(ValidationError::SortOrder(s.to_string()))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovieOrder {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for MovieOrder {
    fn default() -> Self {
        MovieOrder {
            column: SortColumn::Rating,
            direction: SortDirection::Desc,
        }
    }
}

impl MovieOrder {
    /// Parse both parts, failing before any query is built.
    pub fn parse(column: &str, order: &str) -> Result<Self, ValidationError> {
        Ok(MovieOrder {
            column: column.parse()?,
            direction: order.parse()?,
        })
    }

    /// `ORDER BY` clause; ties fall back to id so the listing is stable.
    pub fn to_sql(self) -> String {
        if self.column == SortColumn::Id {
            format!(" ORDER BY id {}", self.direction.as_sql())
        } else {
            format!(
                " ORDER BY {} {}, id ASC",
                self.column.as_sql(),
                self.direction.as_sql()
            )
        }
    }
}

/// Query string for the sorted movie listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// One of id, title, rating, date_of_issue. Defaults to rating.
    pub sort: Option<String>,
    /// ASC or DESC. Defaults to DESC.
    pub order: Option<String>,
}

impl SortQuery {
    pub fn resolve(&self) -> Result<MovieOrder, ValidationError> {
        let default = MovieOrder::default();
        let column = match self.sort.as_deref() {
            Some(s) => s.parse()?,
            None => default.column,
        };
        let direction = match self.order.as_deref() {
            Some(s) => s.parse()?,
            None => default.direction,
        };
        Ok(MovieOrder { column, direction })
    }
}
