//! Actor records, request payloads and partial updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A row from the `actors` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub sex: String,
    pub birthday: NaiveDate,
}

/// Actor as listed: `films` joins the titles of every linked movie with ", ".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActorWithFilms {
    pub id: i64,
    pub name: String,
    pub sex: String,
    pub birthday: NaiveDate,
    pub films: String,
}

/// Validated actor ready for insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct NewActor {
    pub name: String,
    pub sex: String,
    pub birthday: NaiveDate,
}

impl NewActor {
    pub fn into_actor(self, id: i64) -> Actor {
        Actor {
            id,
            name: self.name,
            sex: self.sex,
            birthday: self.birthday,
        }
    }
}

/// Validated partial update. `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub sex: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl ActorPatch {
    /// Overlay the supplied fields on `current`; the id never changes.
    pub fn merge_into(self, current: Actor) -> Actor {
        Actor {
            id: current.id,
            name: self.name.unwrap_or(current.name),
            sex: self.sex.unwrap_or(current.sex),
            birthday: self.birthday.unwrap_or(current.birthday),
        }
    }
}

/// Request body for creating an actor. Dates arrive as text and are checked by the validator.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct ActorInput {
    pub name: String,
    pub sex: String,
    #[schema(example = "1974-11-11")]
    pub birthday: String,
}

/// Request body for patching an actor. Omitted or null fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ActorPatchInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Actor {
        Actor {
            id: 4,
            name: "Leonardo DiCaprio".into(),
            sex: "M".into(),
            birthday: NaiveDate::from_ymd_opt(1974, 11, 11).unwrap(),
        }
    }

    #[test]
    fn merge_changes_only_supplied_fields() {
        let patch = ActorPatch {
            name: Some("Leo".into()),
            ..Default::default()
        };
        let merged = patch.merge_into(stored());
        assert_eq!(merged.name, "Leo");
        assert_eq!(merged.sex, "M");
        assert_eq!(merged.birthday, stored().birthday);
        assert_eq!(merged.id, 4);
    }

    #[test]
    fn empty_patch_is_identity() {
        let patch = ActorPatch::default();
        assert_eq!(patch.merge_into(stored()), stored());
    }
}
