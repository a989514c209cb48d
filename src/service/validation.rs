//! Field constraints for actors and movies. Pure: no I/O.

use crate::error::ValidationError;
use crate::model::{
    ActorInput, ActorPatch, ActorPatchInput, MovieInput, MoviePatch, MoviePatchInput, NewActor,
    NewMovie,
};
use chrono::NaiveDate;

pub const TITLE_MAX_EXCLUSIVE: usize = 150;
pub const DESCRIPTION_MAX_EXCLUSIVE: usize = 1000;
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 10.0;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct EntityValidator;

impl EntityValidator {
    pub fn actor(input: ActorInput) -> Result<NewActor, ValidationError> {
        Ok(NewActor {
            name: name(input.name)?,
            sex: sex(input.sex)?,
            birthday: date("birthday", &input.birthday)?,
        })
    }

    /// Validate only the fields present in the patch.
    pub fn actor_patch(input: ActorPatchInput) -> Result<ActorPatch, ValidationError> {
        Ok(ActorPatch {
            name: input.name.map(name).transpose()?,
            sex: input.sex.map(sex).transpose()?,
            birthday: input
                .birthday
                .as_deref()
                .map(|s| date("birthday", s))
                .transpose()?,
        })
    }

    /// Returns the validated movie and the actor ids to link it with.
    pub fn movie(input: MovieInput) -> Result<(NewMovie, Vec<i64>), ValidationError> {
        let movie = NewMovie {
            title: title(input.title)?,
            description: description(input.description)?,
            date_of_issue: date("date_of_issue", &input.date_of_issue)?,
            rating: rating(input.rating)?,
        };
        Ok((movie, input.actor_ids))
    }

    pub fn movie_patch(input: MoviePatchInput) -> Result<MoviePatch, ValidationError> {
        Ok(MoviePatch {
            title: input.title.map(title).transpose()?,
            description: input.description.map(description).transpose()?,
            date_of_issue: input
                .date_of_issue
                .as_deref()
                .map(|s| date("date_of_issue", s))
                .transpose()?,
            rating: input.rating.map(rating).transpose()?,
        })
    }
}

pub fn title(value: String) -> Result<String, ValidationError> {
    let len = value.chars().count();
    if len < 1 || len >= TITLE_MAX_EXCLUSIVE {
        return Err(ValidationError::TitleLength(len));
    }
    Ok(value)
}

pub fn description(value: String) -> Result<String, ValidationError> {
    let len = value.chars().count();
    if len >= DESCRIPTION_MAX_EXCLUSIVE {
        return Err(ValidationError::DescriptionLength(len));
    }
    Ok(value)
}

pub fn rating(value: f64) -> Result<f64, ValidationError> {
    // NaN fails the range check.
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(ValidationError::RatingRange(value));
    }
    Ok(value)
}

fn name(value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(value)
}

fn sex(value: String) -> Result<String, ValidationError> {
    if value.chars().count() != 1 {
        return Err(ValidationError::SexCode(value));
    }
    Ok(value)
}

fn date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ValidationError::Date {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> MovieInput {
        MovieInput {
            title: "Inception".into(),
            description: "Dreams within dreams".into(),
            date_of_issue: "2010-07-16".into(),
            rating: 8.8,
            actor_ids: vec![1, 2],
        }
    }

    #[test]
    fn title_length_bounds() {
        assert_eq!(title(String::new()), Err(ValidationError::TitleLength(0)));
        assert!(title("A".into()).is_ok());
        assert!(title("x".repeat(149)).is_ok());
        assert_eq!(title("x".repeat(150)), Err(ValidationError::TitleLength(150)));
    }

    #[test]
    fn title_counts_characters_not_bytes() {
        // 149 two-byte characters.
        assert!(title("ж".repeat(149)).is_ok());
    }

    #[test]
    fn description_limit() {
        assert!(description(String::new()).is_ok());
        assert!(description("d".repeat(999)).is_ok());
        assert_eq!(
            description("d".repeat(1000)),
            Err(ValidationError::DescriptionLength(1000))
        );
    }

    #[test]
    fn rating_is_a_closed_interval() {
        for r in [0.0, 0.1, 5.0, 9.99, 10.0] {
            assert_eq!(rating(r), Ok(r));
        }
        for r in [-0.01, 10.01, 100.0, f64::INFINITY] {
            assert!(rating(r).is_err(), "{r} accepted");
        }
        assert!(rating(f64::NAN).is_err());
    }

    #[test]
    fn movie_carries_actor_ids() {
        let (movie, ids) = EntityValidator::movie(inception()).unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.date_of_issue, NaiveDate::from_ymd_opt(2010, 7, 16).unwrap());
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn movie_rejects_bad_date() {
        let mut input = inception();
        input.date_of_issue = "16.07.2010".into();
        assert!(matches!(
            EntityValidator::movie(input),
            Err(ValidationError::Date { field: "date_of_issue", .. })
        ));
    }

    #[test]
    fn actor_requires_single_sex_code() {
        let input = ActorInput {
            name: "Marion Cotillard".into(),
            sex: "Female".into(),
            birthday: "1975-09-30".into(),
        };
        assert_eq!(
            EntityValidator::actor(input),
            Err(ValidationError::SexCode("Female".into()))
        );
    }

    #[test]
    fn patch_validates_only_present_fields() {
        let patch = EntityValidator::movie_patch(MoviePatchInput {
            rating: Some(0.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.rating, Some(0.0));
        assert!(patch.title.is_none());

        let err = EntityValidator::movie_patch(MoviePatchInput {
            title: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(err, Err(ValidationError::TitleLength(0)));
    }

    #[test]
    fn actor_patch_parses_birthday() {
        let patch = EntityValidator::actor_patch(ActorPatchInput {
            birthday: Some("1980-02-29".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.birthday, NaiveDate::from_ymd_opt(1980, 2, 29));
        assert!(EntityValidator::actor_patch(ActorPatchInput {
            birthday: Some("1981-02-29".into()),
            ..Default::default()
        })
        .is_err());
    }
}
