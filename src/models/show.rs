use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::show;
use crate::error::{AppError, FieldError};
use crate::models::shared::{format_start_time, parse_start_time};

/// The show booking form, as posted.
#[derive(Debug, Deserialize)]
pub struct ShowForm {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub start_time: String,
}

/// A validated booking ready to insert. Whether the referenced rows exist is
/// left to the foreign keys; a dangling id fails the write, not validation.
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

pub fn validate_show_form(form: &ShowForm) -> Result<NewShow, AppError> {
    let mut errors = Vec::new();

    let artist_id = parse_id(&mut errors, "artist_id", &form.artist_id);
    let venue_id = parse_id(&mut errors, "venue_id", &form.venue_id);

    let raw = form.start_time.trim();
    let start_time = if raw.is_empty() {
        errors.push(FieldError {
            field: "start_time",
            message: "This field is required.".into(),
        });
        None
    } else {
        let parsed = parse_start_time(raw);
        if parsed.is_none() {
            errors.push(FieldError {
                field: "start_time",
                message: "Not a valid datetime value.".into(),
            });
        }
        parsed
    };

    match (artist_id, venue_id, start_time) {
        (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => Ok(NewShow {
            artist_id,
            venue_id,
            start_time,
        }),
        _ => Err(AppError::Form(errors)),
    }
}

fn parse_id(errors: &mut Vec<FieldError>, field: &'static str, raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(FieldError {
            field,
            message: "This field is required.".into(),
        });
        return None;
    }
    match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError {
                field,
                message: "Not a valid integer value.".into(),
            });
            None
        }
    }
}

#[derive(Serialize)]
pub struct ShowResponse {
    pub id: i32,
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: String,
}

impl From<show::Model> for ShowResponse {
    fn from(m: show::Model) -> Self {
        Self {
            id: m.id,
            artist_id: m.artist_id,
            venue_id: m.venue_id,
            start_time: format_start_time(m.start_time),
        }
    }
}

/// Defaults served with the booking form.
#[derive(Serialize)]
pub struct ShowFormDefaults {
    pub start_time: String,
}
