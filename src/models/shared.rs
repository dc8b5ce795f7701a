use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FieldError;

/// Genre tags a venue or artist may carry.
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Swing",
    "Other",
];

/// Two-letter region codes accepted for the `state` field.
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://\S+$").expect("url pattern"));
static FACEBOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?(?:facebook|fb)\.com(?:/|$)").expect("facebook pattern")
});

/// Field choices served to the external form renderer.
#[derive(Serialize)]
pub struct FormChoices {
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl FormChoices {
    pub fn new() -> Self {
        Self {
            genres: GENRES,
            states: STATES,
        }
    }
}

impl Default for FormChoices {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// View model for the landing page.
#[derive(Serialize)]
pub struct LandingPage {
    pub venues: u64,
    pub artists: u64,
    pub shows: u64,
}

/// Serde helper for HTML checkbox fields: the browser either omits the key or
/// sends the widget's value (`y`, `on`, ...). Absence means unchecked.
pub fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(
        raw.as_deref(),
        Some("y" | "yes" | "on" | "true" | "1")
    ))
}

pub fn require(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message: "This field is required.".into(),
        });
    }
}

pub fn validate_state(errors: &mut Vec<FieldError>, value: &str) {
    require(errors, "state", value);
    if !value.trim().is_empty() && !STATES.contains(&value) {
        errors.push(FieldError {
            field: "state",
            message: format!("'{value}' is not a valid state."),
        });
    }
}

pub fn validate_genres(errors: &mut Vec<FieldError>, values: &[String]) {
    if values.is_empty() {
        errors.push(FieldError {
            field: "genres",
            message: "This field is required.".into(),
        });
        return;
    }
    for value in values {
        if !GENRES.contains(&value.as_str()) {
            errors.push(FieldError {
                field: "genres",
                message: format!("'{value}' is not a valid genre."),
            });
        }
    }
}

pub fn validate_phone(errors: &mut Vec<FieldError>, value: &str) {
    if !value.is_empty() && value.chars().count() < 10 {
        errors.push(FieldError {
            field: "phone",
            message: "Invalid phone number.".into(),
        });
    }
}

/// The two checks are independent: a well-formed URL on the wrong host and a
/// facebook path without a scheme each produce exactly one message.
pub fn validate_facebook_link(errors: &mut Vec<FieldError>, value: &str) {
    if value.is_empty() {
        return;
    }
    if !URL_RE.is_match(value) {
        errors.push(FieldError {
            field: "facebook_link",
            message: "Invalid URL.".into(),
        });
    }
    if !FACEBOOK_RE.is_match(value) {
        errors.push(FieldError {
            field: "facebook_link",
            message: "Invalid facebook URL format.".into(),
        });
    }
}

/// Deserialize the stored genre blob. Always yields a list; an empty or
/// unreadable blob yields the empty list.
pub fn parse_genres(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(stored).unwrap_or_default()
}

/// Serialize a genre list to the stored text form. The inverse of
/// [`parse_genres`], including the empty-list representation.
pub fn serialize_genres(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| String::from("[]"))
}

/// Parse a submitted `start_time`. Accepts RFC 3339 as well as the formats an
/// HTML datetime widget posts; naive values are taken as UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

pub fn format_start_time(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
