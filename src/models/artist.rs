use serde::{Deserialize, Serialize};

use crate::entity::artist;
use crate::error::AppError;
use crate::models::shared::{
    self, FormChoices, checkbox, require, validate_facebook_link, validate_genres, validate_phone,
    validate_state,
};
use crate::queries::{ArtistShowEntry, ShowPartition};

/// The artist create/edit form, as posted. Same shape as the venue form minus
/// the address, seeking a venue instead of talent.
#[derive(Debug, Deserialize)]
pub struct ArtistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: String,
}

pub fn validate_artist_form(form: &ArtistForm) -> Result<(), AppError> {
    let mut errors = Vec::new();

    require(&mut errors, "name", &form.name);
    require(&mut errors, "city", &form.city);
    validate_state(&mut errors, &form.state);
    validate_phone(&mut errors, &form.phone);
    validate_genres(&mut errors, &form.genres);
    validate_facebook_link(&mut errors, &form.facebook_link);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Form(errors))
    }
}

#[derive(Serialize)]
pub struct ArtistResponse {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl From<artist::Model> for ArtistResponse {
    fn from(m: artist::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            city: m.city,
            state: m.state,
            phone: m.phone,
            genres: shared::parse_genres(&m.genres),
            image_link: m.image_link,
            facebook_link: m.facebook_link,
            website_link: m.website_link,
            seeking_venue: m.seeking_venue,
            seeking_description: m.seeking_description,
        }
    }
}

/// The artist page view model: the record plus its partitioned schedule.
#[derive(Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: ArtistResponse,
    pub past_shows: Vec<ArtistShowEntry>,
    pub upcoming_shows: Vec<ArtistShowEntry>,
    pub past_shows_count: u64,
    pub upcoming_shows_count: u64,
}

impl ArtistDetail {
    pub fn new(model: artist::Model, shows: ShowPartition<ArtistShowEntry>) -> Self {
        Self {
            artist: ArtistResponse::from(model),
            past_shows: shows.past_shows,
            upcoming_shows: shows.upcoming_shows,
            past_shows_count: shows.past_shows_count,
            upcoming_shows_count: shows.upcoming_shows_count,
        }
    }
}

#[derive(Serialize)]
pub struct ArtistEditContext {
    pub form: FormChoices,
    pub artist: ArtistResponse,
}
