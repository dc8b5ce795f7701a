use serde::{Deserialize, Serialize};

use crate::entity::venue;
use crate::error::AppError;
use crate::models::shared::{
    self, FormChoices, checkbox, require, validate_facebook_link, validate_genres, validate_phone,
    validate_state,
};
use crate::queries::{ShowPartition, VenueShowEntry};

/// The venue create/edit form, as posted.
#[derive(Debug, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
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
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: String,
}

/// Run every field rule and report all failures together.
pub fn validate_venue_form(form: &VenueForm) -> Result<(), AppError> {
    let mut errors = Vec::new();

    require(&mut errors, "name", &form.name);
    require(&mut errors, "city", &form.city);
    validate_state(&mut errors, &form.state);
    require(&mut errors, "address", &form.address);
    validate_phone(&mut errors, &form.phone);
    validate_genres(&mut errors, &form.genres);
    validate_facebook_link(&mut errors, &form.facebook_link);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Form(errors))
    }
}

/// A venue with its genre blob deserialized, minus the show schedule.
#[derive(Serialize)]
pub struct VenueResponse {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl From<venue::Model> for VenueResponse {
    fn from(m: venue::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            city: m.city,
            state: m.state,
            address: m.address,
            phone: m.phone,
            genres: shared::parse_genres(&m.genres),
            image_link: m.image_link,
            facebook_link: m.facebook_link,
            website_link: m.website_link,
            seeking_talent: m.seeking_talent,
            seeking_description: m.seeking_description,
        }
    }
}

/// The venue page view model: the record plus its partitioned schedule.
#[derive(Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: VenueResponse,
    pub past_shows: Vec<VenueShowEntry>,
    pub upcoming_shows: Vec<VenueShowEntry>,
    pub past_shows_count: u64,
    pub upcoming_shows_count: u64,
}

impl VenueDetail {
    pub fn new(model: venue::Model, shows: ShowPartition<VenueShowEntry>) -> Self {
        Self {
            venue: VenueResponse::from(model),
            past_shows: shows.past_shows,
            upcoming_shows: shows.upcoming_shows,
            past_shows_count: shows.past_shows_count,
            upcoming_shows_count: shows.upcoming_shows_count,
        }
    }
}

/// Payload for the edit form: the field choices plus current values.
#[derive(Serialize)]
pub struct VenueEditContext {
    pub form: FormChoices,
    pub venue: VenueResponse,
}

/// Structured outcome of the delete endpoint.
#[derive(Serialize)]
pub struct DeleteOutcome {
    pub status: u16,
    pub message: String,
}
