use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use tracing::instrument;

use crate::entity::show;
use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::models::shared::format_start_time;
use crate::models::show::{ShowForm, ShowFormDefaults, ShowResponse, validate_show_form};
use crate::queries;
use crate::state::AppState;

/// Flat list of all shows with venue and artist display fields.
#[instrument(skip(state))]
pub async fn list_shows(
    State(state): State<AppState>,
) -> Result<Json<Vec<queries::ShowListItem>>, AppError> {
    let shows = queries::list_shows(&state.db).await?;
    Ok(Json(shows))
}

pub async fn create_show_form() -> Json<ShowFormDefaults> {
    Json(ShowFormDefaults {
        start_time: format_start_time(Utc::now()),
    })
}

/// Book a show. A dangling artist or venue id fails the insert at the foreign
/// keys and is reported as a storage failure, not a field error.
#[instrument(skip(state, form))]
pub async fn create_show_submission(
    State(state): State<AppState>,
    AppForm(form): AppForm<ShowForm>,
) -> Result<impl IntoResponse, AppError> {
    let new_show = validate_show_form(&form)?;

    let active = show::ActiveModel {
        artist_id: Set(new_show.artist_id),
        venue_id: Set(new_show.venue_id),
        start_time: Set(new_show.start_time),
        ..Default::default()
    };

    let model = active
        .insert(&state.db)
        .await
        .map_err(|err| AppError::storage(err, "An error occurred. Show could not be listed."))?;

    Ok((StatusCode::CREATED, Json(ShowResponse::from(model))))
}
