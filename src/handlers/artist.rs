use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set, TransactionTrait};
use tracing::instrument;

use crate::entity::artist;
use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::models::artist::{
    ArtistDetail, ArtistEditContext, ArtistForm, ArtistResponse, validate_artist_form,
};
use crate::models::shared::{FormChoices, SearchForm, serialize_genres};
use crate::queries;
use crate::state::AppState;

/// Flat artist listing for the directory page.
#[instrument(skip(state))]
pub async fn list_artists(
    State(state): State<AppState>,
) -> Result<Json<Vec<queries::IdName>>, AppError> {
    let artists = queries::list_artists(&state.db).await?;
    Ok(Json(artists))
}

#[instrument(skip(state, form), fields(term = %form.search_term))]
pub async fn search_artists(
    State(state): State<AppState>,
    AppForm(form): AppForm<SearchForm>,
) -> Result<Json<queries::SearchResults>, AppError> {
    let results = queries::search_artists(&state.db, &form.search_term, Utc::now()).await?;
    Ok(Json(results))
}

/// Artist page: the record plus its shows partitioned into past and upcoming.
#[instrument(skip(state), fields(id))]
pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>, AppError> {
    let model = find_artist(&state.db, id).await?;
    let shows = queries::artist_shows(&state.db, id, Utc::now()).await?;
    Ok(Json(ArtistDetail::new(model, shows)))
}

pub async fn create_artist_form() -> Json<FormChoices> {
    Json(FormChoices::new())
}

#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn create_artist_submission(
    State(state): State<AppState>,
    AppForm(form): AppForm<ArtistForm>,
) -> Result<impl IntoResponse, AppError> {
    validate_artist_form(&form)?;

    let name = form.name.clone();
    let new_artist = artist::ActiveModel {
        name: Set(form.name),
        city: Set(form.city),
        state: Set(form.state),
        phone: Set(form.phone),
        genres: Set(serialize_genres(&form.genres)),
        image_link: Set(form.image_link),
        facebook_link: Set(form.facebook_link),
        website_link: Set(form.website_link),
        seeking_venue: Set(form.seeking_venue),
        seeking_description: Set(form.seeking_description),
        created_date: Set(Utc::now()),
        ..Default::default()
    };

    let model = new_artist.insert(&state.db).await.map_err(|err| {
        AppError::storage(
            err,
            format!("An error occurred. Artist {name} could not be listed."),
        )
    })?;

    Ok((StatusCode::CREATED, Json(ArtistResponse::from(model))))
}

#[instrument(skip(state), fields(id))]
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistEditContext>, AppError> {
    let model = find_artist(&state.db, id).await?;
    Ok(Json(ArtistEditContext {
        form: FormChoices::new(),
        artist: ArtistResponse::from(model),
    }))
}

/// Full replace of an artist's editable fields. The original creation date is
/// kept.
#[instrument(skip(state, form), fields(id))]
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppForm(form): AppForm<ArtistForm>,
) -> Result<Json<ArtistResponse>, AppError> {
    validate_artist_form(&form)?;

    let name = form.name.clone();
    let failed = |err: DbErr| {
        AppError::storage(
            err,
            format!("An error occurred. Artist {name} could not be updated."),
        )
    };

    let txn = state.db.begin().await?;

    let existing = find_artist(&txn, id).await?;
    let mut active: artist::ActiveModel = existing.into();
    active.name = Set(form.name);
    active.city = Set(form.city);
    active.state = Set(form.state);
    active.phone = Set(form.phone);
    active.genres = Set(serialize_genres(&form.genres));
    active.image_link = Set(form.image_link);
    active.facebook_link = Set(form.facebook_link);
    active.website_link = Set(form.website_link);
    active.seeking_venue = Set(form.seeking_venue);
    active.seeking_description = Set(form.seeking_description);

    let model = active.update(&txn).await.map_err(&failed)?;
    txn.commit().await.map_err(&failed)?;

    Ok(Json(ArtistResponse::from(model)))
}

async fn find_artist<C: ConnectionTrait>(db: &C, id: i32) -> Result<artist::Model, AppError> {
    artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Artist not found".into()))
}
