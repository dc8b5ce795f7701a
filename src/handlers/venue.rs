use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::instrument;

use crate::entity::{show, venue};
use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::models::shared::{FormChoices, SearchForm, serialize_genres};
use crate::models::venue::{
    DeleteOutcome, VenueDetail, VenueEditContext, VenueForm, VenueResponse, validate_venue_form,
};
use crate::queries;
use crate::state::AppState;

/// Venues grouped by (city, state) for the listing page.
#[instrument(skip(state))]
pub async fn list_venues(
    State(state): State<AppState>,
) -> Result<Json<Vec<queries::CityGroup>>, AppError> {
    let groups = queries::group_venues_by_location(&state.db, Utc::now()).await?;
    Ok(Json(groups))
}

#[instrument(skip(state, form), fields(term = %form.search_term))]
pub async fn search_venues(
    State(state): State<AppState>,
    AppForm(form): AppForm<SearchForm>,
) -> Result<Json<queries::SearchResults>, AppError> {
    let results = queries::search_venues(&state.db, &form.search_term, Utc::now()).await?;
    Ok(Json(results))
}

/// Venue page: the record plus its shows partitioned into past and upcoming.
#[instrument(skip(state), fields(id))]
pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>, AppError> {
    let model = find_venue(&state.db, id).await?;
    let shows = queries::venue_shows(&state.db, id, Utc::now()).await?;
    Ok(Json(VenueDetail::new(model, shows)))
}

pub async fn create_venue_form() -> Json<FormChoices> {
    Json(FormChoices::new())
}

#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn create_venue_submission(
    State(state): State<AppState>,
    AppForm(form): AppForm<VenueForm>,
) -> Result<impl IntoResponse, AppError> {
    validate_venue_form(&form)?;

    let name = form.name.clone();
    let new_venue = venue::ActiveModel {
        name: Set(form.name),
        city: Set(form.city),
        state: Set(form.state),
        address: Set(form.address),
        phone: Set(form.phone),
        genres: Set(serialize_genres(&form.genres)),
        image_link: Set(form.image_link),
        facebook_link: Set(form.facebook_link),
        website_link: Set(form.website_link),
        seeking_talent: Set(form.seeking_talent),
        seeking_description: Set(form.seeking_description),
        created_date: Set(Utc::now()),
        ..Default::default()
    };

    let model = new_venue.insert(&state.db).await.map_err(|err| {
        AppError::storage(
            err,
            format!("An error occurred. Venue {name} could not be listed."),
        )
    })?;

    Ok((StatusCode::CREATED, Json(VenueResponse::from(model))))
}

/// Delete a venue and its shows, reporting a structured outcome rather than a
/// page model.
#[instrument(skip(state), fields(id))]
pub async fn delete_venue(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match delete_venue_with_shows(&state.db, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteOutcome {
                status: 200,
                message: "Venue was successfully deleted!".into(),
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "venue delete failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteOutcome {
                    status: 500,
                    message: "An error occurred. Venue could not be deleted.".into(),
                }),
            )
        }
    }
}

async fn delete_venue_with_shows(db: &DatabaseConnection, id: i32) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    show::Entity::delete_many()
        .filter(show::Column::VenueId.eq(id))
        .exec(&txn)
        .await?;
    venue::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[instrument(skip(state), fields(id))]
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VenueEditContext>, AppError> {
    let model = find_venue(&state.db, id).await?;
    Ok(Json(VenueEditContext {
        form: FormChoices::new(),
        venue: VenueResponse::from(model),
    }))
}

/// Full replace of a venue's editable fields. The original creation date is
/// kept.
#[instrument(skip(state, form), fields(id))]
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppForm(form): AppForm<VenueForm>,
) -> Result<Json<VenueResponse>, AppError> {
    validate_venue_form(&form)?;

    let name = form.name.clone();
    let failed = |err: DbErr| {
        AppError::storage(
            err,
            format!("An error occurred. Venue {name} could not be updated."),
        )
    };

    let txn = state.db.begin().await?;

    let existing = find_venue(&txn, id).await?;
    let mut active: venue::ActiveModel = existing.into();
    active.name = Set(form.name);
    active.city = Set(form.city);
    active.state = Set(form.state);
    active.address = Set(form.address);
    active.phone = Set(form.phone);
    active.genres = Set(serialize_genres(&form.genres));
    active.image_link = Set(form.image_link);
    active.facebook_link = Set(form.facebook_link);
    active.website_link = Set(form.website_link);
    active.seeking_talent = Set(form.seeking_talent);
    active.seeking_description = Set(form.seeking_description);

    let model = active.update(&txn).await.map_err(&failed)?;
    txn.commit().await.map_err(&failed)?;

    Ok(Json(VenueResponse::from(model)))
}

async fn find_venue<C: ConnectionTrait>(db: &C, id: i32) -> Result<venue::Model, AppError> {
    venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Venue not found".into()))
}
