use axum::Json;
use axum::extract::State;
use sea_orm::{EntityTrait, PaginatorTrait};
use tracing::instrument;

use crate::entity::{artist, show, venue};
use crate::error::AppError;
use crate::models::shared::LandingPage;
use crate::state::AppState;

/// View model for the landing page: directory-wide counts.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<LandingPage>, AppError> {
    let venues = venue::Entity::find().count(&state.db).await?;
    let artists = artist::Entity::find().count(&state.db).await?;
    let shows = show::Entity::find().count(&state.db).await?;

    Ok(Json(LandingPage {
        venues,
        artists,
        shows,
    }))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".into())
}
