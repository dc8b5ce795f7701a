use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::site::home))
        .nest("/venues", venue_routes())
        .nest("/artists", artist_routes())
        .nest("/shows", show_routes())
}

fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::venue::list_venues))
        .route("/search", post(handlers::venue::search_venues))
        .route(
            "/create",
            get(handlers::venue::create_venue_form).post(handlers::venue::create_venue_submission),
        )
        .route(
            "/{id}",
            get(handlers::venue::show_venue).delete(handlers::venue::delete_venue),
        )
        .route(
            "/{id}/edit",
            get(handlers::venue::edit_venue).post(handlers::venue::edit_venue_submission),
        )
}

fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::artist::list_artists))
        .route("/search", post(handlers::artist::search_artists))
        .route(
            "/create",
            get(handlers::artist::create_artist_form)
                .post(handlers::artist::create_artist_submission),
        )
        .route("/{id}", get(handlers::artist::show_artist))
        .route(
            "/{id}/edit",
            get(handlers::artist::edit_artist).post(handlers::artist::edit_artist_submission),
        )
}

fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::show::list_shows))
        .route(
            "/create",
            get(handlers::show::create_show_form).post(handlers::show::create_show_submission),
        )
}
