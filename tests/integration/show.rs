use sea_orm::{EntityTrait, PaginatorTrait};

use crate::common::{TestApp, future_timestamp, routes};

mod show_listing {
    use super::*;

    #[tokio::test]
    async fn the_listing_joins_venue_and_artist_display_fields() {
        let app = TestApp::spawn().await;
        let venue_id = app.create_venue("The Musical Hop", "San Francisco", "CA").await;
        let artist_id = app.create_artist("Guns N Petals", "San Francisco", "CA").await;
        let start_time = future_timestamp(30);
        app.create_show(artist_id, venue_id, &start_time).await;

        let res = app.get(routes::SHOWS).await;

        assert_eq!(res.status, 200);
        let shows = res.body.as_array().expect("show listing");
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0]["venue_id"], venue_id);
        assert_eq!(shows[0]["venue_name"], "The Musical Hop");
        assert_eq!(shows[0]["artist_id"], artist_id);
        assert_eq!(shows[0]["artist_name"], "Guns N Petals");
        assert_eq!(shows[0]["start_time"], start_time.as_str());
    }
}

mod show_creation {
    use super::*;

    #[tokio::test]
    async fn booking_a_show_returns_the_new_record() {
        let app = TestApp::spawn().await;
        let venue_id = app.create_venue("The Musical Hop", "San Francisco", "CA").await;
        let artist_id = app.create_artist("Guns N Petals", "San Francisco", "CA").await;
        let artist_field = artist_id.to_string();
        let venue_field = venue_id.to_string();

        let res = app
            .post_form(
                routes::SHOWS_CREATE,
                &[
                    ("artist_id", artist_field.as_str()),
                    ("venue_id", venue_field.as_str()),
                    ("start_time", "2035-04-01 20:00:00"),
                ],
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["artist_id"], artist_id);
        assert_eq!(res.body["venue_id"], venue_id);
        assert_eq!(res.body["start_time"], "2035-04-01 20:00:00");
    }

    #[tokio::test]
    async fn an_unparseable_start_time_is_a_field_error() {
        let app = TestApp::spawn().await;
        let venue_id = app.create_venue("The Musical Hop", "San Francisco", "CA").await;
        let artist_id = app.create_artist("Guns N Petals", "San Francisco", "CA").await;
        let artist_field = artist_id.to_string();
        let venue_field = venue_id.to_string();

        let res = app
            .post_form(
                routes::SHOWS_CREATE,
                &[
                    ("artist_id", artist_field.as_str()),
                    ("venue_id", venue_field.as_str()),
                    ("start_time", "next tuesday"),
                ],
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.messages_for("start_time"),
            ["Not a valid datetime value."]
        );
    }

    #[tokio::test]
    async fn a_missing_start_time_is_required() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::SHOWS_CREATE,
                &[("artist_id", "1"), ("venue_id", "1")],
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.messages_for("start_time"), ["This field is required."]);
    }

    /// A dangling foreign key passes field validation but fails the write; the
    /// transaction rolls back and nothing is persisted.
    #[tokio::test]
    async fn a_dangling_reference_is_a_storage_failure_with_no_row() {
        let app = TestApp::spawn().await;
        let venue_id = app.create_venue("The Musical Hop", "San Francisco", "CA").await;
        let venue_field = venue_id.to_string();

        let res = app
            .post_form(
                routes::SHOWS_CREATE,
                &[
                    ("artist_id", "4242"),
                    ("venue_id", venue_field.as_str()),
                    ("start_time", "2035-04-01 20:00:00"),
                ],
            )
            .await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "STORAGE_ERROR");
        assert_eq!(
            res.body["message"],
            "An error occurred. Show could not be listed."
        );

        let persisted = encore::entity::show::Entity::find()
            .count(&app.db)
            .await
            .expect("count shows");
        assert_eq!(persisted, 0);
    }
}

mod show_form {
    use super::*;

    #[tokio::test]
    async fn the_booking_form_suggests_a_default_start_time() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::SHOWS_CREATE).await;

        assert_eq!(res.status, 200);
        let default = res.body["start_time"].as_str().expect("default start_time");
        assert!(encore::models::shared::parse_start_time(default).is_some());
    }
}
