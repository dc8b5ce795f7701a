use serde_json::json;

use crate::common::{TestApp, future_timestamp, past_timestamp, routes};

mod artist_creation {
    use sea_orm::{EntityTrait, PaginatorTrait};

    use super::*;

    #[tokio::test]
    async fn creating_an_artist_returns_the_new_record() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::ARTISTS_CREATE,
                &[
                    ("name", "Guns N Petals"),
                    ("city", "San Francisco"),
                    ("state", "CA"),
                    ("phone", "326-123-5000"),
                    ("genres", "Rock n Roll"),
                    ("facebook_link", "https://www.facebook.com/GunsNPetals"),
                    ("seeking_venue", "y"),
                    ("seeking_description", "Looking for shows."),
                ],
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Guns N Petals");
        assert_eq!(res.body["genres"], json!(["Rock n Roll"]));
        assert_eq!(res.body["seeking_venue"], true);
    }

    #[tokio::test]
    async fn a_wellformed_url_on_the_wrong_host_fails_the_facebook_check() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::ARTISTS_CREATE,
                &[
                    ("name", "Guns N Petals"),
                    ("city", "San Francisco"),
                    ("state", "CA"),
                    ("genres", "Rock n Roll"),
                    ("facebook_link", "https://twitter.com/x"),
                ],
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        // The URL itself is well-formed, so only the host pattern fails.
        assert_eq!(
            res.messages_for("facebook_link"),
            ["Invalid facebook URL format."]
        );

        let persisted = encore::entity::artist::Entity::find()
            .count(&app.db)
            .await
            .expect("count artists");
        assert_eq!(persisted, 0);
    }
}

mod artist_listing {
    use super::*;

    #[tokio::test]
    async fn the_listing_is_flat_and_id_ordered() {
        let app = TestApp::spawn().await;
        let first = app.create_artist("Guns N Petals", "San Francisco", "CA").await;
        let second = app.create_artist("Matt Quevedo", "New York", "NY").await;

        let res = app.get(routes::ARTISTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.body,
            json!([
                {"id": first, "name": "Guns N Petals"},
                {"id": second, "name": "Matt Quevedo"},
            ])
        );
    }
}

mod artist_search {
    use super::*;

    #[tokio::test]
    async fn search_matches_substrings_case_insensitively() {
        let app = TestApp::spawn().await;
        app.create_artist("Guns N Petals", "San Francisco", "CA").await;
        app.create_artist("Matt Quevedo", "New York", "NY").await;
        app.create_artist("The Wild Sax Band", "San Francisco", "CA").await;

        let res = app
            .post_form(routes::ARTISTS_SEARCH, &[("search_term", "BAND")])
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["count"], 1);
        assert_eq!(res.body["data"][0]["name"], "The Wild Sax Band");

        let res = app
            .post_form(routes::ARTISTS_SEARCH, &[("search_term", "")])
            .await;
        assert_eq!(res.body["count"], 3);
    }

    #[tokio::test]
    async fn search_rows_carry_the_upcoming_show_count() {
        let app = TestApp::spawn().await;
        let venue_id = app.create_venue("The Musical Hop", "San Francisco", "CA").await;
        let artist_id = app.create_artist("The Wild Sax Band", "San Francisco", "CA").await;
        app.create_show(artist_id, venue_id, &future_timestamp(30)).await;
        app.create_show(artist_id, venue_id, &past_timestamp(30)).await;

        let res = app
            .post_form(routes::ARTISTS_SEARCH, &[("search_term", "sax")])
            .await;

        assert_eq!(res.body["data"][0]["num_upcoming_shows"], 1);
    }
}

mod artist_detail {
    use super::*;

    #[tokio::test]
    async fn shows_split_strictly_into_past_and_upcoming() {
        let app = TestApp::spawn().await;
        let venue_id = app.create_venue("Park Square Live Music & Coffee", "San Francisco", "CA")
            .await;
        let artist_id = app.create_artist("The Wild Sax Band", "San Francisco", "CA").await;
        app.create_show(artist_id, venue_id, &past_timestamp(90)).await;
        app.create_show(artist_id, venue_id, &future_timestamp(30)).await;
        app.create_show(artist_id, venue_id, &future_timestamp(37)).await;

        let res = app.get(&routes::artist(artist_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["past_shows_count"], 1);
        assert_eq!(res.body["upcoming_shows_count"], 2);
        assert_eq!(res.body["past_shows"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["upcoming_shows"].as_array().unwrap().len(), 2);

        // Entries are flattened to the venue side.
        let entry = &res.body["past_shows"][0];
        assert_eq!(entry["venue_id"], venue_id);
        assert_eq!(entry["venue_name"], "Park Square Live Music & Coffee");
    }

    #[tokio::test]
    async fn a_missing_artist_is_a_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::artist(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod artist_edit {
    use super::*;

    #[tokio::test]
    async fn edit_replaces_the_editable_fields() {
        let app = TestApp::spawn().await;
        let artist_id = app.create_artist("Guns N Petals", "San Francisco", "CA").await;

        let res = app
            .post_form(
                &routes::artist_edit(artist_id),
                &[
                    ("name", "Guns N Roses Tribute"),
                    ("city", "Los Angeles"),
                    ("state", "CA"),
                    ("phone", "326-123-5000"),
                    ("genres", "Heavy Metal"),
                ],
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);

        let refetched = app.get(&routes::artist(artist_id)).await;
        assert_eq!(refetched.body["name"], "Guns N Roses Tribute");
        assert_eq!(refetched.body["city"], "Los Angeles");
        assert_eq!(refetched.body["genres"], json!(["Heavy Metal"]));
    }

    #[tokio::test]
    async fn a_rejected_edit_leaves_the_record_unchanged() {
        let app = TestApp::spawn().await;
        let artist_id = app.create_artist("Guns N Petals", "San Francisco", "CA").await;

        let res = app
            .post_form(
                &routes::artist_edit(artist_id),
                &[
                    ("name", "Renamed"),
                    ("city", "Los Angeles"),
                    ("state", "CA"),
                    ("genres", "Heavy Metal"),
                    ("facebook_link", "https://twitter.com/x"),
                ],
            )
            .await;

        assert_eq!(res.status, 400);

        let refetched = app.get(&routes::artist(artist_id)).await;
        assert_eq!(refetched.body["name"], "Guns N Petals");
        assert_eq!(refetched.body["city"], "San Francisco");
    }
}
