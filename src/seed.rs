use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set};
use tracing::info;

use crate::entity::{artist, show, venue};
use crate::models::shared::serialize_genres;

/// Seed the demo directory dataset. Runs only against an empty directory, so
/// repeated startups are no-ops.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if venue::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let now = Utc::now();

    let musical_hop = venue::ActiveModel {
        name: Set("The Musical Hop".into()),
        city: Set("San Francisco".into()),
        state: Set("CA".into()),
        address: Set("1015 Folsom Street".into()),
        phone: Set("123-123-1234".into()),
        genres: Set(genre_blob(&["Jazz", "Reggae", "Swing", "Classical", "Folk"])),
        image_link: Set("https://images.unsplash.com/photo-1543900694-133f37abaaa5".into()),
        facebook_link: Set("https://www.facebook.com/TheMusicalHop".into()),
        website_link: Set("https://www.themusicalhop.com".into()),
        seeking_talent: Set(true),
        seeking_description: Set(
            "We are on the lookout for a local artist to play every two weeks. Please call us."
                .into(),
        ),
        created_date: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let dueling_pianos = venue::ActiveModel {
        name: Set("The Dueling Pianos Bar".into()),
        city: Set("New York".into()),
        state: Set("NY".into()),
        address: Set("335 Delancey Street".into()),
        phone: Set("914-003-1132".into()),
        genres: Set(genre_blob(&["Classical", "R&B", "Hip-Hop"])),
        image_link: Set("https://images.unsplash.com/photo-1497032205916-ac775f0649ae".into()),
        facebook_link: Set("https://www.facebook.com/theduelingpianos".into()),
        website_link: Set("https://www.theduelingpianos.com".into()),
        seeking_talent: Set(false),
        seeking_description: Set(String::new()),
        created_date: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let park_square = venue::ActiveModel {
        name: Set("Park Square Live Music & Coffee".into()),
        city: Set("San Francisco".into()),
        state: Set("CA".into()),
        address: Set("34 Whiskey Moore Ave".into()),
        phone: Set("415-000-1234".into()),
        genres: Set(genre_blob(&["Rock n Roll", "Jazz", "Classical", "Folk"])),
        image_link: Set("https://images.unsplash.com/photo-1485686531765-ba63b07845a7".into()),
        facebook_link: Set("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".into()),
        website_link: Set("https://www.parksquarelivemusicandcoffee.com".into()),
        seeking_talent: Set(false),
        seeking_description: Set(String::new()),
        created_date: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let guns_n_petals = artist::ActiveModel {
        name: Set("Guns N Petals".into()),
        city: Set("San Francisco".into()),
        state: Set("CA".into()),
        phone: Set("326-123-5000".into()),
        genres: Set(genre_blob(&["Rock n Roll"])),
        image_link: Set("https://images.unsplash.com/photo-1549213783-8284d0336c4f".into()),
        facebook_link: Set("https://www.facebook.com/GunsNPetals".into()),
        website_link: Set("https://www.gunsnpetalsband.com".into()),
        seeking_venue: Set(true),
        seeking_description: Set(
            "Looking for shows to perform at in the San Francisco Bay Area!".into(),
        ),
        created_date: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let matt_quevedo = artist::ActiveModel {
        name: Set("Matt Quevedo".into()),
        city: Set("New York".into()),
        state: Set("NY".into()),
        phone: Set("300-400-5000".into()),
        genres: Set(genre_blob(&["Jazz"])),
        image_link: Set("https://images.unsplash.com/photo-1495223153807-b916f75de8c5".into()),
        facebook_link: Set("https://www.facebook.com/mattquevedo923251523".into()),
        website_link: Set(String::new()),
        seeking_venue: Set(false),
        seeking_description: Set(String::new()),
        created_date: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let wild_sax_band = artist::ActiveModel {
        name: Set("The Wild Sax Band".into()),
        city: Set("San Francisco".into()),
        state: Set("CA".into()),
        phone: Set("432-325-5432".into()),
        genres: Set(genre_blob(&["Jazz", "Classical"])),
        image_link: Set("https://images.unsplash.com/photo-1558369981-f9ca78462e61".into()),
        facebook_link: Set(String::new()),
        website_link: Set(String::new()),
        seeking_venue: Set(false),
        seeking_description: Set(String::new()),
        created_date: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // Two shows already played, three still ahead, so both sides of the
    // past/upcoming split are populated out of the box.
    let bookings = [
        (guns_n_petals.id, musical_hop.id, now - Duration::days(420)),
        (matt_quevedo.id, park_square.id, now - Duration::days(60)),
        (wild_sax_band.id, park_square.id, now + Duration::days(30)),
        (wild_sax_band.id, park_square.id, now + Duration::days(37)),
        (wild_sax_band.id, park_square.id, now + Duration::days(44)),
    ];

    for (artist_id, venue_id, start_time) in bookings {
        show::ActiveModel {
            artist_id: Set(artist_id),
            venue_id: Set(venue_id),
            start_time: Set(start_time),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    info!("Seeded demo data: 3 venues, 3 artists, 5 shows");
    Ok(())
}

fn genre_blob(genres: &[&str]) -> String {
    let owned: Vec<String> = genres.iter().map(|g| g.to_string()).collect();
    serialize_genres(&owned)
}
