//! Read-side domain queries shared by the page handlers.
//!
//! Every function is side-effect free and generic over the connection, and the
//! past/upcoming boundary is taken from the caller's evaluation instant rather
//! than stored state.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationDef, RelationTrait, Select,
};
use serde::Serialize;

use crate::entity::{artist, show, venue};
use crate::models::shared::{escape_like, format_start_time};

/// A venue's or artist's shows split on the evaluation instant.
#[derive(Debug, Serialize)]
pub struct ShowPartition<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: u64,
    pub upcoming_shows_count: u64,
}

/// A show as listed on a venue page: the artist side, flattened.
#[derive(Debug, Serialize)]
pub struct VenueShowEntry {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

/// A show as listed on an artist page: the venue side, flattened.
#[derive(Debug, Serialize)]
pub struct ArtistShowEntry {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

#[derive(FromQueryResult)]
struct CounterpartRow {
    counterpart_id: i32,
    counterpart_name: String,
    counterpart_image_link: String,
    start_time: DateTime<Utc>,
}

impl From<CounterpartRow> for VenueShowEntry {
    fn from(row: CounterpartRow) -> Self {
        Self {
            artist_id: row.counterpart_id,
            artist_name: row.counterpart_name,
            artist_image_link: row.counterpart_image_link,
            start_time: format_start_time(row.start_time),
        }
    }
}

impl From<CounterpartRow> for ArtistShowEntry {
    fn from(row: CounterpartRow) -> Self {
        Self {
            venue_id: row.counterpart_id,
            venue_name: row.counterpart_name,
            venue_image_link: row.counterpart_image_link,
            start_time: format_start_time(row.start_time),
        }
    }
}

/// Partition a venue's shows into past and upcoming, joined to the artists.
pub async fn venue_shows<C: ConnectionTrait>(
    db: &C,
    venue_id: i32,
    now: DateTime<Utc>,
) -> Result<ShowPartition<VenueShowEntry>, DbErr> {
    partition_shows(
        db,
        show::Column::VenueId,
        venue_id,
        show::Relation::Artist.def(),
        Expr::col((artist::Entity, artist::Column::Id)).into(),
        Expr::col((artist::Entity, artist::Column::Name)).into(),
        Expr::col((artist::Entity, artist::Column::ImageLink)).into(),
        now,
    )
    .await
}

/// Partition an artist's shows into past and upcoming, joined to the venues.
pub async fn artist_shows<C: ConnectionTrait>(
    db: &C,
    artist_id: i32,
    now: DateTime<Utc>,
) -> Result<ShowPartition<ArtistShowEntry>, DbErr> {
    partition_shows(
        db,
        show::Column::ArtistId,
        artist_id,
        show::Relation::Venue.def(),
        Expr::col((venue::Entity, venue::Column::Id)).into(),
        Expr::col((venue::Entity, venue::Column::Name)).into(),
        Expr::col((venue::Entity, venue::Column::ImageLink)).into(),
        now,
    )
    .await
}

#[allow(clippy::too_many_arguments)]
async fn partition_shows<C, T>(
    db: &C,
    own_column: show::Column,
    own_id: i32,
    counterpart: RelationDef,
    id_expr: SimpleExpr,
    name_expr: SimpleExpr,
    image_expr: SimpleExpr,
    now: DateTime<Utc>,
) -> Result<ShowPartition<T>, DbErr>
where
    C: ConnectionTrait,
    T: From<CounterpartRow>,
{
    let base = counterpart_select(own_column, own_id, counterpart, id_expr, name_expr, image_expr);

    let upcoming = base
        .clone()
        .filter(show::Column::StartTime.gt(now))
        .into_model::<CounterpartRow>()
        .all(db)
        .await?;
    let past = base
        .filter(show::Column::StartTime.lte(now))
        .into_model::<CounterpartRow>()
        .all(db)
        .await?;

    // Counted independently of the fetched sequences; the invariant that they
    // agree is checked by the test suite.
    let upcoming_shows_count = show_count(db, own_column, own_id, Boundary::Upcoming, now).await?;
    let past_shows_count = show_count(db, own_column, own_id, Boundary::Past, now).await?;

    Ok(ShowPartition {
        past_shows: past.into_iter().map(T::from).collect(),
        upcoming_shows: upcoming.into_iter().map(T::from).collect(),
        past_shows_count,
        upcoming_shows_count,
    })
}

fn counterpart_select(
    own_column: show::Column,
    own_id: i32,
    counterpart: RelationDef,
    id_expr: SimpleExpr,
    name_expr: SimpleExpr,
    image_expr: SimpleExpr,
) -> Select<show::Entity> {
    show::Entity::find()
        .filter(own_column.eq(own_id))
        .join(JoinType::InnerJoin, counterpart)
        .select_only()
        .column(show::Column::StartTime)
        .column_as(id_expr, "counterpart_id")
        .column_as(name_expr, "counterpart_name")
        .column_as(image_expr, "counterpart_image_link")
}

#[derive(Copy, Clone)]
enum Boundary {
    Past,
    Upcoming,
}

async fn show_count<C: ConnectionTrait>(
    db: &C,
    own_column: show::Column,
    own_id: i32,
    boundary: Boundary,
    now: DateTime<Utc>,
) -> Result<u64, DbErr> {
    let select = show::Entity::find().filter(own_column.eq(own_id));
    let select = match boundary {
        Boundary::Upcoming => select.filter(show::Column::StartTime.gt(now)),
        Boundary::Past => select.filter(show::Column::StartTime.lte(now)),
    };
    select.count(db).await
}

/// Upcoming-show count for one venue.
pub async fn venue_upcoming_count<C: ConnectionTrait>(
    db: &C,
    venue_id: i32,
    now: DateTime<Utc>,
) -> Result<u64, DbErr> {
    show_count(db, show::Column::VenueId, venue_id, Boundary::Upcoming, now).await
}

/// Upcoming-show count for one artist.
pub async fn artist_upcoming_count<C: ConnectionTrait>(
    db: &C,
    artist_id: i32,
    now: DateTime<Utc>,
) -> Result<u64, DbErr> {
    show_count(db, show::Column::ArtistId, artist_id, Boundary::Upcoming, now).await
}

/// A listing row shared by the search results and the grouped venue page.
#[derive(Debug, Serialize)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

/// Venues bucketed under one (city, state) pair.
#[derive(Debug, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// Group all venues by (city, state).
///
/// Buckets appear in first-seen order over the id-ordered fetch; callers
/// observe this ordering, so it is part of the contract.
pub async fn group_venues_by_location<C: ConnectionTrait>(
    db: &C,
    now: DateTime<Utc>,
) -> Result<Vec<CityGroup>, DbErr> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;

    let mut groups: Vec<CityGroup> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for v in venues {
        let num_upcoming_shows = venue_upcoming_count(db, v.id, now).await?;
        let summary = EntitySummary {
            id: v.id,
            name: v.name,
            num_upcoming_shows,
        };
        match index.entry((v.city.clone(), v.state.clone())) {
            Entry::Occupied(slot) => groups[*slot.get()].venues.push(summary),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(CityGroup {
                    city: v.city,
                    state: v.state,
                    venues: vec![summary],
                });
            }
        }
    }

    Ok(groups)
}

/// Case-insensitive substring search over venue names. An empty term matches
/// every venue.
pub async fn search_venues<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, DbErr> {
    let rows = venue::Entity::find()
        .filter(name_like(venue::Column::Name, term))
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;

    let mut data = Vec::with_capacity(rows.len());
    for v in rows {
        let num_upcoming_shows = venue_upcoming_count(db, v.id, now).await?;
        data.push(EntitySummary {
            id: v.id,
            name: v.name,
            num_upcoming_shows,
        });
    }

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

/// Case-insensitive substring search over artist names.
pub async fn search_artists<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, DbErr> {
    let rows = artist::Entity::find()
        .filter(name_like(artist::Column::Name, term))
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?;

    let mut data = Vec::with_capacity(rows.len());
    for a in rows {
        let num_upcoming_shows = artist_upcoming_count(db, a.id, now).await?;
        data.push(EntitySummary {
            id: a.id,
            name: a.name,
            num_upcoming_shows,
        });
    }

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

fn name_like(column: impl ColumnTrait, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(term).to_lowercase());
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(pattern).escape('\\'))
}

/// A lightweight id/name row for the flat artist listing.
#[derive(Debug, Serialize, FromQueryResult)]
pub struct IdName {
    pub id: i32,
    pub name: String,
}

pub async fn list_artists<C: ConnectionTrait>(db: &C) -> Result<Vec<IdName>, DbErr> {
    artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .into_model::<IdName>()
        .all(db)
        .await
}

/// One row of the flat show listing, joined to both sides for display.
#[derive(Debug, Serialize)]
pub struct ShowListItem {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

#[derive(FromQueryResult)]
struct ShowListRow {
    venue_id: i32,
    venue_name: String,
    artist_id: i32,
    artist_name: String,
    artist_image_link: String,
    start_time: DateTime<Utc>,
}

pub async fn list_shows<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListItem>, DbErr> {
    let rows = show::Entity::find()
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .select_only()
        .column(show::Column::VenueId)
        .column(show::Column::ArtistId)
        .column(show::Column::StartTime)
        .column_as(
            SimpleExpr::from(Expr::col((venue::Entity, venue::Column::Name))),
            "venue_name",
        )
        .column_as(
            SimpleExpr::from(Expr::col((artist::Entity, artist::Column::Name))),
            "artist_name",
        )
        .column_as(
            SimpleExpr::from(Expr::col((artist::Entity, artist::Column::ImageLink))),
            "artist_image_link",
        )
        .order_by_asc(show::Column::Id)
        .into_model::<ShowListRow>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| ShowListItem {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: format_start_time(row.start_time),
        })
        .collect())
}
