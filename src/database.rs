use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::config::DatabaseConfig;
use crate::entity::{artist, show, venue};

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    create_tables(&db).await?;

    Ok(db)
}

/// Create the directory tables from the entity definitions if they are missing.
///
/// Statement order matters: `show` carries foreign keys into both other tables.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stmts = [
        schema.create_table_from_entity(venue::Entity),
        schema.create_table_from_entity(artist::Entity),
        schema.create_table_from_entity(show::Entity),
    ];

    for mut stmt in stmts {
        stmt.if_not_exists();
        db.execute(builder.build(&stmt)).await?;
    }

    Ok(())
}
