use std::time::Duration;

use crate::{
    config::Config,
    error::Error,
    feed::{FeedClient, FeedClientConfig},
};

/// Build and configure the upstream feed client with the provided credentials
pub fn build_feed_client(config: &Config) -> Result<FeedClient, Error> {
    let feed_client = FeedClient::new(FeedClientConfig {
        base_url: config.feed_base_url.clone(),
        api_key: config.feed_api_key.clone(),
        api_secret: config.feed_api_secret.clone(),
        bearer_token: config.feed_bearer_token.clone(),
        timeout: Duration::from_secs(30),
    })?;

    Ok(feed_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run database migrations.");

    Ok(db)
}
