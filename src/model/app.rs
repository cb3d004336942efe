use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::service::{location::LocationResolver, sync::SyncService};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub location_resolver: Arc<LocationResolver>,
    pub sync_service: Arc<SyncService>,
}
