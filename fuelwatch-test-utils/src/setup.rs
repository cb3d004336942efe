use mockito::{Server, ServerGuard};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

use crate::error::TestError;

/// One mock upstream server plus an in-memory database, created per test.
pub struct TestSetup {
    pub server: ServerGuard,
    pub db: DatabaseConnection,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup { server, db })
    }

    /// Creates every application table in the in-memory database.
    pub async fn with_tables(&self) -> Result<(), TestError> {
        let schema = Schema::new(self.db.get_database_backend());
        let statements = [
            schema.create_table_from_entity(entity::prelude::Station),
            schema.create_table_from_entity(entity::prelude::Price),
            schema.create_table_from_entity(entity::prelude::PriceHistory),
            schema.create_table_from_entity(entity::prelude::PostcodeLocation),
            schema.create_table_from_entity(entity::prelude::SyncLock),
        ];
        for statement in statements {
            self.db.execute(&statement).await?;
        }

        Ok(())
    }
}
