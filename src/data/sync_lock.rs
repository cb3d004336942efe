use chrono::{Duration, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, SqlErr};

pub struct SyncLockRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SyncLockRepository<'a, C> {
    /// Creates a new instance of [`SyncLockRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Attempts to take the named lock without blocking.
    ///
    /// The lock is a lease: a row keyed by `lock_key`. Insert succeeding
    /// means the lock is held; a unique violation means another holder has
    /// it. Rows older than `lease` are reclaimed first so a crashed holder
    /// cannot wedge the lock forever.
    pub async fn try_acquire(
        &self,
        lock_key: &str,
        holder: &str,
        lease: Duration,
    ) -> Result<bool, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::SyncLock::delete_many()
            .filter(entity::sync_lock::Column::LockKey.eq(lock_key))
            .filter(entity::sync_lock::Column::AcquiredAt.lt(now - lease))
            .exec(self.db)
            .await?;

        let row = entity::sync_lock::ActiveModel {
            lock_key: Set(lock_key.to_string()),
            holder: Set(holder.to_string()),
            acquired_at: Set(now),
        };

        match entity::prelude::SyncLock::insert(row).exec(self.db).await {
            Ok(_) => Ok(true),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(false),
                _ => Err(err),
            },
        }
    }

    /// Releases the lock if this holder still owns it.
    pub async fn release(&self, lock_key: &str, holder: &str) -> Result<(), DbErr> {
        entity::prelude::SyncLock::delete_many()
            .filter(entity::sync_lock::Column::LockKey.eq(lock_key))
            .filter(entity::sync_lock::Column::Holder.eq(holder))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DatabaseConnection;

    use fuelwatch_test_utils::{TestError, TestSetup};

    async fn setup() -> Result<DatabaseConnection, TestError> {
        let test = TestSetup::new().await?;
        test.with_tables().await?;

        Ok(test.db)
    }

    mod try_acquire_tests {
        use chrono::Duration;

        use fuelwatch_test_utils::TestError;

        use crate::data::sync_lock::{tests::setup, SyncLockRepository};

        /// Expect the first holder to win and the second attempt to lose
        #[tokio::test]
        async fn test_try_acquire_contention() -> Result<(), TestError> {
            let db = setup().await?;
            let lock_repository = SyncLockRepository::new(&db);

            let first = lock_repository
                .try_acquire("price-sync", "instance-a", Duration::minutes(10))
                .await?;
            let second = lock_repository
                .try_acquire("price-sync", "instance-b", Duration::minutes(10))
                .await?;

            assert!(first);
            assert!(!second);

            Ok(())
        }

        /// Expect a lock whose lease has expired to be reclaimable
        #[tokio::test]
        async fn test_try_acquire_reclaims_stale_lease() -> Result<(), TestError> {
            let db = setup().await?;
            let lock_repository = SyncLockRepository::new(&db);

            lock_repository
                .try_acquire("price-sync", "crashed-instance", Duration::minutes(10))
                .await?;

            // A zero-length lease makes the freshly written row already stale.
            let reclaimed = lock_repository
                .try_acquire("price-sync", "instance-b", Duration::zero())
                .await?;

            assert!(reclaimed);

            Ok(())
        }

        /// Expect release to free the lock for the next holder
        #[tokio::test]
        async fn test_release_then_reacquire() -> Result<(), TestError> {
            let db = setup().await?;
            let lock_repository = SyncLockRepository::new(&db);

            lock_repository
                .try_acquire("price-sync", "instance-a", Duration::minutes(10))
                .await?;
            lock_repository.release("price-sync", "instance-a").await?;

            let reacquired = lock_repository
                .try_acquire("price-sync", "instance-b", Duration::minutes(10))
                .await?;

            assert!(reacquired);

            Ok(())
        }

        /// Expect releasing with the wrong holder to leave the lock in place
        #[tokio::test]
        async fn test_release_wrong_holder_is_a_no_op() -> Result<(), TestError> {
            let db = setup().await?;
            let lock_repository = SyncLockRepository::new(&db);

            lock_repository
                .try_acquire("price-sync", "instance-a", Duration::minutes(10))
                .await?;
            lock_repository.release("price-sync", "instance-b").await?;

            let taken = lock_repository
                .try_acquire("price-sync", "instance-c", Duration::minutes(10))
                .await?;

            assert!(!taken);

            Ok(())
        }
    }
}
