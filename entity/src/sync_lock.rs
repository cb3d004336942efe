use sea_orm::entity::prelude::*;

/// Backing row for the cross-instance sync lock. At most one row per lock key;
/// holding the row is holding the lock.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sync_lock")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub lock_key: String,
    pub holder: String,
    pub acquired_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
