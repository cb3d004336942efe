use sea_orm::entity::prelude::*;

/// Representative coordinate for a postcode area.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "postcode_location")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub postcode: String,
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<String>,
    pub manual_override: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
