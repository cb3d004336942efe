pub use super::postcode_location::Entity as PostcodeLocation;
pub use super::price::Entity as Price;
pub use super::price_history::Entity as PriceHistory;
pub use super::station::Entity as Station;
pub use super::sync_lock::Entity as SyncLock;
