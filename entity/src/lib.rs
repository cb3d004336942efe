pub mod prelude;

pub mod postcode_location;
pub mod price;
pub mod price_history;
pub mod station;
pub mod sync_lock;
