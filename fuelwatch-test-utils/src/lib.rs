pub mod constant;
pub mod error;
pub mod fixture;
pub mod setup;

pub use error::TestError;
pub use setup::TestSetup;
