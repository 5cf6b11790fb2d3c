pub mod analytics;
pub mod db;
pub mod errors;
pub mod logging;

pub use db::Store;
pub use db::models::LoggedSet;
pub use errors::{LiftlogError, Result, ValidationError};
