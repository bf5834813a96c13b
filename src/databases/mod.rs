
pub mod database;
pub mod wrappers;

pub use database::{Store, StoreError};
pub use wrappers::*;
