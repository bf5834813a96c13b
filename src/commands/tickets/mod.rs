pub mod setup;
pub mod open;
pub mod claim;
pub mod close;
