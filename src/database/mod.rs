pub mod locations;
pub mod manager;
pub mod models;
pub mod pets;

pub use locations::LocationStore;
pub use manager::{DatabaseError, DatabaseManager};
pub use pets::PetStore;
