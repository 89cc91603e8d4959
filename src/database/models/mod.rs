pub mod location;
pub mod pet;

pub use location::{Location, LocationPayload};
pub use pet::{Pet, PetPayload, PetUpdate};
