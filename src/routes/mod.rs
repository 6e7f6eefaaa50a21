pub mod health;
pub mod itinerary;
pub mod persona;
