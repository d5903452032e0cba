pub mod cars;
pub mod reservations;
pub mod users;
