pub mod car;
pub mod reservation;
pub mod user;
