pub mod car;
pub mod reservation;
pub mod seed;
pub mod user;
