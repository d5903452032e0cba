pub mod date_range;
pub mod identity;
pub mod reservation_status;
