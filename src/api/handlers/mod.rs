//! HTTP request handlers.

pub mod reservation_handler;
pub mod room_handler;

pub use reservation_handler::reservation_routes;
pub use room_handler::room_routes;
