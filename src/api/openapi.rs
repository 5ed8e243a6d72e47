//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{reservation_handler, room_handler};
use crate::domain::{Reservation, Room};
use crate::types::MessageResponse;

/// OpenAPI documentation for the booking API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Booking API",
        version = "0.1.0",
        description = "Rooms and reservations with date-range availability",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // Room endpoints
        room_handler::add_room,
        room_handler::find_rooms,
        room_handler::find_available_rooms,
        room_handler::get_room,
        room_handler::check_room_availability,
        room_handler::update_room,
        // Reservation endpoints
        reservation_handler::add_reservation,
        reservation_handler::delete_reservation,
        reservation_handler::find_reservations,
        reservation_handler::find_reservations_by_room,
        reservation_handler::get_reservation,
        reservation_handler::update_reservation,
    ),
    components(
        schemas(
            // Domain types
            Room,
            Reservation,
            MessageResponse,
            // Room handler types
            room_handler::RoomRequest,
            room_handler::DateRangeRequest,
            room_handler::RoomEnvelope,
            room_handler::RoomsEnvelope,
            room_handler::AvailabilityResponse,
            // Reservation handler types
            reservation_handler::CreateReservationRequest,
            reservation_handler::UpdateReservationRequest,
            reservation_handler::ReservationEnvelope,
            reservation_handler::ReservationsEnvelope,
            reservation_handler::RoomReservationsEnvelope,
        )
    ),
    tags(
        (name = "Rooms", description = "Rooms and availability"),
        (name = "Reservations", description = "Reservation management")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/rooms",
            "/api/v1/rooms/add",
            "/api/v1/rooms/find-available",
            "/api/v1/rooms/{room_id}",
            "/api/v1/rooms/{room_id}/availability-check",
            "/api/v1/reservations",
            "/api/v1/reservations/add",
            "/api/v1/reservations/find/{room_id}",
            "/api/v1/reservations/{reservation_id}",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }
}
