//! Reservation handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{parse_id, ValidatedJson};
use crate::api::AppState;
use crate::domain::{DateRange, Reservation, ReservationStatus};
use crate::errors::{AppError, AppResult};
use crate::types::MessageResponse;

/// New reservation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[schema(example = "6f1c2d1e-4b7a-4c59-9d3f-1a2b3c4d5e6f")]
    pub user_id: String,
    #[schema(example = "2024-01-01")]
    pub start_date: String,
    #[schema(example = "2024-01-05")]
    pub end_date: String,
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub room_id: String,
    /// 0 available, 1 blocked, 2 book request, 3 reservation, 4 rent
    #[serde(default)]
    #[schema(example = 3)]
    pub status: i32,
}

/// Reservation change request; omitted `status` keeps the stored one
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReservationRequest {
    #[schema(example = "2024-02-01")]
    pub start_date: String,
    #[schema(example = "2024-02-03")]
    pub end_date: String,
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub room_id: String,
    #[schema(example = 4)]
    pub status: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationEnvelope {
    pub reservation: Reservation,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationsEnvelope {
    pub reservations: Vec<Reservation>,
}

/// Reservations of one room. Clients read them under `rooms`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomReservationsEnvelope {
    pub rooms: Vec<Reservation>,
}

fn parse_status(raw: i32) -> AppResult<ReservationStatus> {
    ReservationStatus::try_from(raw).map_err(AppError::validation)
}

/// Create reservation routes
pub fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_reservations))
        .route("/add", post(add_reservation))
        .route("/find/:room_id", get(find_reservations_by_room))
        .route(
            "/:reservation_id",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
}

/// Create a reservation
///
/// Overlaps are not checked; use the room availability check first.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/add",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation created", body = ReservationEnvelope),
        (status = 400, description = "Invalid id, date, range or status"),
        (status = 500, description = "Failed to create reservation")
    )
)]
pub async fn add_reservation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateReservationRequest>,
) -> AppResult<Json<ReservationEnvelope>> {
    let user_id = parse_id(&payload.user_id, "invalid user id")?;
    let range = DateRange::parse(&payload.start_date, &payload.end_date)?;
    let room_id = parse_id(&payload.room_id, "invalid room id")?;
    let status = parse_status(payload.status)?;

    let reservation = Reservation::new(user_id, room_id, status, range);
    state.reservations.add(&reservation).await?;

    Ok(Json(ReservationEnvelope { reservation }))
}

/// Soft delete a reservation
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation deleted", body = MessageResponse),
        (status = 400, description = "Missing or invalid reservation ID")
    )
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.reservations.delete(&reservation_id).await?;

    Ok(Json(MessageResponse::new("Reservation deleted successfully")))
}

/// List live reservations, most recently updated first
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "Live reservations", body = ReservationsEnvelope)
    )
)]
pub async fn find_reservations(
    State(state): State<AppState>,
) -> AppResult<Json<ReservationsEnvelope>> {
    let reservations = state.reservations.find().await?;
    Ok(Json(ReservationsEnvelope { reservations }))
}

/// List live reservations of one room
#[utoipa::path(
    get,
    path = "/api/v1/reservations/find/{room_id}",
    tag = "Reservations",
    params(("room_id" = String, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Reservations of the room", body = RoomReservationsEnvelope),
        (status = 400, description = "Invalid room id")
    )
)]
pub async fn find_reservations_by_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> AppResult<Json<RoomReservationsEnvelope>> {
    let room_id = parse_id(&room_id, "invalid room id")?;
    let rooms = state.reservations.find_by_room_id(room_id).await?;

    Ok(Json(RoomReservationsEnvelope { rooms }))
}

/// Get a live reservation by ID
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation found", body = ReservationEnvelope),
        (status = 400, description = "Invalid reservation ID"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
) -> AppResult<Json<ReservationEnvelope>> {
    let id = parse_id(&reservation_id, "invalid reservation ID")?;
    let reservation = state.reservations.get_by_id(id).await?;

    Ok(Json(ReservationEnvelope { reservation }))
}

/// Move a reservation to other dates, room or status
#[utoipa::path(
    put,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ReservationEnvelope),
        (status = 400, description = "Invalid id, date, range or status"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateReservationRequest>,
) -> AppResult<Json<ReservationEnvelope>> {
    let id = parse_id(&reservation_id, "invalid reservation ID")?;
    let range = DateRange::parse(&payload.start_date, &payload.end_date)?;
    let room_id = parse_id(&payload.room_id, "invalid room id")?;
    let status = payload.status.map(parse_status).transpose()?;

    let mut reservation = state.reservations.get_by_id(id).await?;
    let status = status.unwrap_or(reservation.status);
    reservation.reschedule(range, room_id, status);
    state.reservations.update(&reservation).await?;

    Ok(Json(ReservationEnvelope { reservation }))
}
