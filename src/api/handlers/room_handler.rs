//! Room handlers.

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
use crate::config::{ROOM_AVAILABLE, ROOM_NOT_AVAILABLE};
use crate::domain::{DateRange, Room};
use crate::errors::AppResult;

/// Room create / rename request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoomRequest {
    /// Display name
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    #[schema(example = "Suite 1", max_length = 255)]
    pub name: String,
}

/// Calendar range in `YYYY-MM-DD`, end exclusive
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DateRangeRequest {
    #[schema(example = "2024-01-01")]
    pub start_date: String,
    #[schema(example = "2024-01-05")]
    pub end_date: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomEnvelope {
    pub room: Room,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomsEnvelope {
    pub rooms: Vec<Room>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    #[schema(example = "room is available")]
    pub response: String,
}

/// Create room routes
pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_rooms))
        .route("/add", post(add_room))
        .route("/find-available", post(find_available_rooms))
        .route("/:room_id", get(get_room).put(update_room))
        .route("/:room_id/availability-check", post(check_room_availability))
}

/// Create a room
#[utoipa::path(
    post,
    path = "/api/v1/rooms/add",
    tag = "Rooms",
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room created", body = RoomEnvelope),
        (status = 400, description = "Invalid input"),
        (status = 500, description = "Failed to create room")
    )
)]
pub async fn add_room(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RoomRequest>,
) -> AppResult<Json<RoomEnvelope>> {
    let room = Room::new(payload.name);
    state.rooms.add(&room).await?;

    Ok(Json(RoomEnvelope { room }))
}

/// List all rooms ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    responses(
        (status = 200, description = "All rooms", body = RoomsEnvelope)
    )
)]
pub async fn find_rooms(State(state): State<AppState>) -> AppResult<Json<RoomsEnvelope>> {
    let rooms = state.rooms.find().await?;
    Ok(Json(RoomsEnvelope { rooms }))
}

/// List rooms free for the whole range
#[utoipa::path(
    post,
    path = "/api/v1/rooms/find-available",
    tag = "Rooms",
    request_body = DateRangeRequest,
    responses(
        (status = 200, description = "Available rooms", body = RoomsEnvelope),
        (status = 400, description = "Invalid date or range")
    )
)]
pub async fn find_available_rooms(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DateRangeRequest>,
) -> AppResult<Json<RoomsEnvelope>> {
    let range = DateRange::parse(&payload.start_date, &payload.end_date)?;
    let rooms = state.rooms.find_available(range).await?;

    Ok(Json(RoomsEnvelope { rooms }))
}

/// Get a room by ID
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    params(("room_id" = String, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room found", body = RoomEnvelope),
        (status = 400, description = "Invalid room id"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> AppResult<Json<RoomEnvelope>> {
    let id = parse_id(&room_id, "invalid room id")?;
    let room = state.rooms.get_by_id(id).await?;

    Ok(Json(RoomEnvelope { room }))
}

/// Check whether one room is free for the range
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{room_id}/availability-check",
    tag = "Rooms",
    params(("room_id" = String, Path, description = "Room ID")),
    request_body = DateRangeRequest,
    responses(
        (status = 200, description = "Availability answer", body = AvailabilityResponse),
        (status = 400, description = "Invalid room id, date or range")
    )
)]
pub async fn check_room_availability(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<DateRangeRequest>,
) -> AppResult<Json<AvailabilityResponse>> {
    let id = parse_id(&room_id, "Invalid room_id")?;
    let range = DateRange::parse(&payload.start_date, &payload.end_date)?;

    let response = if state.rooms.check_if_available_by_id(id, range).await? {
        ROOM_AVAILABLE
    } else {
        ROOM_NOT_AVAILABLE
    };

    Ok(Json(AvailabilityResponse {
        response: response.to_string(),
    }))
}

/// Rename a room
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    params(("room_id" = String, Path, description = "Room ID")),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room updated", body = RoomEnvelope),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<RoomRequest>,
) -> AppResult<Json<RoomEnvelope>> {
    let id = parse_id(&room_id, "invalid room id")?;

    let mut room = state.rooms.get_by_id(id).await?;
    room.rename(payload.name);
    state.rooms.update(&room).await?;

    Ok(Json(RoomEnvelope { room }))
}
