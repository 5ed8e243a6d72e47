//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! DDD: Domain layer has NO external dependencies (except error types).
//! Contains: Entities, Value Objects.

pub mod date_range;
pub mod reservation;
pub mod room;

use chrono::{DateTime, Duration, SubsecRound, Utc};

pub use date_range::DateRange;
pub use reservation::{RecordState, Reservation, ReservationStatus};
pub use room::Room;

/// Current time at the resolution Postgres stores (microseconds).
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation, strictly after `previous`.
///
/// Postgres keeps microseconds, so the step is at least one microsecond.
pub(crate) fn next_update(previous: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::microseconds(1);
    now().max(floor)
}
