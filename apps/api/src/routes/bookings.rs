//! Booking endpoints.
//!
//! ```text
//! POST   /bookings                    create (WAITING)
//! GET    /bookings?state&from&size    list as booker
//! GET    /bookings/owner?…            list as item owner
//! GET    /bookings/{id}               get (booker or owner)
//! PATCH  /bookings/{id}?approved=     approve / reject (owner)
//! PATCH  /bookings/{id}/cancel        cancel (booker)
//! ```

use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use shareit_core::{BookingView, NewBooking};

use crate::error::ApiResult;
use crate::extract::{ActingUser, AppJson, AppPath, AppQuery};
use crate::state::AppState;

/// `?approved=true|false`
#[derive(Debug, Deserialize)]
pub struct ApprovalQuery {
    pub approved: bool,
}

/// `?state=&from=&size=`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

pub fn build_booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_for_booker).post(create_booking))
        .route("/bookings/owner", get(list_for_owner))
        .route("/bookings/{booking_id}", get(get_booking).patch(approve_booking))
        .route("/bookings/{booking_id}/cancel", patch(cancel_booking))
}

pub async fn create_booking(
    user: ActingUser,
    State(state): State<AppState>,
    AppJson(request): AppJson<NewBooking>,
) -> ApiResult<Json<BookingView>> {
    let booking = state.bookings().create(user.id(), request).await?;

    Ok(Json(booking))
}

pub async fn approve_booking(
    user: ActingUser,
    State(state): State<AppState>,
    AppPath(booking_id): AppPath<i64>,
    AppQuery(query): AppQuery<ApprovalQuery>,
) -> ApiResult<Json<BookingView>> {
    let booking = state
        .bookings()
        .approve(booking_id, query.approved, user.id())
        .await?;

    Ok(Json(booking))
}

pub async fn cancel_booking(
    user: ActingUser,
    State(state): State<AppState>,
    AppPath(booking_id): AppPath<i64>,
) -> ApiResult<Json<BookingView>> {
    let booking = state.bookings().cancel(booking_id, user.id()).await?;

    Ok(Json(booking))
}

pub async fn get_booking(
    user: ActingUser,
    State(state): State<AppState>,
    AppPath(booking_id): AppPath<i64>,
) -> ApiResult<Json<BookingView>> {
    let booking = state.bookings().get(booking_id, user.id()).await?;

    Ok(Json(booking))
}

pub async fn list_for_booker(
    user: ActingUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> ApiResult<Json<Vec<BookingView>>> {
    let bookings = state
        .bookings()
        .list_for_booker(user.id(), query.state.as_deref(), query.from, query.size)
        .await?;

    Ok(Json(bookings))
}

pub async fn list_for_owner(
    user: ActingUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> ApiResult<Json<Vec<BookingView>>> {
    let bookings = state
        .bookings()
        .list_for_owner(user.id(), query.state.as_deref(), query.from, query.size)
        .await?;

    Ok(Json(bookings))
}
