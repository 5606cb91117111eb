//! HTTP routes.
//!
//! Every endpoint except `/health` requires the `X-Sharer-User-Id` header.

pub mod bookings;
pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// All routes, not yet bound to state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::build_health_routes())
        .merge(bookings::build_booking_routes())
        .merge(items::build_item_routes())
}
