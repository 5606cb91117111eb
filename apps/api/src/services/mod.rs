//! Service layer.
//!
//! Services orchestrate the pure rules of `shareit-core` over the
//! repositories of `shareit-db`. Handlers stay thin: extract, call one
//! service method, wrap the result in JSON.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────────────┐
//! │  routes/*    │────►│  BookingService  │────►│  users / items /     │
//! │  (axum)      │     │  ItemService     │     │  bookings repos      │
//! └──────────────┘     └────────┬─────────┘     └──────────────────────┘
//!                               │
//!                      validation, lifecycle,
//!                      facets, projection
//! ```
//!
//! Every service method returns [`DbResult`](shareit_db::DbResult): booking
//! rule failures travel as `DbError::Domain`.

pub mod booking_service;
pub mod item_service;
