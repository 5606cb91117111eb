//! Shared application state.

use std::sync::Arc;

use shareit_core::Clock;
use shareit_db::Database;

use crate::services::booking_service::BookingService;
use crate::services::item_service::ItemService;

/// State handed to every handler.
///
/// Cheap to clone: the pool and the clock are shared.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: Database, clock: Arc<dyn Clock>) -> Self {
        AppState { db, clock }
    }

    /// The booking engine.
    pub fn bookings(&self) -> BookingService {
        BookingService::new(self.db.clone(), self.clock.clone())
    }

    /// Item views with last/next booking.
    pub fn items(&self) -> ItemService {
        ItemService::new(self.db.clone(), self.clock.clone())
    }
}
