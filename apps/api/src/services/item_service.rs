//! Item views with last/next booking summaries.
//!
//! The summaries are derived on every read from the bookings visible to
//! the viewer. A viewer who does not own the item sees none, so both
//! summaries come back empty.

use std::collections::HashMap;
use std::sync::Arc;

use shareit_core::validation::validate_page_params;
use shareit_core::{project, BookingView, Clock, CoreError, ItemView};
use shareit_db::{Database, DbResult};

use crate::services::booking_service::BookingService;

#[derive(Debug, Clone)]
pub struct ItemService {
    db: Database,
    clock: Arc<dyn Clock>,
}

impl ItemService {
    pub fn new(db: Database, clock: Arc<dyn Clock>) -> Self {
        ItemService { db, clock }
    }

    /// One item as seen by `viewer_id`.
    pub async fn get_item(&self, item_id: i64, viewer_id: i64) -> DbResult<ItemView> {
        let item = self
            .db
            .items()
            .get_by_id(item_id)
            .await?
            .ok_or(CoreError::ItemNotFound(item_id))?;

        let bookings = BookingService::new(self.db.clone(), self.clock.clone())
            .list_by_item(item_id, viewer_id)
            .await?;

        let availability = project(&bookings, self.clock.now());

        Ok(ItemView::from_parts(item, availability))
    }

    /// Items owned by `owner_id`, ordered by id.
    pub async fn list_owner_items(
        &self,
        owner_id: i64,
        from: Option<i64>,
        size: Option<i64>,
    ) -> DbResult<Vec<ItemView>> {
        let page = validate_page_params(from, size)?;

        self.db
            .users()
            .get_by_id(owner_id)
            .await?
            .ok_or(CoreError::UserNotFound(owner_id))?;

        let items = self.db.items().list_by_owner(owner_id, page).await?;

        let now = self.clock.now();

        // One query for the bookings on this page's items, grouped per item.
        let item_ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        let mut by_item: HashMap<i64, Vec<BookingView>> = HashMap::new();
        for booking in self
            .db
            .bookings()
            .find_by_items_for_owner(&item_ids, owner_id)
            .await?
        {
            by_item
                .entry(booking.item.id)
                .or_default()
                .push(booking.into());
        }

        let views = items
            .into_iter()
            .map(|item| {
                let availability = by_item
                    .get(&item.id)
                    .map(|bookings| project(bookings, now))
                    .unwrap_or_default();
                ItemView::from_parts(item, availability)
            })
            .collect();

        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};
    use shareit_core::{FixedClock, NewBooking};
    use shareit_db::repository::item::NewItem;
    use shareit_db::{DbConfig, DbError};

    fn item(name: &str, available: bool) -> NewItem {
        NewItem {
            name: name.to_string(),
            description: String::new(),
            available,
        }
    }

    #[tokio::test]
    async fn test_last_and_next_booking() {
        let now: NaiveDateTime = "2030-01-15T12:00:00".parse().unwrap();
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let owner = db.users().insert("Owner", "owner@example.com").await.unwrap();
        let renter = db.users().insert("Renter", "renter@example.com").await.unwrap();
        let drill = db.items().insert(owner.id, &item("Drill", true)).await.unwrap();
        db.items().insert(owner.id, &item("Ladder", false)).await.unwrap();

        // Bookings are created while the clock still reads ten days earlier.
        let earlier = Arc::new(FixedClock::new(now - Duration::days(10)));
        let bookings = BookingService::new(db.clone(), earlier);
        let past = bookings
            .create(
                renter.id,
                NewBooking {
                    item_id: drill.id,
                    start: Some(now - Duration::days(2)),
                    end: Some(now - Duration::days(1)),
                },
            )
            .await
            .unwrap();
        let future = bookings
            .create(
                renter.id,
                NewBooking {
                    item_id: drill.id,
                    start: Some(now + Duration::days(3)),
                    end: Some(now + Duration::days(4)),
                },
            )
            .await
            .unwrap();

        let service = ItemService::new(db, Arc::new(FixedClock::new(now)));

        let view = service.get_item(drill.id, owner.id).await.unwrap();
        assert_eq!(view.last_booking.map(|b| b.id), Some(past.id));
        assert_eq!(view.next_booking.map(|b| b.id), Some(future.id));

        let view = service.get_item(drill.id, renter.id).await.unwrap();
        assert!(view.last_booking.is_none());
        assert!(view.next_booking.is_none());

        let views = service.list_owner_items(owner.id, None, None).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].next_booking.as_ref().map(|b| b.id), Some(future.id));
        assert!(views[1].last_booking.is_none());
        assert!(!views[1].available);

        let page = service
            .list_owner_items(owner.id, Some(1), Some(1))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Ladder");

        let page = service
            .list_owner_items(owner.id, Some(0), Some(1))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].last_booking.as_ref().map(|b| b.id), Some(past.id));
        assert_eq!(page[0].next_booking.as_ref().map(|b| b.id), Some(future.id));
    }

    #[tokio::test]
    async fn test_missing_item_and_owner() {
        let now: NaiveDateTime = "2030-01-15T12:00:00".parse().unwrap();
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = ItemService::new(db, Arc::new(FixedClock::new(now)));

        let err = service.get_item(5, 1).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::ItemNotFound(5))));

        let err = service.list_owner_items(1, None, None).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::UserNotFound(1))));

        let err = service.list_owner_items(1, Some(0), Some(0)).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }
}
