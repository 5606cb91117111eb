//! # Booking Repository
//!
//! The booking store: durable booking records plus the listing queries
//! behind every state facet.
//!
//! ## Status Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  transition(id, decide)                                                │
//! │                                                                         │
//! │  BEGIN IMMEDIATE (write lock taken before the read)                    │
//! │    SELECT booking ........................ absent → BookingNotFound    │
//! │    decide(&booking) ...................... rule failed → CoreError     │
//! │    UPDATE bookings SET status = ?                                      │
//! │     WHERE id = ? AND status = 'WAITING' .. 0 rows → NotUpdatable       │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Two owners racing on one booking: the second waits for the lock,      │
//! │  then reads the decided status and fails with NotUpdatable.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use shareit_core::{
    Booking, BookingParty, BookingPeriod, BookingStatus, CoreError, CoreResult, ItemShort,
    PageRequest, StateFacet, UserShort,
};

/// Every booking read joins its item and booker for the view.
const SELECT_BOOKING: &str = "\
    SELECT \
        b.id, b.start_date, b.end_date, b.status, \
        i.id AS item_id, i.name AS item_name, i.owner_id AS item_owner_id, \
        u.id AS booker_id, u.name AS booker_name \
    FROM bookings b \
    JOIN items i ON i.id = b.item_id \
    JOIN users u ON u.id = b.booker_id";

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i64,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    status: BookingStatus,
    item_id: i64,
    item_name: String,
    item_owner_id: i64,
    booker_id: i64,
    booker_name: String,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            start: row.start_date,
            end: row.end_date,
            item: ItemShort {
                id: row.item_id,
                name: row.item_name,
            },
            item_owner_id: row.item_owner_id,
            booker: UserShort {
                id: row.booker_id,
                name: row.booker_name,
            },
            status: row.status,
        }
    }
}

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Gets a booking by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Booking>> {
        fetch_by_id(&self.pool, id).await
    }

    /// Persists a new WAITING booking and returns it with its id.
    pub async fn insert(
        &self,
        item_id: i64,
        booker_id: i64,
        period: &BookingPeriod,
    ) -> DbResult<Booking> {
        debug!(item_id = %item_id, booker_id = %booker_id, "Inserting booking");

        let result = sqlx::query(
            "INSERT INTO bookings (start_date, end_date, item_id, booker_id, status) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(period.start())
        .bind(period.end())
        .bind(item_id)
        .bind(booker_id)
        .bind(BookingStatus::Waiting)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        fetch_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| DbError::not_found("Booking", id.to_string()))
    }

    /// Moves a WAITING booking to the status chosen by `decide`.
    ///
    /// The read, the decision and the guarded write share one transaction.
    /// A booking that left WAITING between read and write fails with
    /// [`CoreError::NotUpdatable`].
    ///
    /// Opened `IMMEDIATE`: concurrent writers queue on the lock (up to the
    /// busy timeout) instead of failing with `SQLITE_BUSY` on upgrade.
    pub async fn transition<F>(&self, id: i64, decide: F) -> DbResult<Booking>
    where
        F: FnOnce(&Booking) -> CoreResult<BookingStatus>,
    {
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut booking = fetch_by_id(&mut *tx, id)
            .await?
            .ok_or(CoreError::BookingNotFound(id))?;

        let next = decide(&booking)?;

        let result = sqlx::query("UPDATE bookings SET status = ?1 WHERE id = ?2 AND status = ?3")
            .bind(next)
            .bind(id)
            .bind(BookingStatus::Waiting)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotUpdatable { booking_id: id }.into());
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(booking_id = %id, from = %booking.status, to = %next, "Booking status changed");

        booking.status = next;
        Ok(booking)
    }

    /// Lists bookings for one party, filtered by facet, newest start first.
    ///
    /// `now` is only read by the CURRENT, PAST and FUTURE facets.
    pub async fn find(
        &self,
        party: BookingParty,
        facet: StateFacet,
        now: NaiveDateTime,
        page: Option<PageRequest>,
    ) -> DbResult<Vec<Booking>> {
        debug!(?party, %facet, ?page, "Listing bookings");

        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_BOOKING);

        match party {
            BookingParty::Booker(user_id) => qb.push(" WHERE b.booker_id = ").push_bind(user_id),
            BookingParty::Owner(user_id) => qb.push(" WHERE i.owner_id = ").push_bind(user_id),
        };

        match facet {
            StateFacet::All => {}
            StateFacet::Current => {
                qb.push(" AND b.start_date < ")
                    .push_bind(now)
                    .push(" AND b.end_date > ")
                    .push_bind(now);
            }
            StateFacet::Past => {
                qb.push(" AND b.end_date < ").push_bind(now);
            }
            StateFacet::Future => {
                qb.push(" AND b.start_date > ").push_bind(now);
            }
            StateFacet::Status(status) => {
                qb.push(" AND b.status = ").push_bind(status);
            }
        }

        qb.push(" ORDER BY b.start_date DESC, b.id DESC");

        if let Some(page) = page {
            qb.push(" LIMIT ")
                .push_bind(page.limit())
                .push(" OFFSET ")
                .push_bind(page.offset());
        }

        let rows = qb.build_query_as::<BookingRow>().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    /// Bookings on `item_id` when `viewer_id` owns the item, oldest start
    /// first. Any other viewer gets an empty list.
    pub async fn find_by_item_for_owner(
        &self,
        item_id: i64,
        viewer_id: i64,
    ) -> DbResult<Vec<Booking>> {
        let sql = format!(
            "{SELECT_BOOKING} WHERE b.item_id = ?1 AND i.owner_id = ?2 \
             ORDER BY b.start_date ASC, b.id ASC"
        );

        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(item_id)
            .bind(viewer_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    /// Bookings on any of `item_ids` that `owner_id` owns, ordered by start.
    pub async fn find_by_items_for_owner(
        &self,
        item_ids: &[i64],
        owner_id: i64,
    ) -> DbResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_BOOKING);
        qb.push(" WHERE i.owner_id = ").push_bind(owner_id);
        qb.push(" AND b.item_id IN (");
        let mut ids = qb.separated(", ");
        for id in item_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");
        qb.push(" ORDER BY b.start_date ASC, b.id ASC");

        let rows = qb.build_query_as::<BookingRow>().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    /// True when an APPROVED booking on the item overlaps `[start, end)`.
    pub async fn has_approved_overlap(
        &self,
        item_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DbResult<bool> {
        let hits: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE item_id = ?1 AND status = ?2 AND start_date < ?4 AND ?3 < end_date",
        )
        .bind(item_id)
        .bind(BookingStatus::Approved)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(hits > 0)
    }

    /// Counts bookings (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn fetch_by_id<'e, E>(executor: E, id: i64) -> DbResult<Option<Booking>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SELECT_BOOKING} WHERE b.id = ?1");

    let row = sqlx::query_as::<_, BookingRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(Booking::from))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::item::NewItem;
    use crate::{Database, DbConfig};
    use chrono::Duration;
    use std::sync::Arc;
    use shareit_core::types::{BookingView, ItemSnapshot, NewBooking};
    use shareit_core::validation::{validate_booking_request, validate_page_params};

    struct Fixture {
        db: Database,
        owner: i64,
        booker: i64,
        item: i64,
    }

    fn now() -> NaiveDateTime {
        "2030-01-15T12:00:00".parse().unwrap()
    }

    async fn fixture() -> Fixture {
        fixture_with(DbConfig::in_memory()).await
    }

    async fn fixture_with(config: DbConfig) -> Fixture {
        let db = Database::new(config).await.unwrap();
        let owner = db.users().insert("Owner", "owner@example.com").await.unwrap();
        let booker = db.users().insert("Booker", "booker@example.com").await.unwrap();
        let item = db
            .items()
            .insert(
                owner.id,
                &NewItem {
                    name: "Tent".to_string(),
                    description: "Four person".to_string(),
                    available: true,
                },
            )
            .await
            .unwrap();

        Fixture {
            db,
            owner: owner.id,
            booker: booker.id,
            item: item.id,
        }
    }

    /// Validates against a "today" early enough for any test period.
    fn period(start: NaiveDateTime, end: NaiveDateTime) -> BookingPeriod {
        let item = ItemSnapshot {
            id: 1,
            owner_id: 0,
            available: true,
        };
        let request = NewBooking {
            item_id: 1,
            start: Some(start),
            end: Some(end),
        };
        let today = (now() - Duration::days(30)).date();

        validate_booking_request(-1, &item, &request, today).unwrap()
    }

    async fn book(f: &Fixture, start: NaiveDateTime, end: NaiveDateTime) -> Booking {
        f.db.bookings()
            .insert(f.item, f.booker, &period(start, end))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_starts_waiting() {
        let f = fixture().await;
        let t = now();

        let booking = book(&f, t + Duration::days(1), t + Duration::days(2)).await;

        assert_eq!(booking.status, BookingStatus::Waiting);
        assert_eq!(booking.item_owner_id, f.owner);
        assert_eq!(booking.booker.name, "Booker");
        assert_eq!(booking.item.name, "Tent");
        assert_eq!(
            f.db.bookings().get_by_id(booking.id).await.unwrap(),
            Some(booking)
        );
    }

    #[tokio::test]
    async fn test_transition_applies_once() {
        let f = fixture().await;
        let t = now();
        let booking = book(&f, t + Duration::days(1), t + Duration::days(2)).await;
        let owner = f.owner;

        let approved = f
            .db
            .bookings()
            .transition(booking.id, |b| b.decide(owner, true))
            .await
            .unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);

        let err = f
            .db
            .bookings()
            .transition(booking.id, |b| b.decide(owner, true))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::NotUpdatable { .. })));
    }

    #[tokio::test]
    async fn test_status_guard_catches_stale_decision() {
        let f = fixture().await;
        let t = now();
        let booking = book(&f, t + Duration::days(1), t + Duration::days(2)).await;

        f.db.bookings()
            .transition(booking.id, |_| Ok(BookingStatus::Rejected))
            .await
            .unwrap();

        // A decision that ignores the current status still hits the guard.
        let err = f
            .db
            .bookings()
            .transition(booking.id, |_| Ok(BookingStatus::Approved))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::NotUpdatable { .. })));

        let stored = f.db.bookings().get_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Rejected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_decisions_one_wins() {
        let dir = tempfile::tempdir().unwrap();
        let f = fixture_with(DbConfig::new(dir.path().join("shareit.db"))).await;
        let t = now();
        let booking = book(&f, t + Duration::days(1), t + Duration::days(2)).await;

        let barrier = Arc::new(tokio::sync::Barrier::new(2));
        let decisions = [true, false].map(|approved| {
            let db = f.db.clone();
            let barrier = barrier.clone();
            let (id, owner) = (booking.id, f.owner);
            tokio::spawn(async move {
                barrier.wait().await;
                db.bookings()
                    .transition(id, |b| b.decide(owner, approved))
                    .await
            })
        });

        let mut won = Vec::new();
        let mut lost = 0;
        for handle in decisions {
            match handle.await.unwrap() {
                Ok(decided) => won.push(decided.status),
                Err(DbError::Domain(CoreError::NotUpdatable { booking_id })) => {
                    assert_eq!(booking_id, booking.id);
                    lost += 1;
                }
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(won.len(), 1);
        assert_eq!(lost, 1);

        let stored = f.db.bookings().get_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, won[0]);
    }

    #[tokio::test]
    async fn test_transition_missing_booking() {
        let f = fixture().await;

        let err = f
            .db
            .bookings()
            .transition(404, |_| Ok(BookingStatus::Approved))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::BookingNotFound(404))));
    }

    #[tokio::test]
    async fn test_find_by_facet() {
        let f = fixture().await;
        let t = now();

        let past = book(&f, t - Duration::days(5), t - Duration::days(4)).await;
        let current = book(&f, t - Duration::hours(1), t + Duration::hours(1)).await;
        let future = book(&f, t + Duration::days(2), t + Duration::days(3)).await;

        let repo = f.db.bookings();
        let ids = |v: Vec<Booking>| v.into_iter().map(|b| b.id).collect::<Vec<_>>();

        let all = repo
            .find(BookingParty::Booker(f.booker), StateFacet::All, t, None)
            .await
            .unwrap();
        assert_eq!(ids(all.clone()), vec![future.id, current.id, past.id]);

        for (facet, expected) in [
            (StateFacet::Past, past.id),
            (StateFacet::Current, current.id),
            (StateFacet::Future, future.id),
        ] {
            let hits = repo
                .find(BookingParty::Owner(f.owner), facet, t, None)
                .await
                .unwrap();
            assert_eq!(ids(hits.clone()), vec![expected]);

            // The SQL filter agrees with the in-memory predicate.
            let filtered: Vec<Booking> = all
                .iter()
                .filter(|b| facet.matches(&BookingView::from((*b).clone()), t))
                .cloned()
                .collect();
            assert_eq!(hits, filtered);
        }

        let waiting = repo
            .find(
                BookingParty::Booker(f.booker),
                StateFacet::Status(BookingStatus::Waiting),
                t,
                None,
            )
            .await
            .unwrap();
        assert_eq!(waiting.len(), 3);

        // The owner never shows up as a booker.
        let none = repo
            .find(BookingParty::Booker(f.owner), StateFacet::All, t, None)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_paged_keeps_ordering() {
        let f = fixture().await;
        let t = now();

        for day in 1..=5 {
            book(&f, t + Duration::days(day), t + Duration::days(day) + Duration::hours(2)).await;
        }

        let repo = f.db.bookings();
        let all = repo
            .find(BookingParty::Booker(f.booker), StateFacet::All, t, None)
            .await
            .unwrap();

        let page = validate_page_params(Some(2), Some(2)).unwrap();
        let second = repo
            .find(BookingParty::Booker(f.booker), StateFacet::All, t, page)
            .await
            .unwrap();

        assert_eq!(second, all[2..4].to_vec());
    }

    #[tokio::test]
    async fn test_item_bookings_visible_to_owner_only() {
        let f = fixture().await;
        let t = now();

        let later = book(&f, t + Duration::days(3), t + Duration::days(4)).await;
        let sooner = book(&f, t + Duration::days(1), t + Duration::days(2)).await;

        let repo = f.db.bookings();
        let owned = repo.find_by_item_for_owner(f.item, f.owner).await.unwrap();
        assert_eq!(
            owned.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![sooner.id, later.id]
        );

        assert!(repo
            .find_by_item_for_owner(f.item, f.booker)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_bookings_for_listed_items_only() {
        let f = fixture().await;
        let t = now();
        let stove = f
            .db
            .items()
            .insert(
                f.owner,
                &NewItem {
                    name: "Stove".to_string(),
                    description: String::new(),
                    available: true,
                },
            )
            .await
            .unwrap();

        let tent = book(&f, t + Duration::days(1), t + Duration::days(2)).await;
        let on_stove = f
            .db
            .bookings()
            .insert(stove.id, f.booker, &period(t + Duration::days(1), t + Duration::days(2)))
            .await
            .unwrap();

        let repo = f.db.bookings();
        let only_tent = repo.find_by_items_for_owner(&[f.item], f.owner).await.unwrap();
        assert_eq!(only_tent.iter().map(|b| b.id).collect::<Vec<_>>(), vec![tent.id]);

        let both = repo
            .find_by_items_for_owner(&[f.item, stove.id], f.owner)
            .await
            .unwrap();
        assert_eq!(
            both.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![tent.id, on_stove.id]
        );

        assert!(repo.find_by_items_for_owner(&[], f.owner).await.unwrap().is_empty());
        assert!(repo
            .find_by_items_for_owner(&[f.item, stove.id], f.booker)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_approved_overlap() {
        let f = fixture().await;
        let t = now();
        let start = t + Duration::days(1);
        let end = t + Duration::days(3);

        let booking = book(&f, start, end).await;
        let repo = f.db.bookings();

        // Waiting bookings do not block.
        assert!(!repo.has_approved_overlap(f.item, start, end).await.unwrap());

        let owner = f.owner;
        repo.transition(booking.id, |b| b.decide(owner, true))
            .await
            .unwrap();

        assert!(repo
            .has_approved_overlap(f.item, t + Duration::days(2), t + Duration::days(5))
            .await
            .unwrap());
        // Touching at the boundary is not an overlap.
        assert!(!repo
            .has_approved_overlap(f.item, end, end + Duration::days(1))
            .await
            .unwrap());
    }
}
