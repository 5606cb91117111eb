//! # shareit-core: Pure Booking Rules for ShareIt
//!
//! This crate holds the booking lifecycle and availability rules of ShareIt
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShareIt Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │   POST /bookings   PATCH /bookings/{id}   GET /bookings/owner   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Services (apps/api)                          │   │
//! │  │    create, approve, cancel, list, item views                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shareit-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ lifecycle │  │   query   │  │ validation│  │   │
//! │  │   │  Booking  │  │  decide   │  │ StateFacet│  │  request  │  │   │
//! │  │   │   Item    │  │  cancel   │  │PageRequest│  │  paging   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO WALL CLOCK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shareit-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Item, Booking, views)
//! - [`error`] - Domain error types
//! - [`validation`] - Booking request and pagination checks
//! - [`lifecycle`] - Approval and cancellation rules
//! - [`query`] - State facets, listing party, pages
//! - [`availability`] - Last/next booking projection
//! - [`clock`] - Injected source of "now"
//!
//! ## Example Usage
//!
//! ```rust
//! use shareit_core::StateFacet;
//!
//! assert_eq!(StateFacet::parse(None).unwrap(), StateFacet::All);
//! assert!(StateFacet::parse(Some("CURRENT")).is_ok());
//! assert!(StateFacet::parse(Some("Banana")).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod clock;
pub mod error;
pub mod lifecycle;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use availability::{project, ItemAvailability};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use query::{BookingParty, PageRequest, StateFacet};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a listing supplies `from` without `size`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
