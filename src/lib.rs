//! # checkin-gateway
//!
//! REST gateway for a study-abroad safety check-in system.
//!
//! Students submit location check-ins and emergency signals, admins and
//! faculty manage class rosters, and faculty dashboards read the latest
//! known status of every student they teach.
//!
//! ## Architecture
//!
//! ```text
//! Clients (faculty dashboard, student page, admin page)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── StatusService / RosterService / CheckInService (service/)
//!     │
//!     ├── MembershipFilter + LatestStatusReducer (domain/)
//!     │
//!     └── RosterStore + CheckInStore (persistence/)
//!           ├── MemoryStore
//!           └── PostgresStore
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
