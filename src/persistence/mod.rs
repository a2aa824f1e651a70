//! Persistence layer: roster and check-in stores.
//!
//! Services talk to storage only through the [`RosterStore`] and
//! [`CheckInStore`] traits, so handles are injected at startup and tests
//! can substitute their own. The methods return boxed futures and streams
//! to keep the traits usable as `dyn` objects.
//!
//! Two implementations ship with the crate: [`memory::MemoryStore`]
//! (process-local, optionally seeded from JSON) and
//! [`postgres::PostgresStore`] (`sqlx::PgPool`).

pub mod memory;
pub mod models;
pub mod postgres;

use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;

use crate::domain::{ClassRoster, FacultyMatch, RosterEdit, StoredCheckIn};
use crate::error::GatewayError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Access to class/trip rosters.
pub trait RosterStore: Send + Sync + std::fmt::Debug {
    /// Classes whose faculty list matches `faculty` under `mode`.
    fn classes_for_faculty<'a>(
        &'a self,
        faculty: &'a str,
        mode: FacultyMatch,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>>;

    /// Classes that enroll `student`.
    fn classes_for_student<'a>(
        &'a self,
        student: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>>;

    /// Classes listing `user` as a student or as a faculty member, compared
    /// exactly.
    fn classes_for_member<'a>(
        &'a self,
        user: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>>;

    /// Every class.
    fn list_classes(&self) -> BoxFuture<'_, Result<Vec<ClassRoster>, GatewayError>>;

    /// One class by ID, `None` if absent.
    fn get_class<'a>(
        &'a self,
        class_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<ClassRoster>, GatewayError>>;

    /// Stores a new class.
    fn insert_class(&self, roster: ClassRoster) -> BoxFuture<'_, Result<(), GatewayError>>;

    /// Deletes a class.
    ///
    /// Fails with [`GatewayError::ClassNotFound`] if absent.
    fn delete_class<'a>(&'a self, class_id: &'a str) -> BoxFuture<'a, Result<(), GatewayError>>;

    /// Applies `edit` atomically and returns the updated class.
    ///
    /// Fails with [`GatewayError::ClassNotFound`] if absent, or with the
    /// error of [`ClassRoster::apply`].
    fn update_class<'a>(
        &'a self,
        class_id: &'a str,
        edit: RosterEdit,
    ) -> BoxFuture<'a, Result<ClassRoster, GatewayError>>;
}

/// Access to the append-only check-in table.
pub trait CheckInStore: Send + Sync + std::fmt::Debug {
    /// Streams every stored check-in, in storage order.
    ///
    /// No filtering or pagination is applied; callers must reduce the
    /// stream incrementally.
    fn scan_check_ins(&self) -> BoxStream<'_, Result<StoredCheckIn, GatewayError>>;

    /// Appends one check-in.
    fn append_check_in(&self, row: StoredCheckIn) -> BoxFuture<'_, Result<(), GatewayError>>;
}
