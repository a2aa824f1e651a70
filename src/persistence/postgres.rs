//! PostgreSQL implementation of the persistence layer.

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;
use futures_util::{FutureExt, StreamExt};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{CheckInRow, ClassRosterRow};
use super::{CheckInStore, RosterStore};
use crate::config::GatewayConfig;
use crate::domain::{ClassRoster, FacultyMatch, RosterEdit, StoredCheckIn};
use crate::error::GatewayError;

const ROSTER_COLUMNS: &str =
    "class_id, name, faculty_list, students_list, custom_statuses, created_at";

const SCAN_CHECK_INS: &str = "SELECT id, student_name, check_date, check_time, latitude, longitude, \
     address, maps_link, emergency, emergency_details, peers, place, comments, student_status \
     FROM check_ins";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::StoreError`] if the database is unreachable.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies pending migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::StoreError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), GatewayError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| GatewayError::StoreError(e.to_string()))
    }

    async fn fetch_rosters(
        &self,
        filter: &str,
        arg: Option<&str>,
    ) -> Result<Vec<ClassRoster>, GatewayError> {
        let sql = format!(
            "SELECT {ROSTER_COLUMNS} FROM class_rosters {filter} ORDER BY created_at, class_id"
        );
        let mut query = sqlx::query_as::<_, ClassRosterRow>(&sql);
        if let Some(arg) = arg {
            query = query.bind(arg);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(ClassRoster::from).collect())
    }
}

impl RosterStore for PostgresStore {
    fn classes_for_faculty<'a>(
        &'a self,
        faculty: &'a str,
        mode: FacultyMatch,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        let filter = match mode {
            FacultyMatch::Exact => "WHERE faculty_list @> ARRAY[$1]::text[]",
            FacultyMatch::Contains => {
                "WHERE EXISTS (SELECT 1 FROM unnest(faculty_list) AS f WHERE strpos(f, $1) > 0)"
            }
        };
        async move { self.fetch_rosters(filter, Some(faculty)).await }.boxed()
    }

    fn classes_for_student<'a>(
        &'a self,
        student: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        async move {
            self.fetch_rosters("WHERE students_list @> ARRAY[$1]::text[]", Some(student))
                .await
        }
        .boxed()
    }

    fn classes_for_member<'a>(
        &'a self,
        user: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClassRoster>, GatewayError>> {
        async move {
            self.fetch_rosters(
                "WHERE students_list @> ARRAY[$1]::text[] OR faculty_list @> ARRAY[$1]::text[]",
                Some(user),
            )
            .await
        }
        .boxed()
    }

    fn list_classes(&self) -> BoxFuture<'_, Result<Vec<ClassRoster>, GatewayError>> {
        async move { self.fetch_rosters("", None).await }.boxed()
    }

    fn get_class<'a>(
        &'a self,
        class_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<ClassRoster>, GatewayError>> {
        async move {
            let sql = format!("SELECT {ROSTER_COLUMNS} FROM class_rosters WHERE class_id = $1");
            let row = sqlx::query_as::<_, ClassRosterRow>(&sql)
                .bind(class_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row.map(ClassRoster::from))
        }
        .boxed()
    }

    fn insert_class(&self, roster: ClassRoster) -> BoxFuture<'_, Result<(), GatewayError>> {
        async move {
            sqlx::query(
                "INSERT INTO class_rosters \
                 (class_id, name, faculty_list, students_list, custom_statuses, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&roster.class_id)
            .bind(&roster.name)
            .bind(&roster.faculty_list)
            .bind(&roster.students_list)
            .bind(&roster.custom_statuses)
            .bind(roster.created_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }
        .boxed()
    }

    fn delete_class<'a>(&'a self, class_id: &'a str) -> BoxFuture<'a, Result<(), GatewayError>> {
        async move {
            let result = sqlx::query("DELETE FROM class_rosters WHERE class_id = $1")
                .bind(class_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(GatewayError::ClassNotFound(class_id.to_string()));
            }
            Ok(())
        }
        .boxed()
    }

    fn update_class<'a>(
        &'a self,
        class_id: &'a str,
        edit: RosterEdit,
    ) -> BoxFuture<'a, Result<ClassRoster, GatewayError>> {
        async move {
            let mut tx = self.pool.begin().await?;

            let sql = format!(
                "SELECT {ROSTER_COLUMNS} FROM class_rosters WHERE class_id = $1 FOR UPDATE"
            );
            let row = sqlx::query_as::<_, ClassRosterRow>(&sql)
                .bind(class_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| GatewayError::ClassNotFound(class_id.to_string()))?;

            let mut roster = ClassRoster::from(row);
            if roster.apply(&edit)? {
                sqlx::query(
                    "UPDATE class_rosters \
                     SET faculty_list = $2, students_list = $3, custom_statuses = $4 \
                     WHERE class_id = $1",
                )
                .bind(class_id)
                .bind(&roster.faculty_list)
                .bind(&roster.students_list)
                .bind(&roster.custom_statuses)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            Ok(roster)
        }
        .boxed()
    }
}

impl CheckInStore for PostgresStore {
    fn scan_check_ins(&self) -> BoxStream<'_, Result<StoredCheckIn, GatewayError>> {
        sqlx::query_as::<_, CheckInRow>(SCAN_CHECK_INS)
            .fetch(&self.pool)
            .map(|row| row.map(StoredCheckIn::from).map_err(GatewayError::from))
            .boxed()
    }

    fn append_check_in(&self, row: StoredCheckIn) -> BoxFuture<'_, Result<(), GatewayError>> {
        async move {
            let id = row
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            sqlx::query(
                "INSERT INTO check_ins (id, student_name, check_date, check_time, latitude, \
                 longitude, address, maps_link, emergency, emergency_details, peers, place, \
                 comments, student_status) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
            )
            .bind(id)
            .bind(row.name)
            .bind(row.date)
            .bind(row.time)
            .bind(row.latitude)
            .bind(row.longitude)
            .bind(row.address)
            .bind(row.maps_link)
            .bind(row.emergency)
            .bind(row.emergency_details)
            .bind(row.peers)
            .bind(row.place)
            .bind(row.comments)
            .bind(row.student_status)
            .execute(&self.pool)
            .await?;
            Ok(())
        }
        .boxed()
    }
}
