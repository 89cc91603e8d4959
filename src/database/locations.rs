use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Location, LocationPayload};

/// Persistence gateway for the `locations` table. Each operation is a single
/// parameterized query; lookups return the (possibly empty) matching row set
/// and deletes return the affected-row count.
pub struct LocationStore {
    pool: PgPool,
}

impl LocationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Location>, DatabaseError> {
        let rows = sqlx::query_as::<_, Location>(r#"SELECT * FROM locations"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_groomer(&self, groomer_id: &str) -> Result<Vec<Location>, DatabaseError> {
        let rows =
            sqlx::query_as::<_, Location>(r#"SELECT * FROM locations WHERE "groomerId" = $1"#)
                .bind(groomer_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    /// Insert a new location. A missing `id` in the payload gets a generated
    /// UUID string; duplicate-groomer detection is the handler's pre-check.
    pub async fn insert(&self, location: &LocationPayload) -> Result<Location, DatabaseError> {
        let id = location
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let row = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations
                (id, "groomerId", "businessName", address, city, state, zip, email, "phoneNumber", lat, lng)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&location.groomer_id)
        .bind(&location.business_name)
        .bind(&location.address)
        .bind(&location.city)
        .bind(&location.state)
        .bind(&location.zip)
        .bind(&location.email)
        .bind(&location.phone_number)
        .bind(location.lat)
        .bind(location.lng)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Full-object replace of every row keyed by `groomer_id`. Returns the
    /// updated row set; the primary key is never touched.
    pub async fn update(
        &self,
        groomer_id: &str,
        location: &LocationPayload,
    ) -> Result<Vec<Location>, DatabaseError> {
        let rows = sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET "groomerId" = $1, "businessName" = $2, address = $3, city = $4,
                state = $5, zip = $6, email = $7, "phoneNumber" = $8, lat = $9, lng = $10
            WHERE "groomerId" = $11
            RETURNING *
            "#,
        )
        .bind(&location.groomer_id)
        .bind(&location.business_name)
        .bind(&location.address)
        .bind(&location.city)
        .bind(&location.state)
        .bind(&location.zip)
        .bind(&location.email)
        .bind(&location.phone_number)
        .bind(location.lat)
        .bind(location.lng)
        .bind(groomer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn remove(&self, groomer_id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query(r#"DELETE FROM locations WHERE "groomerId" = $1"#)
            .bind(groomer_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
