use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Pet, PetPayload, PetUpdate};

/// Persistence gateway for the `pets` table. Every operation is scoped by
/// the owning profile id so a guessed numeric pet id cannot cross owners.
pub struct PetStore {
    pool: PgPool,
}

impl PetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>, DatabaseError> {
        let rows =
            sqlx::query_as::<_, Pet>(r#"SELECT * FROM pets WHERE "ownerId" = $1 ORDER BY id"#)
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    /// Single-row lookup with both predicates in one query, so ownership and
    /// existence are checked together.
    pub async fn find_by_owner_and_id(
        &self,
        owner_id: &str,
        pet_id: i32,
    ) -> Result<Option<Pet>, DatabaseError> {
        let row =
            sqlx::query_as::<_, Pet>(r#"SELECT * FROM pets WHERE "ownerId" = $1 AND id = $2"#)
                .bind(owner_id)
                .bind(pet_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    /// Insert a pet for `owner_id`. The id is store-assigned; the payload
    /// type carries no key fields to inject.
    pub async fn insert(&self, owner_id: &str, pet: &PetPayload) -> Result<Pet, DatabaseError> {
        let row = sqlx::query_as::<_, Pet>(
            r#"
            INSERT INTO pets ("ownerId", name, shots, type, img)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&pet.name)
        .bind(pet.shots)
        .bind(&pet.kind)
        .bind(&pet.img)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Partial update keyed by (owner, id); absent fields keep their stored
    /// values. Returns `None` when no row matched both predicates.
    pub async fn update(
        &self,
        owner_id: &str,
        pet_id: i32,
        changes: &PetUpdate,
    ) -> Result<Option<Pet>, DatabaseError> {
        let row = sqlx::query_as::<_, Pet>(
            r#"
            UPDATE pets
            SET "ownerId" = COALESCE($1, "ownerId"),
                name = COALESCE($2, name),
                shots = COALESCE($3, shots),
                type = COALESCE($4, type),
                img = COALESCE($5, img)
            WHERE "ownerId" = $6 AND id = $7
            RETURNING *
            "#,
        )
        .bind(&changes.owner_id)
        .bind(&changes.name)
        .bind(changes.shots)
        .bind(&changes.kind)
        .bind(&changes.img)
        .bind(owner_id)
        .bind(pet_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete by (id, owner). The count is authoritative: zero after a
    /// passed existence check is reported upstream as an unexpected error.
    pub async fn remove(&self, owner_id: &str, pet_id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query(r#"DELETE FROM pets WHERE "ownerId" = $1 AND id = $2"#)
            .bind(owner_id)
            .bind(pet_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
