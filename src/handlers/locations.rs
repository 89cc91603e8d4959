use axum::extract::{Json, Path};
use serde_json::json;

use crate::database::manager::DatabaseManager;
use crate::database::models::LocationPayload;
use crate::database::LocationStore;
use crate::envelope::Envelope;
use crate::error::ApiError;

// Location routes rely on upstream authentication only; there is no
// ownership comparison against the groomer id (see DESIGN.md).

async fn store() -> Result<LocationStore, ApiError> {
    Ok(LocationStore::new(DatabaseManager::pool().await?))
}

/// GET /locations - list every grooming business
pub async fn list() -> Result<Envelope, ApiError> {
    let locations = store().await?.find_all().await?;
    Ok(Envelope::ok(
        "Successfully fetched the locations",
        json!(locations),
    ))
}

/// GET /locations/:groomerId
pub async fn get(Path(groomer_id): Path<String>) -> Result<Envelope, ApiError> {
    let rows = store().await?.find_by_groomer(&groomer_id).await?;
    if rows.is_empty() {
        return Err(ApiError::not_found_with("Location Not Found", json!([])));
    }
    Ok(Envelope::ok(
        format!("Successfully fetched the location for groomer {}", groomer_id),
        json!(rows),
    ))
}

/// POST /locations - insert, keyed by the natural key in the body
pub async fn create(body: Option<Json<LocationPayload>>) -> Result<Envelope, ApiError> {
    let Some(Json(location)) = body else {
        return Err(ApiError::no_request_body("add a location"));
    };

    let store = store().await?;

    // Friendlier error path only; the store's unique constraint is the real
    // guarantee against a concurrent insert of the same key.
    let existing = store.find_by_groomer(&location.groomer_id).await?;
    if !existing.is_empty() {
        return Err(ApiError::conflict("Location already exists"));
    }

    let inserted = store.insert(&location).await?;
    Ok(Envelope::ok(
        format!(
            "Successfully added a location for groomer {}",
            inserted.groomer_id
        ),
        json!([inserted]),
    ))
}

/// PUT /locations/:groomerId - full-object replace
pub async fn update(
    Path(groomer_id): Path<String>,
    body: Option<Json<LocationPayload>>,
) -> Result<Envelope, ApiError> {
    let Some(Json(location)) = body else {
        return Err(ApiError::no_request_body("update a location"));
    };

    let store = store().await?;
    let existing = store.find_by_groomer(&groomer_id).await?;
    if existing.is_empty() {
        return Err(ApiError::not_found_with("Location Not Found", json!([])));
    }

    let updated = store.update(&groomer_id, &location).await?;
    Ok(Envelope::ok(
        format!("Successfully updated the location for groomer {}", groomer_id),
        json!(updated),
    ))
}

/// DELETE /locations/:groomerId
///
/// The pre-delete lookup distinguishes 404 from 200; once existence is
/// confirmed, a zero delete count is an unexpected error, not a not-found.
/// The response data is the raw delete count (locations echo the count
/// while pets mask it; the asymmetry is part of the contract).
pub async fn delete(Path(groomer_id): Path<String>) -> Result<Envelope, ApiError> {
    let store = store().await?;
    let existing = store.find_by_groomer(&groomer_id).await?;
    if existing.is_empty() {
        return Err(ApiError::not_found_with("Location Not Found", json!([])));
    }

    let deleted = store.remove(&groomer_id).await?;
    if deleted == 0 {
        return Err(ApiError::internal(format!(
            "Unexpected error deleting the location for groomer {}",
            groomer_id
        )));
    }

    Ok(Envelope::ok(
        format!("Successfully deleted the location for groomer {}", groomer_id),
        json!(deleted),
    ))
}
