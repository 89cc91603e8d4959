use axum::extract::{Extension, Json, Path};
use serde_json::json;

use crate::database::manager::DatabaseManager;
use crate::database::models::{PetPayload, PetUpdate};
use crate::database::PetStore;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::middleware::{verify_owner, AuthUser};

async fn store() -> Result<PetStore, ApiError> {
    Ok(PetStore::new(DatabaseManager::pool().await?))
}

/// The pet id in the path must be a real integer; an unparsable value is
/// rejected instead of being coerced into something invalid-but-truthy.
fn parse_pet_id(value: &str) -> Result<i32, ApiError> {
    value.parse().map_err(|_| ApiError::invalid_id(value))
}

/// GET /profiles/:id/pets - list the owner's pets
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
) -> Result<Envelope, ApiError> {
    verify_owner(&auth, &profile_id)?;

    let pets = store().await?.find_by_owner(&profile_id).await?;
    if pets.is_empty() {
        return Err(ApiError::not_found(format!(
            "No pets were found for profile {}",
            profile_id
        )));
    }

    Ok(Envelope::ok(
        format!("Successfully fetched the pets for profile {}", profile_id),
        json!(pets),
    ))
}

/// GET /profiles/:id/pets/:petId
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path((profile_id, pet_id)): Path<(String, String)>,
) -> Result<Envelope, ApiError> {
    verify_owner(&auth, &profile_id)?;
    let pet_id = parse_pet_id(&pet_id)?;

    let pet = store()
        .await?
        .find_by_owner_and_id(&profile_id, pet_id)
        .await?;
    let Some(pet) = pet else {
        return Err(ApiError::not_found(format!(
            "Unable to find a pet with id {} for owner {}",
            pet_id, profile_id
        )));
    };

    Ok(Envelope::ok(
        format!(
            "Successfully fetched a pet with id {} for owner {}",
            pet_id, profile_id
        ),
        json!([pet]),
    ))
}

/// POST /profiles/:id/pets
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    body: Option<Json<PetPayload>>,
) -> Result<Envelope, ApiError> {
    verify_owner(&auth, &profile_id)?;

    let Some(Json(pet)) = body else {
        return Err(ApiError::no_request_body("add a pet"));
    };

    let inserted = store().await?.insert(&profile_id, &pet).await?;
    Ok(Envelope::ok(
        format!("Successfully added a pet for owner {}", profile_id),
        json!([inserted]),
    ))
}

/// PUT /profiles/:id/pets/:petId
///
/// The update carries both predicates, so existence and ownership are
/// resolved by the same conditional write that applies the change.
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path((profile_id, pet_id)): Path<(String, String)>,
    body: Option<Json<PetUpdate>>,
) -> Result<Envelope, ApiError> {
    verify_owner(&auth, &profile_id)?;
    let pet_id = parse_pet_id(&pet_id)?;

    let Some(Json(changes)) = body else {
        return Err(ApiError::no_request_body("update a pet"));
    };

    let updated = store()
        .await?
        .update(&profile_id, pet_id, &changes)
        .await?;
    let Some(updated) = updated else {
        return Err(ApiError::not_found(format!(
            "Unable to find a pet with id {} for owner {}",
            pet_id, profile_id
        )));
    };

    Ok(Envelope::ok(
        format!(
            "Successfully updated pet with id {} for owner {}",
            pet_id, profile_id
        ),
        json!([updated]),
    ))
}

/// DELETE /profiles/:id/pets/:petId
///
/// Looks the row up first so a missing pet reports 404; once existence is
/// confirmed, a zero delete count means something went wrong underneath and
/// is reported as a 500.
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path((profile_id, pet_id)): Path<(String, String)>,
) -> Result<Envelope, ApiError> {
    verify_owner(&auth, &profile_id)?;
    let pet_id = parse_pet_id(&pet_id)?;

    let store = store().await?;
    let existing = store.find_by_owner_and_id(&profile_id, pet_id).await?;
    if existing.is_none() {
        return Err(ApiError::not_found(format!(
            "Unable to find a pet with id {} for owner {}",
            pet_id, profile_id
        )));
    }

    let deleted = store.remove(&profile_id, pet_id).await?;
    if deleted == 0 {
        return Err(ApiError::internal(format!(
            "Unexpected error deleting pet with id {} for owner {}",
            pet_id, profile_id
        )));
    }

    Ok(Envelope::ok(
        format!(
            "Successfully deleted the pet with id {} for owner {}",
            pet_id, profile_id
        ),
        json!({}),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn numeric_pet_ids_parse() {
        assert_eq!(parse_pet_id("5").unwrap(), 5);
        assert_eq!(parse_pet_id("0").unwrap(), 0);
    }

    #[test]
    fn unparsable_pet_ids_are_rejected_not_coerced() {
        for bad in ["rex", "5.5", "", "5x", " 5"] {
            let err = parse_pet_id(bad).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{:?}", bad);
        }
    }
}
