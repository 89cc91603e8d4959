use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A pet owned by a user profile. `id` is store-assigned and
/// auto-incrementing; `owner_id` references the profile of the owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Pet {
    pub id: i32,
    pub owner_id: String,
    pub name: String,
    pub shots: bool,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub img: Option<String>,
}

/// Request body for creating a pet. There is deliberately no `id` or
/// `ownerId` field: the primary key is store-assigned and the owner comes
/// from the path, so client-supplied values are stripped structurally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetPayload {
    pub name: String,
    #[serde(default)]
    pub shots: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

/// Request body for updating a pet. All fields optional; absent fields keep
/// their stored values. `ownerId` may be supplied to reassign the pet, as
/// the original contract allowed; `id` is stripped like on create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetUpdate {
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub shots: Option<bool>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_supplied_id_and_owner_are_stripped_on_create() {
        let payload: PetPayload = serde_json::from_value(json!({
            "id": 999,
            "ownerId": "someone-else",
            "name": "Rex",
            "type": "dog",
            "shots": true,
        }))
        .unwrap();

        // The struct has no id/ownerId fields, so the injected values are
        // simply dropped during deserialization.
        assert_eq!(payload.name, "Rex");
        assert_eq!(payload.kind.as_deref(), Some("dog"));
        assert!(payload.shots);
    }

    #[test]
    fn shots_defaults_to_false() {
        let payload: PetPayload = serde_json::from_value(json!({ "name": "Jane" })).unwrap();
        assert!(!payload.shots);
        assert!(payload.kind.is_none());
        assert!(payload.img.is_none());
    }

    #[test]
    fn name_is_required() {
        assert!(serde_json::from_value::<PetPayload>(json!({ "type": "cat" })).is_err());
    }

    #[test]
    fn update_accepts_a_partial_body() {
        let update: PetUpdate = serde_json::from_value(json!({ "shots": true })).unwrap();
        assert_eq!(update.shots, Some(true));
        assert!(update.name.is_none());
        assert!(update.owner_id.is_none());
    }

    #[test]
    fn pet_serializes_type_under_its_wire_name() {
        let pet = Pet {
            id: 2,
            owner_id: "00ulthapbErVUwVJy4x6".to_string(),
            name: "Rex".to_string(),
            shots: true,
            kind: Some("dog".to_string()),
            img: None,
        };
        let value = serde_json::to_value(&pet).unwrap();
        assert_eq!(value["type"], "dog");
        assert_eq!(value["ownerId"], "00ulthapbErVUwVJy4x6");
        assert!(value.get("kind").is_none());
    }
}
