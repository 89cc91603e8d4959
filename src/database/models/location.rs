use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A grooming business. Keyed by an opaque string id; `groomer_id` links the
/// row to the owning groomer's profile. Business logic expects at most one
/// row per groomer, but the schema does not enforce uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub groomer_id: String,
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Request body for creating or replacing a location. `id` may be omitted on
/// create, in which case the server generates one; it is never taken from
/// the body on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    #[serde(default)]
    pub id: Option<String>,
    pub groomer_id: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}
