use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Ownership Guard: a caller may only touch resources under their own
/// profile id. The comparison is a case-sensitive exact match between the
/// authenticated identity and the `:id` path parameter.
///
/// Applied by the pet handlers only; location routes rely solely on
/// upstream authentication (see DESIGN.md).
pub fn verify_owner(auth: &AuthUser, profile_id: &str) -> Result<(), ApiError> {
    if auth.id != profile_id {
        return Err(ApiError::access_denied(&auth.id, profile_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn matching_ids_pass() {
        let auth = AuthUser {
            id: "00ulthapbErVUwVJy4x6".to_string(),
        };
        assert!(verify_owner(&auth, "00ulthapbErVUwVJy4x6").is_ok());
    }

    #[test]
    fn mismatched_ids_are_denied_with_both_ids_in_the_diagnostic() {
        let auth = AuthUser {
            id: "00ulthapbErVUwVJy4x6".to_string(),
        };
        let err = verify_owner(&auth, "00ultwew80Onb2vOT4x6").unwrap_err();

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Access Denied");
        match err {
            ApiError::Unauthorized { validation, .. } => {
                assert_eq!(validation.len(), 1);
                assert!(validation[0].contains("00ulthapbErVUwVJy4x6"));
                assert!(validation[0].contains("00ultwew80Onb2vOT4x6"));
            }
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let auth = AuthUser {
            id: "OwnerA".to_string(),
        };
        assert!(verify_owner(&auth, "ownera").is_err());
    }
}
