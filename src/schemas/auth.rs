use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::types::Role;
use crate::schemas::user::ProfileResponse;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SignUpRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub(crate) email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub(crate) password: String,
    #[serde(alias = "fullName")]
    #[validate(length(min = 3, message = "Full name must be at least 3 characters"))]
    pub(crate) full_name: String,
    /// NIM or NIP.
    #[serde(alias = "externalId", alias = "nim_nip")]
    #[validate(length(min = 3, message = "NIM/NIP must be at least 3 characters"))]
    pub(crate) external_id: String,
}

impl SignUpRequest {
    pub(crate) fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_ascii_lowercase(),
            password: self.password,
            full_name: self.full_name.trim().to_string(),
            external_id: self.external_id.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SignInRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub(crate) email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub(crate) password: String,
}

impl SignInRequest {
    pub(crate) fn normalized(self) -> Self {
        Self { email: self.email.trim().to_ascii_lowercase(), password: self.password }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
    pub(crate) expires_at: String,
    pub(crate) profile: ProfileResponse,
    pub(crate) role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(email: &str, password: &str, full_name: &str, external_id: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
            external_id: external_id.to_string(),
        }
        .normalized()
    }

    #[test]
    fn accepts_minimal_valid_sign_up() {
        let request = sign_up("  Siti@Kampus.ac.id ", "rahasia", "Siti", "220");
        assert!(request.validate().is_ok());
        assert_eq!(request.email, "siti@kampus.ac.id");
    }

    #[test]
    fn rejects_short_fields_after_trimming() {
        assert!(sign_up("siti@kampus.ac.id", "12345", "Siti", "220").validate().is_err());
        assert!(sign_up("siti@kampus.ac.id", "rahasia", "  Si  ", "220").validate().is_err());
        assert!(sign_up("siti@kampus.ac.id", "rahasia", "Siti", " 22 ").validate().is_err());
        assert!(sign_up("not-an-email", "rahasia", "Siti", "220").validate().is_err());
    }

    #[test]
    fn accepts_camel_case_aliases() {
        let request: SignUpRequest = serde_json::from_value(serde_json::json!({
            "email": "budi@kampus.ac.id",
            "password": "rahasia",
            "fullName": "Budi Santoso",
            "externalId": "1987001"
        }))
        .unwrap();
        assert_eq!(request.full_name, "Budi Santoso");
        assert_eq!(request.external_id, "1987001");
    }
}
