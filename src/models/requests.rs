use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Role;

/// Request to sign in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request to create an account during onboarding
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub major: String,
    #[serde(default = "default_year")]
    #[validate(range(min = 1, max = 6))]
    pub year: u8,
    #[serde(default = "default_role")]
    pub role: Role,
}

/// Star rating and optional comment for a finished mentorship
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewRequest {
    #[serde(rename = "partnerId")]
    #[validate(length(min = 1))]
    pub partner_id: String,
    /// 1 to 5 stars; 0 means nothing was picked yet
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: String,
}

fn default_year() -> u8 {
    1
}

fn default_role() -> Role {
    Role::Mentee
}
