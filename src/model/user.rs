use serde::{Deserialize, Serialize};

resource_id!(User, "user");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Cashier,
}

/// A staff member. Checkout is performed on behalf of one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

/// Payload for registering a staff member.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

/// DTO for profile updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}
