use serde::{Deserialize, Serialize};

/// Body of `POST /api/users`. Missing fields fail validation like blank ones.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Body of `PUT /api/users/:id`. A missing or `null` field is left unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
