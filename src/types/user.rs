use serde::{Deserialize, Serialize};

/// An authenticated account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Server-issued user identifier.
    #[serde(rename = "userid")]
    pub id: String,

    /// Display name.
    pub username: String,

    /// Login email.
    pub email: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful login or signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_response_wire_names() {
        let value = json!({
            "user": {"userid": "u-1", "username": "ana", "email": "ana@example.com"},
            "token": "tok"
        });
        let response: AuthResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.user.id, "u-1");
        assert_eq!(response.token, "tok");
    }

    #[test]
    fn signup_body() {
        let body = SignupRequest {
            username: "ana".into(),
            email: "ana@example.com".into(),
            password: "secret".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"username": "ana", "email": "ana@example.com", "password": "secret"})
        );
    }
}
