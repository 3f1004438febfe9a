use crate::client::{Access, MincaClient};
use crate::error::Result;
use crate::types::{AuthResponse, LoginRequest, SignupRequest};

impl MincaClient {
    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.post_json(Access::Public, &["auth", "login"], request)
            .await
    }

    /// `POST /auth/signup`
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse> {
        self.post_json(Access::Public, &["auth", "signup"], request)
            .await
    }
}
